//! instrscheme: build and inspect instrumentation schemes
//!
//! `build` turns a JSON setup config (and/or `--event` arguments) into a
//! scheme file, `describe` prints the record layout of a saved scheme.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use instrscheme::{EventConfig, InstrScheme, SchemeConfig, INSTR_SCHEME_FILE_KEY};

#[derive(Parser)]
#[command(name = "instrscheme")]
#[command(about = "Build and inspect instrumentation schemes")]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a scheme and save it
    Build {
        /// JSON setup config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra event to enable, e.g. NEW:loc,thr,obj,bef,aft
        #[arg(short, long)]
        event: Vec<String>,

        /// Enable loop enter/leave events
        #[arg(long)]
        loop_events: bool,

        /// Enable basic block events
        #[arg(long)]
        basic_block_events: bool,

        /// Enable quad events
        #[arg(long)]
        quad_events: bool,

        /// Where to save the scheme (overrides the config's instr_scheme_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the record layout of a saved scheme
    Describe {
        /// Path to the scheme file
        scheme: PathBuf,

        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_build(
    config: Option<PathBuf>,
    events: Vec<String>,
    toggles: [bool; 3],
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config {
        Some(path) => SchemeConfig::load(&path)?,
        None => SchemeConfig::default(),
    };
    for event in events.iter() {
        config.add_event(EventConfig::from_str(event)?);
    }
    let [loop_events, basic_block_events, quad_events] = toggles;
    config.enter_and_leave_loop_event |= loop_events;
    config.basic_block_event |= basic_block_events;
    config.quad_event |= quad_events;

    let output = match output.as_deref().or(config.scheme_file()) {
        Some(path) => path.to_path_buf(),
        None => bail!(
            "No output file, pass --output or set {} in the config",
            INSTR_SCHEME_FILE_KEY
        ),
    };

    let scheme = config.build_scheme()?;
    scheme.save(&output)?;
    eprintln!(
        "Wrote {} ({} events, maps: {})",
        output.display(),
        scheme.present_events().count(),
        maps_str(&scheme)
    );
    Ok(())
}

fn maps_str(scheme: &InstrScheme) -> String {
    let maps = scheme.required_maps();
    if maps.is_empty() {
        return "none".to_string();
    }
    maps.iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_describe(path: PathBuf, format: &str) -> Result<()> {
    let scheme = InstrScheme::load(&path)
        .with_context(|| format!("Failed to load scheme {}", path.display()))?;

    match format {
        "json" => {
            let events: Vec<serde_json::Value> = scheme
                .present_events()
                .map(|(kind, e)| {
                    serde_json::json!({
                        "kind": kind,
                        "size": e.size(),
                        "bef": e.is_bef(),
                        "aft": e.is_aft(),
                        "layout": scheme.layout(kind),
                    })
                })
                .collect();
            let doc = serde_json::json!({
                "events": events,
                "enter_and_leave_loop_event": scheme.has_enter_and_leave_loop_event(),
                "basic_block_event": scheme.has_basic_block_event(),
                "quad_event": scheme.has_quad_event(),
                "required_maps": scheme.required_maps(),
                "needs_trace_transform": scheme.needs_trace_transform(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        "table" => print_table(&scheme),
        _ => bail!("Unknown format: {}", format),
    }
    Ok(())
}

fn print_table(scheme: &InstrScheme) {
    if scheme.present_events().count() == 0 {
        println!("(no events)");
    } else {
        println!("{:<22} {:>5}  {:<7} LAYOUT", "EVENT", "SIZE", "WHEN");
        for (kind, e) in scheme.present_events() {
            let when = match (e.is_bef(), e.is_aft()) {
                (true, true) => "bef+aft",
                (true, false) => "bef",
                (false, true) => "aft",
                (false, false) => "-",
            };
            println!(
                "{:<22} {:>5}  {:<7} {}",
                kind.name(),
                e.size(),
                when,
                scheme.layout(kind)
            );
        }
    }
    println!();
    println!(
        "loop events: {}, basic block events: {}, quad events: {}",
        scheme.has_enter_and_leave_loop_event(),
        scheme.has_basic_block_event(),
        scheme.has_quad_event()
    );
    println!("required maps: {}", maps_str(scheme));
    println!("trace transform: {}", scheme.needs_trace_transform());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            config,
            event,
            loop_events,
            basic_block_events,
            quad_events,
            output,
        } => run_build(
            config,
            event,
            [loop_events, basic_block_events, quad_events],
            output,
        ),
        Commands::Describe { scheme, format } => run_describe(scheme, &format),
    }
}
