use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::scheme::{EventRequest, InstrScheme};
use crate::trace::EventKind;

// The JSON config file format is
// {
//   "instr_scheme_file": "path/to/scheme.json",
//   "events": [
//     {
//       "event": "NEW",
//       "loc": true,
//       "thr": true,
//       "obj": true,
//       "bef": true,
//       "aft": true
//     },
//     {
//       "event": "GETFIELD_PRIMITIVE",
//       "loc": true,
//       "fld": true
//     }
//   ],
//   "enter_and_leave_loop_event": false,
//   "basic_block_event": false,
//   "quad_event": false
// }
//
// Every flag defaults to false. The same event may be listed more than once, later entries can
// only add fields.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SchemeConfig {
    pub instr_scheme_file: Option<PathBuf>,
    #[serde(default)]
    pub events: Vec<EventConfig>,
    #[serde(default)]
    pub enter_and_leave_loop_event: bool,
    #[serde(default)]
    pub basic_block_event: bool,
    #[serde(default)]
    pub quad_event: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EventConfig {
    pub event: EventKind,
    #[serde(default)]
    loc: bool,
    #[serde(default)]
    thr: bool,
    #[serde(default)]
    obj: bool,
    #[serde(default)]
    base_obj: bool,
    #[serde(default)]
    fld: bool,
    #[serde(default)]
    idx: bool,
    #[serde(default)]
    bef: bool,
    #[serde(default)]
    aft: bool,
}

impl EventConfig {
    pub fn new(event: EventKind, req: EventRequest) -> Self {
        Self {
            event,
            loc: req.loc,
            thr: req.thr,
            obj: req.obj,
            base_obj: req.base_obj,
            fld: req.fld,
            idx: req.idx,
            bef: req.bef,
            aft: req.aft,
        }
    }

    pub fn request(&self) -> EventRequest {
        EventRequest {
            loc: self.loc,
            thr: self.thr,
            obj: self.obj,
            base_obj: self.base_obj,
            fld: self.fld,
            idx: self.idx,
            bef: self.bef,
            aft: self.aft,
        }
    }
}

impl FromStr for EventConfig {
    type Err = anyhow::Error;

    // Format is
    // <EVENT>
    // <EVENT>:<flag>,<flag>,...
    //
    // e.g. NEW:loc,thr,obj,bef,aft
    fn from_str(s: &str) -> Result<Self> {
        let (name, flags) = match s.split_once(':') {
            Some((name, flags)) => (name, flags),
            None => (s, ""),
        };
        let event = EventKind::from_str(name.trim())
            .map_err(|_| anyhow::anyhow!("Invalid event type: {}", name))?;
        let mut req = EventRequest::new();
        for flag in flags.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            req = match flag {
                "loc" => req.loc(),
                "thr" => req.thr(),
                "obj" => req.obj(),
                "base_obj" => req.base_obj(),
                "fld" => req.fld(),
                "idx" => req.idx(),
                "bef" => req.bef(),
                "aft" => req.aft(),
                _ => return Err(anyhow::anyhow!("Invalid flag {} for event {}", flag, name)),
            };
        }
        Ok(EventConfig::new(event, req))
    }
}

impl SchemeConfig {
    pub fn from_json(buf: &str) -> Result<Self> {
        let config: SchemeConfig = serde_json::from_str(buf)?;
        Ok(config)
    }

    pub fn load(config: &Path) -> Result<Self> {
        let buf = fs::read_to_string(config)
            .with_context(|| format!("Failed to read config {}", config.display()))?;
        Self::from_json(&buf).with_context(|| format!("Invalid config {}", config.display()))
    }

    pub fn add_event(&mut self, event: EventConfig) {
        self.events.push(event);
    }

    /// Where the scheme should be saved, if the config names a file.
    pub fn scheme_file(&self) -> Option<&Path> {
        self.instr_scheme_file.as_deref()
    }

    /// Apply every configured event and toggle to a fresh scheme.
    pub fn build_scheme(&self) -> Result<InstrScheme> {
        let mut scheme = InstrScheme::new();
        for event in self.events.iter() {
            let req = event.request();
            if event.event.has_before_after() && !req.bef && !req.aft {
                tracing::warn!(
                    "{} has neither bef nor aft set, it will not be instrumented",
                    event.event
                );
            }
            scheme
                .configure(event.event, req)
                .with_context(|| format!("Invalid configuration for {}", event.event))?;
        }
        if self.enter_and_leave_loop_event {
            scheme.set_enter_and_leave_loop_event();
        }
        if self.basic_block_event {
            scheme.set_basic_block_event();
        }
        if self.quad_event {
            scheme.set_quad_event();
        }
        Ok(scheme)
    }
}
