//! instrscheme - event layout schema shared by an instrumentor and its trace reader.
//!
//! The instrumentor uses an [`InstrScheme`] to decide which program points to
//! rewrite and what bytes each emitted record contains. The trace reader uses
//! the same scheme to know how many bytes each record occupies and how to
//! slice it into fields. Both sides must load the same scheme file.
//!
//! # Modules
//!
//! - [`trace`] - Event kinds, per-kind record formats and layouts
//! - [`scheme`] - The scheme, its configuration operations, queries and persistence
//! - [`events`] - JSON setup config used to build a scheme
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use instrscheme::{EventRequest, InstrScheme};
//!
//! let mut scheme = InstrScheme::new();
//! scheme
//!     .set_new_event(EventRequest::new().loc().thr().obj().bef().aft())
//!     .expect("valid NEW configuration");
//! scheme.save("scheme.json").expect("Failed to save scheme");
//!
//! // In the trace reading process
//! let scheme = InstrScheme::load("scheme.json").expect("Failed to load scheme");
//! assert!(scheme.needs_trace_transform());
//! ```

pub mod error;
pub mod events;
pub mod scheme;
pub mod trace;

// Re-export for convenience
pub use error::{PersistError, SchemeError};
pub use events::{EventConfig, SchemeConfig};
pub use scheme::{accepted_flags, AuxMap, EventRequest, InstrScheme, RequestFlag};
pub use trace::{
    EventFormat, EventKind, FieldKind, RecordLayout, FIELD_WIDTH, INSTR_SCHEME_FILE_KEY,
};
