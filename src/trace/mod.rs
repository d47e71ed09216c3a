//! Shared event layout types.
//!
//! These types are used by both the instrumentor (which emits records) and
//! the trace reader (which parses them). Keeping them in one place is what
//! keeps the two sides format-compatible.
//!
//! # Module Organization
//!
//! - [`kinds`]: The closed set of event kinds
//! - [`format`]: Per-kind record format and size accounting
//! - [`layout`]: Positional field layout of a record
//! - [`constants`]: Shared constants (field width, config key)

pub mod constants;
pub mod format;
pub mod kinds;
pub mod layout;

// Re-export commonly used types
pub use constants::*;
pub use format::{EventFormat, FormatFlags};
pub use kinds::EventKind;
pub use layout::{FieldKind, FieldSlot, RecordLayout};
