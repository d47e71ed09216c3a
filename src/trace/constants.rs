//! Shared constants for the event layout schema.
//!
//! Both the instrumentor (producer) and the trace reader (consumer) size
//! records with these values, so they must never change independently.

/// Configuration key naming the persisted scheme file.
pub const INSTR_SCHEME_FILE_KEY: &str = "instr_scheme_file";

/// Width in bytes of every optional field in an event record.
pub const FIELD_WIDTH: u32 = 4;

/// Number of optional field slots a record can carry
/// (location, thread, base object, field-or-index, object).
pub const MAX_FIELDS_PER_EVENT: usize = 5;

/// Largest record any event kind can produce.
pub const MAX_EVENT_SIZE: u32 = FIELD_WIDTH * MAX_FIELDS_PER_EVENT as u32;
