//! Error types for building and persisting instrumentation schemes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::scheme::RequestFlag;
use crate::trace::EventKind;

/// Errors raised while configuring, saving or loading a scheme.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// The request asked for a field the event kind cannot carry.
    #[error("{kind} events cannot carry the {flag} flag")]
    UnsupportedField { kind: EventKind, flag: RequestFlag },

    /// A NEW event promising an object id before allocation without the
    /// after-record that supplies it.
    #[error("NEW events with an object id before allocation also require: {}", missing.join(", "))]
    IncoherentNewEvent { missing: Vec<&'static str> },

    /// Reading or writing the scheme file failed.
    #[error("failed to persist instrumentation scheme at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

/// Underlying cause of a [`SchemeError::Persistence`].
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Decoded fine but doesn't describe a valid scheme.
    #[error("malformed scheme: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, SchemeError>;
