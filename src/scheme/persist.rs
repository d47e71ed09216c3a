//! Saving and loading schemes.
//!
//! The file is a JSON document with one entry per event kind, always written
//! in ordinal order:
//!
//! ```text
//! {
//!   "events": [
//!     { "kind": "NEW", "present": true, "loc": true, "thr": true, "extra": false,
//!       "obj": true, "base_obj": false, "bef": true, "aft": true, "size": 12 },
//!     ...
//!   ],
//!   "enter_and_leave_loop_event": false,
//!   "basic_block_event": false,
//!   "quad_event": false
//! }
//! ```
//!
//! Loading replays every entry through [`InstrScheme::configure`] and checks
//! the result matches what was stored, so a file that decodes but describes
//! an impossible scheme is rejected instead of silently producing records
//! the reader can't parse.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use super::{EventRequest, InstrScheme};
use crate::error::{PersistError, Result, SchemeError};
use crate::trace::{EventFormat, EventKind, FormatFlags};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemeFile {
    events: Vec<EventEntry>,
    enter_and_leave_loop_event: bool,
    basic_block_event: bool,
    quad_event: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventEntry {
    kind: EventKind,
    present: bool,
    loc: bool,
    thr: bool,
    extra: bool,
    obj: bool,
    base_obj: bool,
    bef: bool,
    aft: bool,
    size: u32,
}

impl EventEntry {
    fn new(kind: EventKind, format: &EventFormat) -> Self {
        let flags = format.flags();
        Self {
            kind,
            present: flags.present,
            loc: flags.loc,
            thr: flags.thr,
            extra: flags.extra,
            obj: flags.obj,
            base_obj: flags.base_obj,
            bef: flags.bef,
            aft: flags.aft,
            size: format.size(),
        }
    }

    fn flags(&self) -> FormatFlags {
        FormatFlags {
            present: self.present,
            loc: self.loc,
            thr: self.thr,
            extra: self.extra,
            obj: self.obj,
            base_obj: self.base_obj,
            bef: self.bef,
            aft: self.aft,
        }
    }

    fn request(&self) -> EventRequest {
        let array = self.kind.is_array_access();
        EventRequest {
            loc: self.loc,
            thr: self.thr,
            obj: self.obj,
            base_obj: self.base_obj,
            fld: self.extra && !array,
            idx: self.extra && array,
            bef: self.bef,
            aft: self.aft,
        }
    }
}

impl From<&InstrScheme> for SchemeFile {
    fn from(scheme: &InstrScheme) -> Self {
        Self {
            events: scheme
                .events()
                .map(|(kind, format)| EventEntry::new(kind, format))
                .collect(),
            enter_and_leave_loop_event: scheme.has_enter_and_leave_loop_event(),
            basic_block_event: scheme.has_basic_block_event(),
            quad_event: scheme.has_quad_event(),
        }
    }
}

impl TryFrom<SchemeFile> for InstrScheme {
    type Error = PersistError;

    fn try_from(file: SchemeFile) -> std::result::Result<Self, Self::Error> {
        if file.events.len() != EventKind::COUNT {
            return Err(PersistError::Malformed(format!(
                "expected {} events, found {}",
                EventKind::COUNT,
                file.events.len()
            )));
        }

        let mut scheme = InstrScheme::new();
        for (expected, entry) in EventKind::iter().zip(file.events.iter()) {
            if entry.kind != expected {
                return Err(PersistError::Malformed(format!(
                    "expected {} at position {}, found {}",
                    expected,
                    expected.ordinal(),
                    entry.kind
                )));
            }
            if entry.present {
                scheme
                    .configure(entry.kind, entry.request())
                    .map_err(|err| PersistError::Malformed(err.to_string()))?;
            }
            let format = &scheme[entry.kind];
            if format.flags() != entry.flags() {
                return Err(PersistError::Malformed(format!(
                    "{} has an inconsistent set of flags",
                    entry.kind
                )));
            }
            if format.size() != entry.size {
                return Err(PersistError::Malformed(format!(
                    "{} records are {} bytes, file says {}",
                    entry.kind,
                    format.size(),
                    entry.size
                )));
            }
        }

        if file.enter_and_leave_loop_event {
            scheme.set_enter_and_leave_loop_event();
        }
        if file.basic_block_event {
            scheme.set_basic_block_event();
        }
        if file.quad_event {
            scheme.set_quad_event();
        }
        Ok(scheme)
    }
}

impl InstrScheme {
    /// Encode the whole scheme.
    pub fn to_json(&self) -> std::result::Result<String, PersistError> {
        let mut buf = serde_json::to_string_pretty(&SchemeFile::from(self))?;
        buf.push('\n');
        Ok(buf)
    }

    /// Decode a scheme previously produced by [`InstrScheme::to_json`].
    pub fn from_json(buf: &str) -> std::result::Result<Self, PersistError> {
        let file: SchemeFile = serde_json::from_str(buf)?;
        InstrScheme::try_from(file)
    }

    /// Write the scheme to `path`, replacing any existing file.
    ///
    /// A failed save may leave a partially written file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let wrap = |source: PersistError| SchemeError::Persistence {
            path: path.to_path_buf(),
            source,
        };
        let buf = self.to_json().map_err(wrap)?;
        fs::write(path, buf).map_err(|err| wrap(err.into()))?;
        tracing::info!("Saved instrumentation scheme to {}", path.display());
        Ok(())
    }

    /// Read a scheme written by [`InstrScheme::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let wrap = |source: PersistError| SchemeError::Persistence {
            path: path.to_path_buf(),
            source,
        };
        let buf = fs::read_to_string(path).map_err(|err| wrap(err.into()))?;
        let scheme = Self::from_json(&buf).map_err(wrap)?;
        tracing::info!(
            "Loaded instrumentation scheme from {} ({} events present)",
            path.display(),
            scheme.present_events().count()
        );
        Ok(scheme)
    }
}
