//! Per-kind record format: which optional fields an event carries.

use super::constants::FIELD_WIDTH;
use super::layout::{FieldKind, RecordLayout};

/// Format of the records emitted for one event kind.
///
/// All setters are monotonic. A field setter flips its flag the first time it
/// is called and grows the record by [`FIELD_WIDTH`]; later calls are no-ops.
/// Nothing here validates combinations, that is up to the scheme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFormat {
    present: bool,
    has_loc: bool,
    has_thr: bool,
    // Field reference for static/instance field accesses, array index for
    // array accesses. No kind carries both, so one slot backs `has_fld` and
    // `has_idx`.
    extra: bool,
    has_obj: bool,
    has_base_obj: bool,
    is_bef: bool,
    is_aft: bool,
    size: u32,
}

/// Raw flag state, as stored in the scheme file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub present: bool,
    pub loc: bool,
    pub thr: bool,
    pub extra: bool,
    pub obj: bool,
    pub base_obj: bool,
    pub bef: bool,
    pub aft: bool,
}

impl EventFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> FormatFlags {
        FormatFlags {
            present: self.present,
            loc: self.has_loc,
            thr: self.has_thr,
            extra: self.extra,
            obj: self.has_obj,
            base_obj: self.has_base_obj,
            bef: self.is_bef,
            aft: self.is_aft,
        }
    }

    pub fn set_present(&mut self) {
        self.present = true;
    }

    pub fn present(&self) -> bool {
        self.present
    }

    /// Record size in bytes.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn has_loc(&self) -> bool {
        self.has_loc
    }

    pub fn has_thr(&self) -> bool {
        self.has_thr
    }

    pub fn has_fld(&self) -> bool {
        self.extra
    }

    pub fn has_idx(&self) -> bool {
        self.extra
    }

    pub fn has_obj(&self) -> bool {
        self.has_obj
    }

    pub fn has_base_obj(&self) -> bool {
        self.has_base_obj
    }

    pub fn set_bef(&mut self) {
        self.is_bef = true;
    }

    pub fn set_aft(&mut self) {
        self.is_aft = true;
    }

    pub fn is_bef(&self) -> bool {
        self.is_bef
    }

    pub fn is_aft(&self) -> bool {
        self.is_aft
    }

    pub fn set_loc(&mut self) {
        Self::enable(&mut self.has_loc, &mut self.size);
    }

    pub fn set_thr(&mut self) {
        Self::enable(&mut self.has_thr, &mut self.size);
    }

    pub fn set_fld(&mut self) {
        Self::enable(&mut self.extra, &mut self.size);
    }

    pub fn set_idx(&mut self) {
        Self::enable(&mut self.extra, &mut self.size);
    }

    pub fn set_obj(&mut self) {
        Self::enable(&mut self.has_obj, &mut self.size);
    }

    pub fn set_base_obj(&mut self) {
        Self::enable(&mut self.has_base_obj, &mut self.size);
    }

    /// Number of optional fields carried by each record.
    pub fn num_fields(&self) -> usize {
        [
            self.has_loc,
            self.has_thr,
            self.extra,
            self.has_obj,
            self.has_base_obj,
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// Positional layout of the record. `extra` says how to label the
    /// field-or-index slot.
    pub fn layout(&self, extra: FieldKind) -> RecordLayout {
        let mut fields = Vec::with_capacity(self.num_fields());
        if self.has_loc {
            fields.push(FieldKind::Location);
        }
        if self.has_thr {
            fields.push(FieldKind::Thread);
        }
        if self.has_base_obj {
            fields.push(FieldKind::BaseObject);
        }
        if self.extra {
            fields.push(extra);
        }
        if self.has_obj {
            fields.push(FieldKind::Object);
        }
        RecordLayout::new(fields)
    }

    fn enable(flag: &mut bool, size: &mut u32) {
        if !*flag {
            *flag = true;
            *size += FIELD_WIDTH;
        }
    }
}
