//! Positional layout of an event record on the wire.
//!
//! Fields that are present always appear in the same relative order:
//! location, thread, base object, field-or-index, object. Each is a
//! little-endian `i32` of [`FIELD_WIDTH`] bytes, so offsets follow directly
//! from the order.

use serde::Serialize;
use strum::Display;

use super::constants::FIELD_WIDTH;

/// One optional field of an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Location,
    Thread,
    BaseObject,
    Field,
    Index,
    Object,
}

/// A field together with its byte offset inside the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSlot {
    pub kind: FieldKind,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordLayout {
    slots: Vec<FieldSlot>,
}

impl RecordLayout {
    pub(crate) fn new(fields: Vec<FieldKind>) -> Self {
        let slots = fields
            .into_iter()
            .enumerate()
            .map(|(i, kind)| FieldSlot {
                kind,
                offset: i as u32 * FIELD_WIDTH,
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total record size in bytes.
    pub fn size(&self) -> u32 {
        self.slots.len() as u32 * FIELD_WIDTH
    }

    /// Byte offset of `kind`, or `None` if the record doesn't carry it.
    pub fn offset_of(&self, kind: FieldKind) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.offset)
    }

    /// Read `kind` out of a raw record laid out according to this layout.
    pub fn read_field(&self, record: &[u8], kind: FieldKind) -> Option<i32> {
        let offset = self.offset_of(kind)? as usize;
        let bytes = record.get(offset..offset + FIELD_WIDTH as usize)?;
        Some(i32::from_le_bytes(bytes.try_into().ok()?))
    }
}

impl std::fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.slots.is_empty() {
            return write!(f, "<empty>");
        }
        let parts: Vec<String> = self
            .slots
            .iter()
            .map(|slot| format!("{}@{}", slot.kind, slot.offset))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
