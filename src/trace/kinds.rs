//! The closed set of runtime events an instrumented program can emit.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Every kind of event the instrumentor knows how to emit.
///
/// The declaration order is the ordinal used to lay out the scheme, so new
/// kinds must only ever be appended.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    New,
    #[strum(serialize = "NEWARRAY")]
    #[serde(rename = "NEWARRAY")]
    NewArray,

    GetstaticPrimitive,
    GetstaticReference,
    PutstaticPrimitive,
    PutstaticReference,

    GetfieldPrimitive,
    GetfieldReference,
    PutfieldPrimitive,
    PutfieldReference,

    AloadPrimitive,
    AloadReference,
    AstorePrimitive,
    AstoreReference,

    MethodCall,
    ReturnPrimitive,
    ReturnReference,
    ExplicitThrow,
    ImplicitThrow,

    ThreadStart,
    ThreadJoin,
    AcquireLock,
    ReleaseLock,
    Wait,
    Notify,

    EnterMethod,
    LeaveMethod,

    EnterMainMethod,
}

impl EventKind {
    /// Reads and writes of static fields.
    pub const STATIC_ACCESSES: [EventKind; 4] = [
        EventKind::GetstaticPrimitive,
        EventKind::GetstaticReference,
        EventKind::PutstaticPrimitive,
        EventKind::PutstaticReference,
    ];

    /// Reads and writes of instance fields.
    pub const FIELD_ACCESSES: [EventKind; 4] = [
        EventKind::GetfieldPrimitive,
        EventKind::GetfieldReference,
        EventKind::PutfieldPrimitive,
        EventKind::PutfieldReference,
    ];

    /// Array element loads and stores.
    pub const ARRAY_ACCESSES: [EventKind; 4] = [
        EventKind::AloadPrimitive,
        EventKind::AloadReference,
        EventKind::AstorePrimitive,
        EventKind::AstoreReference,
    ];

    /// Position of this kind in the scheme.
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Canonical upper-snake-case name, e.g. `GETFIELD_PRIMITIVE`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_static_access(self) -> bool {
        Self::STATIC_ACCESSES.contains(&self)
    }

    pub fn is_field_access(self) -> bool {
        Self::FIELD_ACCESSES.contains(&self)
    }

    pub fn is_array_access(self) -> bool {
        Self::ARRAY_ACCESSES.contains(&self)
    }

    /// Static, instance field or array access.
    pub fn is_heap_access(self) -> bool {
        self.is_static_access() || self.is_field_access() || self.is_array_access()
    }

    /// Kinds that can be emitted before and/or after the program point.
    pub fn has_before_after(self) -> bool {
        matches!(self, EventKind::New | EventKind::MethodCall)
    }
}
