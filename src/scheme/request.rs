//! Requests describing which fields an event kind should carry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::trace::EventKind;

/// A single flag of an [`EventRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RequestFlag {
    Loc,
    Thr,
    Obj,
    BaseObj,
    Fld,
    Idx,
    Bef,
    Aft,
}

/// What the caller wants recorded for one event kind.
///
/// Flags left false are simply not applied; a request can never remove a
/// field that an earlier request enabled.
///
/// ```
/// use instrscheme::EventRequest;
///
/// let req = EventRequest::new().loc().thr().obj().bef().aft();
/// assert!(req.obj && req.aft);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventRequest {
    pub loc: bool,
    pub thr: bool,
    pub obj: bool,
    pub base_obj: bool,
    pub fld: bool,
    pub idx: bool,
    pub bef: bool,
    pub aft: bool,
}

impl EventRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loc(mut self) -> Self {
        self.loc = true;
        self
    }

    pub fn thr(mut self) -> Self {
        self.thr = true;
        self
    }

    pub fn obj(mut self) -> Self {
        self.obj = true;
        self
    }

    pub fn base_obj(mut self) -> Self {
        self.base_obj = true;
        self
    }

    pub fn fld(mut self) -> Self {
        self.fld = true;
        self
    }

    pub fn idx(mut self) -> Self {
        self.idx = true;
        self
    }

    pub fn bef(mut self) -> Self {
        self.bef = true;
        self
    }

    pub fn aft(mut self) -> Self {
        self.aft = true;
        self
    }

    pub fn is_set(&self, flag: RequestFlag) -> bool {
        match flag {
            RequestFlag::Loc => self.loc,
            RequestFlag::Thr => self.thr,
            RequestFlag::Obj => self.obj,
            RequestFlag::BaseObj => self.base_obj,
            RequestFlag::Fld => self.fld,
            RequestFlag::Idx => self.idx,
            RequestFlag::Bef => self.bef,
            RequestFlag::Aft => self.aft,
        }
    }

    /// Flags set to true, in declaration order.
    pub fn flags(&self) -> impl Iterator<Item = RequestFlag> + '_ {
        RequestFlag::iter().filter(|flag| self.is_set(*flag))
    }
}

const THR: &[RequestFlag] = &[RequestFlag::Thr];
const LOC_THR: &[RequestFlag] = &[RequestFlag::Loc, RequestFlag::Thr];
const LOC_THR_OBJ: &[RequestFlag] = &[RequestFlag::Loc, RequestFlag::Thr, RequestFlag::Obj];
const THR_OBJ: &[RequestFlag] = &[RequestFlag::Thr, RequestFlag::Obj];
const BEFORE_AFTER: &[RequestFlag] = &[
    RequestFlag::Loc,
    RequestFlag::Thr,
    RequestFlag::Obj,
    RequestFlag::Bef,
    RequestFlag::Aft,
];
const FIELD_PRIMITIVE: &[RequestFlag] = &[
    RequestFlag::Loc,
    RequestFlag::Thr,
    RequestFlag::BaseObj,
    RequestFlag::Fld,
];
const FIELD_REFERENCE: &[RequestFlag] = &[
    RequestFlag::Loc,
    RequestFlag::Thr,
    RequestFlag::BaseObj,
    RequestFlag::Fld,
    RequestFlag::Obj,
];
const ARRAY_PRIMITIVE: &[RequestFlag] = &[
    RequestFlag::Loc,
    RequestFlag::Thr,
    RequestFlag::BaseObj,
    RequestFlag::Idx,
];
const ARRAY_REFERENCE: &[RequestFlag] = &[
    RequestFlag::Loc,
    RequestFlag::Thr,
    RequestFlag::BaseObj,
    RequestFlag::Idx,
    RequestFlag::Obj,
];

/// Flags each event kind is allowed to carry.
pub fn accepted_flags(kind: EventKind) -> &'static [RequestFlag] {
    match kind {
        EventKind::EnterMainMethod => THR,
        EventKind::EnterMethod | EventKind::LeaveMethod | EventKind::ReturnPrimitive => LOC_THR,
        EventKind::New | EventKind::MethodCall => BEFORE_AFTER,
        EventKind::NewArray
        | EventKind::ReturnReference
        | EventKind::ExplicitThrow
        | EventKind::ThreadStart
        | EventKind::ThreadJoin
        | EventKind::AcquireLock
        | EventKind::ReleaseLock
        | EventKind::Wait
        | EventKind::Notify => LOC_THR_OBJ,
        EventKind::ImplicitThrow => THR_OBJ,
        EventKind::GetstaticPrimitive
        | EventKind::PutstaticPrimitive
        | EventKind::GetfieldPrimitive
        | EventKind::PutfieldPrimitive => FIELD_PRIMITIVE,
        EventKind::GetstaticReference
        | EventKind::PutstaticReference
        | EventKind::GetfieldReference
        | EventKind::PutfieldReference => FIELD_REFERENCE,
        EventKind::AloadPrimitive | EventKind::AstorePrimitive => ARRAY_PRIMITIVE,
        EventKind::AloadReference | EventKind::AstoreReference => ARRAY_REFERENCE,
    }
}
