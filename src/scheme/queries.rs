//! Derived queries over a configured scheme.
//!
//! The instrumentor uses the `needs_*` queries to decide which auxiliary
//! id-assignment maps to build before rewriting starts.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::InstrScheme;
use crate::trace::EventKind;

/// Auxiliary maps the instrumentor may have to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuxMap {
    /// Method ids, for method enter/leave locations.
    Method,
    /// Allocation sites.
    Heap,
    /// Field, static and array access sites.
    Expr,
    /// Field ids.
    Field,
    /// Invocation sites.
    Invoke,
    /// Program points of quads.
    Quad,
    /// Lock acquire sites.
    Acquire,
    /// Lock release sites.
    Release,
    /// Basic blocks.
    BasicBlock,
}

impl InstrScheme {
    fn any_present(&self, kinds: &[EventKind]) -> bool {
        kinds.iter().any(|kind| self[*kind].present())
    }

    fn any_loc(&self, kinds: &[EventKind]) -> bool {
        kinds.iter().any(|kind| self[*kind].has_loc())
    }

    pub fn has_getstatic_event(&self) -> bool {
        self.any_present(&[EventKind::GetstaticPrimitive, EventKind::GetstaticReference])
    }

    pub fn has_putstatic_event(&self) -> bool {
        self.any_present(&[EventKind::PutstaticPrimitive, EventKind::PutstaticReference])
    }

    pub fn has_getfield_event(&self) -> bool {
        self.any_present(&[EventKind::GetfieldPrimitive, EventKind::GetfieldReference])
    }

    pub fn has_putfield_event(&self) -> bool {
        self.any_present(&[EventKind::PutfieldPrimitive, EventKind::PutfieldReference])
    }

    pub fn has_aload_event(&self) -> bool {
        self.any_present(&[EventKind::AloadPrimitive, EventKind::AloadReference])
    }

    pub fn has_astore_event(&self) -> bool {
        self.any_present(&[EventKind::AstorePrimitive, EventKind::AstoreReference])
    }

    pub fn has_static_event(&self) -> bool {
        self.has_getstatic_event() || self.has_putstatic_event()
    }

    pub fn has_field_event(&self) -> bool {
        self.has_getfield_event() || self.has_putfield_event()
    }

    pub fn has_array_event(&self) -> bool {
        self.has_aload_event() || self.has_astore_event()
    }

    pub fn needs_method_map(&self) -> bool {
        self.any_loc(&[EventKind::EnterMethod, EventKind::LeaveMethod])
    }

    pub fn needs_heap_map(&self) -> bool {
        self.any_loc(&[EventKind::New, EventKind::NewArray])
    }

    pub fn needs_expr_map(&self) -> bool {
        self.any_loc(&EventKind::STATIC_ACCESSES)
            || self.any_loc(&EventKind::FIELD_ACCESSES)
            || self.any_loc(&EventKind::ARRAY_ACCESSES)
    }

    pub fn needs_field_map(&self) -> bool {
        EventKind::STATIC_ACCESSES
            .iter()
            .chain(EventKind::FIELD_ACCESSES.iter())
            .any(|kind| self[*kind].has_fld())
    }

    pub fn needs_invoke_map(&self) -> bool {
        self.any_loc(&[
            EventKind::MethodCall,
            EventKind::ThreadStart,
            EventKind::ThreadJoin,
            EventKind::Wait,
            EventKind::Notify,
        ])
    }

    pub fn needs_quad_map(&self) -> bool {
        self.has_quad_event()
    }

    pub fn needs_acquire_map(&self) -> bool {
        self[EventKind::AcquireLock].has_loc()
    }

    pub fn needs_release_map(&self) -> bool {
        self[EventKind::ReleaseLock].has_loc()
    }

    pub fn needs_basic_block_map(&self) -> bool {
        self.has_basic_block_event()
    }

    /// True when NEW before-records carry a placeholder object id that a
    /// later pass over the trace has to replace with the id from the
    /// matching after-record.
    pub fn needs_trace_transform(&self) -> bool {
        let e = &self[EventKind::New];
        e.is_bef() && e.has_obj()
    }

    pub fn needs_map(&self, map: AuxMap) -> bool {
        match map {
            AuxMap::Method => self.needs_method_map(),
            AuxMap::Heap => self.needs_heap_map(),
            AuxMap::Expr => self.needs_expr_map(),
            AuxMap::Field => self.needs_field_map(),
            AuxMap::Invoke => self.needs_invoke_map(),
            AuxMap::Quad => self.needs_quad_map(),
            AuxMap::Acquire => self.needs_acquire_map(),
            AuxMap::Release => self.needs_release_map(),
            AuxMap::BasicBlock => self.needs_basic_block_map(),
        }
    }

    /// Every map the instrumentor has to build, in declaration order.
    pub fn required_maps(&self) -> Vec<AuxMap> {
        AuxMap::iter().filter(|map| self.needs_map(*map)).collect()
    }
}
