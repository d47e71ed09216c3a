//! The instrumentation scheme.
//!
//! An [`InstrScheme`] holds one [`EventFormat`] per [`EventKind`] plus three
//! coarse mode toggles. It is built once during setup through the per-kind
//! configuration operations, optionally saved, and then read by both the
//! instrumentor and the trace reader.
//!
//! # Example
//!
//! ```
//! use instrscheme::{EventKind, EventRequest, InstrScheme};
//!
//! let mut scheme = InstrScheme::new();
//! scheme.set_enter_method_event(EventRequest::new().loc())?;
//! scheme.set_leave_method_event(EventRequest::new().thr())?;
//!
//! assert!(scheme.needs_method_map());
//! assert_eq!(scheme[EventKind::LeaveMethod].size(), 4);
//! # Ok::<(), instrscheme::SchemeError>(())
//! ```

mod persist;
mod queries;
mod request;

use std::ops::Index;

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{Result, SchemeError};
use crate::trace::{EventFormat, EventKind, FieldKind, RecordLayout};

pub use queries::AuxMap;
pub use request::{accepted_flags, EventRequest, RequestFlag};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrScheme {
    events: [EventFormat; EventKind::COUNT],
    has_enter_and_leave_loop_event: bool,
    has_basic_block_event: bool,
    has_quad_event: bool,
}

impl Default for InstrScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<EventKind> for InstrScheme {
    type Output = EventFormat;

    fn index(&self, kind: EventKind) -> &EventFormat {
        &self.events[kind.ordinal()]
    }
}

impl InstrScheme {
    /// Create a scheme with every event kind absent and all toggles off.
    pub fn new() -> Self {
        Self {
            events: std::array::from_fn(|_| EventFormat::new()),
            has_enter_and_leave_loop_event: false,
            has_basic_block_event: false,
            has_quad_event: false,
        }
    }

    pub fn event(&self, kind: EventKind) -> &EventFormat {
        &self[kind]
    }

    /// All kinds with their formats, in ordinal order.
    pub fn events(&self) -> impl Iterator<Item = (EventKind, &EventFormat)> + '_ {
        EventKind::iter().map(move |kind| (kind, &self[kind]))
    }

    /// Kinds that will actually be emitted.
    pub fn present_events(&self) -> impl Iterator<Item = (EventKind, &EventFormat)> + '_ {
        self.events().filter(|(_, format)| format.present())
    }

    /// Record layout for `kind`, labelling the shared slot as a field
    /// reference or an array index depending on the kind.
    pub fn layout(&self, kind: EventKind) -> RecordLayout {
        let extra = if kind.is_array_access() {
            FieldKind::Index
        } else {
            FieldKind::Field
        };
        self[kind].layout(extra)
    }

    /// Apply `req` to `kind`.
    ///
    /// The whole request is validated before anything is changed, so an
    /// error leaves the scheme exactly as it was.
    pub fn configure(&mut self, kind: EventKind, req: EventRequest) -> Result<()> {
        validate(kind, &req, &self[kind])?;

        if kind.has_before_after() && !req.bef && !req.aft {
            tracing::debug!("{} requested with neither bef nor aft, leaving it absent", kind);
            return Ok(());
        }

        let e = &mut self.events[kind.ordinal()];
        e.set_present();
        if req.loc {
            e.set_loc();
        }
        if req.thr {
            e.set_thr();
        }
        if req.base_obj {
            e.set_base_obj();
        }
        if req.fld {
            e.set_fld();
        }
        if req.idx {
            e.set_idx();
        }
        if req.obj {
            e.set_obj();
        }
        if req.bef {
            e.set_bef();
        }
        if req.aft {
            e.set_aft();
        }
        tracing::debug!("configured {}: {} bytes per record", kind, e.size());
        Ok(())
    }

    pub fn set_enter_main_method_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::EnterMainMethod, req)
    }

    pub fn set_enter_method_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::EnterMethod, req)
    }

    pub fn set_leave_method_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::LeaveMethod, req)
    }

    /// Method call events. A no-op unless `bef` or `aft` is requested.
    pub fn set_method_call_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::MethodCall, req)
    }

    /// Object allocation events. A no-op unless `bef` or `aft` is requested.
    ///
    /// The object id is only known once allocation has finished, so a
    /// before-record carrying it needs the matching after-record (and the
    /// location and thread to pair them up) to be resolvable later. A request
    /// with `bef` and `obj` but without `aft`, `loc` and `thr` is rejected with
    /// [`SchemeError::IncoherentNewEvent`], whatever earlier calls enabled.
    /// Ending up with `bef` and `obj` across several calls is held to the
    /// same rule.
    pub fn set_new_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::New, req)
    }

    pub fn set_new_array_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::NewArray, req)
    }

    pub fn set_getstatic_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::GetstaticPrimitive, req)
    }

    pub fn set_getstatic_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::GetstaticReference, req)
    }

    pub fn set_putstatic_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::PutstaticPrimitive, req)
    }

    pub fn set_putstatic_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::PutstaticReference, req)
    }

    pub fn set_getfield_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::GetfieldPrimitive, req)
    }

    pub fn set_getfield_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::GetfieldReference, req)
    }

    pub fn set_putfield_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::PutfieldPrimitive, req)
    }

    pub fn set_putfield_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::PutfieldReference, req)
    }

    pub fn set_aload_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::AloadPrimitive, req)
    }

    pub fn set_aload_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::AloadReference, req)
    }

    pub fn set_astore_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::AstorePrimitive, req)
    }

    pub fn set_astore_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::AstoreReference, req)
    }

    pub fn set_return_primitive_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ReturnPrimitive, req)
    }

    pub fn set_return_reference_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ReturnReference, req)
    }

    pub fn set_explicit_throw_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ExplicitThrow, req)
    }

    pub fn set_implicit_throw_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ImplicitThrow, req)
    }

    pub fn set_thread_start_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ThreadStart, req)
    }

    pub fn set_thread_join_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ThreadJoin, req)
    }

    pub fn set_acquire_lock_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::AcquireLock, req)
    }

    pub fn set_release_lock_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::ReleaseLock, req)
    }

    pub fn set_wait_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::Wait, req)
    }

    pub fn set_notify_event(&mut self, req: EventRequest) -> Result<()> {
        self.configure(EventKind::Notify, req)
    }

    pub fn set_enter_and_leave_loop_event(&mut self) {
        tracing::debug!("enabling loop enter/leave events");
        self.has_enter_and_leave_loop_event = true;
    }

    pub fn has_enter_and_leave_loop_event(&self) -> bool {
        self.has_enter_and_leave_loop_event
    }

    pub fn set_basic_block_event(&mut self) {
        tracing::debug!("enabling basic block events");
        self.has_basic_block_event = true;
    }

    pub fn has_basic_block_event(&self) -> bool {
        self.has_basic_block_event
    }

    pub fn set_quad_event(&mut self) {
        tracing::debug!("enabling quad events");
        self.has_quad_event = true;
    }

    pub fn has_quad_event(&self) -> bool {
        self.has_quad_event
    }
}

// A request asking for `bef` and `obj` must itself carry `aft`, `loc` and
// `thr`. Any other applying request is checked on top of what is already
// configured for `kind`, so splitting a NEW configuration over several calls
// can't dodge the allocation rule either.
fn validate(kind: EventKind, req: &EventRequest, current: &EventFormat) -> Result<()> {
    let accepted = accepted_flags(kind);
    if let Some(flag) = req.flags().find(|flag| !accepted.contains(flag)) {
        return Err(SchemeError::UnsupportedField { kind, flag });
    }

    let per_call = req.bef && req.obj;
    let applies = req.bef || req.aft;
    let bef = req.bef || current.is_bef();
    let obj = req.obj || current.has_obj();
    if kind == EventKind::New && applies && bef && obj {
        let set = |requested: bool, configured: bool| requested || (!per_call && configured);
        let missing: Vec<&'static str> = [
            (set(req.aft, current.is_aft()), "aft"),
            (set(req.loc, current.has_loc()), "loc"),
            (set(req.thr, current.has_thr()), "thr"),
        ]
        .into_iter()
        .filter(|(set, _)| !set)
        .map(|(_, name)| name)
        .collect();
        if !missing.is_empty() {
            return Err(SchemeError::IncoherentNewEvent { missing });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{MAX_EVENT_SIZE, MAX_FIELDS_PER_EVENT};
    use proptest::prelude::*;

    #[test]
    fn test_new_scheme_is_empty() {
        let scheme = InstrScheme::new();
        assert_eq!(scheme.events().count(), EventKind::COUNT);
        for (_, format) in scheme.events() {
            assert!(!format.present());
            assert_eq!(format.size(), 0);
        }
        assert_eq!(scheme.present_events().count(), 0);
        assert!(!scheme.has_enter_and_leave_loop_event());
        assert!(!scheme.has_basic_block_event());
        assert!(!scheme.has_quad_event());
    }

    #[test]
    fn test_enter_leave_method_scenario() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_enter_method_event(EventRequest::new().loc())
            .unwrap();
        scheme
            .set_leave_method_event(EventRequest::new().thr())
            .unwrap();
        assert!(scheme.needs_method_map());
        assert_eq!(scheme[EventKind::EnterMethod].size(), 4);
        assert!(scheme[EventKind::EnterMethod].has_loc());
        assert_eq!(scheme[EventKind::LeaveMethod].size(), 4);
        assert!(scheme[EventKind::LeaveMethod].has_thr());
        assert!(!scheme[EventKind::LeaveMethod].has_loc());
    }

    #[test]
    fn test_present_without_fields() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_enter_main_method_event(EventRequest::new())
            .unwrap();
        assert!(scheme[EventKind::EnterMainMethod].present());
        assert_eq!(scheme[EventKind::EnterMainMethod].size(), 0);
    }

    #[test]
    fn test_new_event_without_bef_or_aft_is_absent() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_new_event(EventRequest::new().loc().thr().obj())
            .unwrap();
        assert!(!scheme[EventKind::New].present());
        assert_eq!(scheme[EventKind::New].size(), 0);

        scheme
            .set_method_call_event(EventRequest::new().loc())
            .unwrap();
        assert!(!scheme[EventKind::MethodCall].present());
    }

    #[test]
    fn test_new_event_before_with_object() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_new_event(EventRequest::new().loc().thr().obj().bef().aft())
            .unwrap();
        let e = &scheme[EventKind::New];
        assert!(e.present());
        assert!(e.is_bef());
        assert!(e.is_aft());
        assert_eq!(e.size(), 12);
        assert!(scheme.needs_trace_transform());
    }

    #[test]
    fn test_new_event_before_with_object_requires_after() {
        let mut scheme = InstrScheme::new();
        let err = scheme
            .set_new_event(EventRequest::new().loc().thr().obj().bef())
            .unwrap_err();
        match err {
            SchemeError::IncoherentNewEvent { missing } => assert_eq!(missing, vec!["aft"]),
            other => panic!("unexpected error {other}"),
        }
        // Nothing was applied
        assert_eq!(scheme, InstrScheme::new());

        let err = scheme
            .set_new_event(EventRequest::new().obj().bef())
            .unwrap_err();
        match err {
            SchemeError::IncoherentNewEvent { missing } => {
                assert_eq!(missing, vec!["aft", "loc", "thr"])
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_new_event_before_only_is_fine_without_object() {
        let mut scheme = InstrScheme::new();
        scheme.set_new_event(EventRequest::new().bef()).unwrap();
        assert!(scheme[EventKind::New].present());
        assert!(!scheme.needs_trace_transform());
    }

    #[test]
    fn test_new_event_rule_spans_calls() {
        let mut scheme = InstrScheme::new();
        scheme.set_new_event(EventRequest::new().bef()).unwrap();
        let err = scheme
            .set_new_event(EventRequest::new().obj().aft())
            .unwrap_err();
        match err {
            SchemeError::IncoherentNewEvent { missing } => assert_eq!(missing, vec!["loc", "thr"]),
            other => panic!("unexpected error {other}"),
        }
        assert!(!scheme[EventKind::New].has_obj());

        scheme
            .set_new_event(EventRequest::new().loc().thr().obj().aft())
            .unwrap();
        assert!(scheme.needs_trace_transform());
    }

    #[test]
    fn test_new_event_before_with_object_ignores_earlier_calls() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_new_event(EventRequest::new().aft().thr())
            .unwrap();
        let before = scheme.clone();

        let err = scheme
            .set_new_event(EventRequest::new().bef().obj().aft().loc())
            .unwrap_err();
        match err {
            SchemeError::IncoherentNewEvent { missing } => assert_eq!(missing, vec!["thr"]),
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(scheme, before);

        scheme
            .set_new_event(EventRequest::new().bef().obj().aft().loc().thr())
            .unwrap();
        assert!(scheme.needs_trace_transform());
        assert_eq!(scheme[EventKind::New].size(), 12);
    }

    #[test]
    fn test_unsupported_field() {
        let mut scheme = InstrScheme::new();
        let err = scheme
            .set_getfield_primitive_event(EventRequest::new().loc().obj())
            .unwrap_err();
        assert!(matches!(
            err,
            SchemeError::UnsupportedField {
                kind: EventKind::GetfieldPrimitive,
                flag: RequestFlag::Obj
            }
        ));
        assert!(!scheme[EventKind::GetfieldPrimitive].present());

        assert!(scheme
            .set_aload_primitive_event(EventRequest::new().fld())
            .is_err());
        assert!(scheme
            .set_getstatic_reference_event(EventRequest::new().idx())
            .is_err());
        assert!(scheme
            .set_implicit_throw_event(EventRequest::new().loc())
            .is_err());
        assert!(scheme
            .set_new_array_event(EventRequest::new().aft())
            .is_err());
        assert_eq!(
            scheme
                .set_enter_main_method_event(EventRequest::new().loc())
                .unwrap_err()
                .to_string(),
            "ENTER_MAIN_METHOD events cannot carry the loc flag"
        );
    }

    #[test]
    fn test_reference_access_carries_object() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_putfield_reference_event(EventRequest::new().loc().thr().base_obj().fld().obj())
            .unwrap();
        assert_eq!(scheme[EventKind::PutfieldReference].size(), 20);
        scheme
            .set_astore_reference_event(EventRequest::new().base_obj().idx().obj())
            .unwrap();
        let e = &scheme[EventKind::AstoreReference];
        assert!(e.has_idx());
        assert_eq!(e.size(), 12);
    }

    #[test]
    fn test_repeated_configuration_accumulates() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_acquire_lock_event(EventRequest::new().loc())
            .unwrap();
        scheme
            .set_acquire_lock_event(EventRequest::new().thr())
            .unwrap();
        scheme
            .set_acquire_lock_event(EventRequest::new())
            .unwrap();
        let e = &scheme[EventKind::AcquireLock];
        assert!(e.has_loc());
        assert!(e.has_thr());
        assert_eq!(e.size(), 8);
    }

    #[test]
    fn test_layout_labels_extra_slot() {
        let mut scheme = InstrScheme::new();
        scheme
            .set_aload_primitive_event(EventRequest::new().thr().idx())
            .unwrap();
        scheme
            .set_getstatic_primitive_event(EventRequest::new().fld())
            .unwrap();
        let aload = scheme.layout(EventKind::AloadPrimitive);
        assert_eq!(aload.offset_of(FieldKind::Index), Some(4));
        assert_eq!(aload.offset_of(FieldKind::Field), None);
        let getstatic = scheme.layout(EventKind::GetstaticPrimitive);
        assert_eq!(getstatic.offset_of(FieldKind::Field), Some(0));
    }

    type Setter = fn(&mut InstrScheme, EventRequest) -> Result<()>;

    #[test]
    fn test_each_setter_configures_its_kind() {
        let setters: [(EventKind, Setter); EventKind::COUNT] = [
            (EventKind::New, InstrScheme::set_new_event),
            (EventKind::NewArray, InstrScheme::set_new_array_event),
            (EventKind::GetstaticPrimitive, InstrScheme::set_getstatic_primitive_event),
            (EventKind::GetstaticReference, InstrScheme::set_getstatic_reference_event),
            (EventKind::PutstaticPrimitive, InstrScheme::set_putstatic_primitive_event),
            (EventKind::PutstaticReference, InstrScheme::set_putstatic_reference_event),
            (EventKind::GetfieldPrimitive, InstrScheme::set_getfield_primitive_event),
            (EventKind::GetfieldReference, InstrScheme::set_getfield_reference_event),
            (EventKind::PutfieldPrimitive, InstrScheme::set_putfield_primitive_event),
            (EventKind::PutfieldReference, InstrScheme::set_putfield_reference_event),
            (EventKind::AloadPrimitive, InstrScheme::set_aload_primitive_event),
            (EventKind::AloadReference, InstrScheme::set_aload_reference_event),
            (EventKind::AstorePrimitive, InstrScheme::set_astore_primitive_event),
            (EventKind::AstoreReference, InstrScheme::set_astore_reference_event),
            (EventKind::MethodCall, InstrScheme::set_method_call_event),
            (EventKind::ReturnPrimitive, InstrScheme::set_return_primitive_event),
            (EventKind::ReturnReference, InstrScheme::set_return_reference_event),
            (EventKind::ExplicitThrow, InstrScheme::set_explicit_throw_event),
            (EventKind::ImplicitThrow, InstrScheme::set_implicit_throw_event),
            (EventKind::EnterMainMethod, InstrScheme::set_enter_main_method_event),
            (EventKind::EnterMethod, InstrScheme::set_enter_method_event),
            (EventKind::LeaveMethod, InstrScheme::set_leave_method_event),
            (EventKind::ThreadStart, InstrScheme::set_thread_start_event),
            (EventKind::ThreadJoin, InstrScheme::set_thread_join_event),
            (EventKind::AcquireLock, InstrScheme::set_acquire_lock_event),
            (EventKind::ReleaseLock, InstrScheme::set_release_lock_event),
            (EventKind::Wait, InstrScheme::set_wait_event),
            (EventKind::Notify, InstrScheme::set_notify_event),
        ];

        let mut covered: Vec<EventKind> = setters.iter().map(|(kind, _)| *kind).collect();
        covered.sort_by_key(|kind| kind.ordinal());
        assert_eq!(covered, EventKind::iter().collect::<Vec<_>>());

        for (kind, set) in setters {
            let req = if kind.has_before_after() {
                EventRequest::new().bef()
            } else {
                EventRequest::new()
            };
            let mut scheme = InstrScheme::new();
            set(&mut scheme, req).unwrap();
            let present: Vec<EventKind> = scheme.present_events().map(|(k, _)| k).collect();
            assert_eq!(present, vec![kind], "setter for {kind}");
        }
    }

    #[test]
    fn test_toggles() {
        let mut scheme = InstrScheme::new();
        scheme.set_enter_and_leave_loop_event();
        scheme.set_basic_block_event();
        scheme.set_quad_event();
        assert!(scheme.has_enter_and_leave_loop_event());
        assert!(scheme.has_basic_block_event());
        assert!(scheme.has_quad_event());
        assert_eq!(scheme.present_events().count(), 0);
    }

    fn arb_kind() -> impl Strategy<Value = EventKind> {
        (0..EventKind::COUNT).prop_map(|i| EventKind::iter().nth(i).unwrap())
    }

    /// Random requests restricted to what `kind` accepts.
    fn arb_accepted_request() -> impl Strategy<Value = (EventKind, EventRequest)> {
        (arb_kind(), any::<[bool; 8]>()).prop_map(|(kind, bits)| {
            let accepted = accepted_flags(kind);
            let mut req = EventRequest::new();
            for (flag, bit) in RequestFlag::iter().zip(bits) {
                if bit && accepted.contains(&flag) {
                    req = match flag {
                        RequestFlag::Loc => req.loc(),
                        RequestFlag::Thr => req.thr(),
                        RequestFlag::Obj => req.obj(),
                        RequestFlag::BaseObj => req.base_obj(),
                        RequestFlag::Fld => req.fld(),
                        RequestFlag::Idx => req.idx(),
                        RequestFlag::Bef => req.bef(),
                        RequestFlag::Aft => req.aft(),
                    };
                }
            }
            (kind, req)
        })
    }

    fn expected_fields(req: &EventRequest) -> u32 {
        [req.loc, req.thr, req.obj, req.base_obj, req.fld || req.idx]
            .iter()
            .filter(|set| **set)
            .count() as u32
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn test_size_is_four_bytes_per_field((kind, req) in arb_accepted_request()) {
            let mut scheme = InstrScheme::new();
            if scheme.configure(kind, req).is_ok() {
                let e = &scheme[kind];
                prop_assert!(e.size() <= MAX_EVENT_SIZE);
                prop_assert!(e.num_fields() <= MAX_FIELDS_PER_EVENT);
                if e.present() {
                    prop_assert_eq!(e.size(), 4 * expected_fields(&req));
                    prop_assert_eq!(e.size(), scheme.layout(kind).size());
                } else {
                    prop_assert_eq!(e.size(), 0);
                    prop_assert!(kind.has_before_after());
                }
            } else {
                prop_assert_eq!(kind, EventKind::New);
                prop_assert_eq!(&scheme, &InstrScheme::new());
            }
        }

        #[test]
        fn test_configuration_is_idempotent((kind, req) in arb_accepted_request()) {
            let mut once = InstrScheme::new();
            let mut twice = InstrScheme::new();
            let first = once.configure(kind, req).is_ok();
            let _ = twice.configure(kind, req);
            let second = twice.configure(kind, req).is_ok();
            prop_assert_eq!(first, second);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_configuration_is_monotonic(
            reqs in proptest::collection::vec(arb_accepted_request(), 1..20)
        ) {
            let mut scheme = InstrScheme::new();
            for (kind, req) in reqs {
                let before = scheme.clone();
                let _ = scheme.configure(kind, req);
                for (k, old) in before.events() {
                    let new = &scheme[k];
                    prop_assert!(new.size() >= old.size());
                    let (o, n) = (old.flags(), new.flags());
                    prop_assert!(!o.present || n.present);
                    prop_assert!(!o.loc || n.loc);
                    prop_assert!(!o.thr || n.thr);
                    prop_assert!(!o.extra || n.extra);
                    prop_assert!(!o.obj || n.obj);
                    prop_assert!(!o.base_obj || n.base_obj);
                    prop_assert!(!o.bef || n.bef);
                    prop_assert!(!o.aft || n.aft);
                }
            }
        }
    }
}
