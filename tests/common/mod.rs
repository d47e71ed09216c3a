//! Common test utilities for instrscheme integration tests.

use instrscheme::{EventRequest, InstrScheme};

/// A scheme touching every family of event kinds and all three toggles.
#[allow(dead_code)]
pub fn full_scheme() -> InstrScheme {
    let mut scheme = InstrScheme::new();
    let all = EventRequest::new().loc().thr().obj();
    scheme
        .set_new_event(all.bef().aft())
        .expect("NEW with bef+aft is coherent");
    scheme.set_new_array_event(all).unwrap();
    scheme
        .set_getstatic_primitive_event(EventRequest::new().loc().base_obj().fld())
        .unwrap();
    scheme
        .set_getstatic_reference_event(EventRequest::new().fld().obj())
        .unwrap();
    scheme
        .set_putfield_reference_event(EventRequest::new().loc().thr().base_obj().fld().obj())
        .unwrap();
    scheme
        .set_aload_primitive_event(EventRequest::new().thr().base_obj().idx())
        .unwrap();
    scheme
        .set_astore_reference_event(EventRequest::new().idx().obj())
        .unwrap();
    scheme
        .set_method_call_event(EventRequest::new().loc().bef())
        .unwrap();
    scheme
        .set_return_reference_event(EventRequest::new().obj())
        .unwrap();
    scheme
        .set_implicit_throw_event(EventRequest::new().thr().obj())
        .unwrap();
    scheme.set_thread_start_event(all).unwrap();
    scheme.set_acquire_lock_event(all).unwrap();
    scheme
        .set_release_lock_event(EventRequest::new().thr())
        .unwrap();
    scheme
        .set_enter_method_event(EventRequest::new().loc().thr())
        .unwrap();
    scheme
        .set_enter_main_method_event(EventRequest::new().thr())
        .unwrap();
    scheme.set_enter_and_leave_loop_event();
    scheme.set_basic_block_event();
    scheme.set_quad_event();
    scheme
}
