use super::support::MockContext;
use parseq::{factories, Context, Failure};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn side_effect_runs_and_preserves_original_value() {
    let ctx = MockContext::new();
    let ran = Arc::new(AtomicBool::new(false));
    let ran_for_effect = ran.clone();

    let root = factories::value("root", 5_i32);
    let derived = root.with_side_effect(move |value| {
        assert_eq!(*value, 5);
        let ran = ran_for_effect.clone();
        factories::action("effect", parseq::Priority::DEFAULT, true, move || {
            ran.store(true, Ordering::SeqCst);
        })
    });

    ctx.run(derived.erased());
    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(derived.promise_handle().peek().unwrap().unwrap(), 5);
}

#[test]
fn side_effect_never_runs_when_upstream_fails() {
    let ctx = MockContext::new();
    let ran = Arc::new(AtomicBool::new(false));
    let ran_for_effect = ran.clone();

    let root = factories::failure::<i32>("root", Failure::cancelled("boom"));
    let derived = root.with_side_effect(move |_value| {
        let ran = ran_for_effect.clone();
        factories::action("effect", parseq::Priority::DEFAULT, true, move || {
            ran.store(true, Ordering::SeqCst);
        })
    });

    ctx.run(derived.erased());
    assert!(!ran.load(Ordering::SeqCst));
    assert!(derived.promise_handle().peek().unwrap().is_err());
}

#[test]
fn side_effect_relationship_is_recorded() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let derived = root.with_side_effect(|_value| factories::value("effect", ()));
    ctx.run(derived.erased());

    let trace = derived.trace();
    assert_eq!(trace.nodes.len(), 3);
}
