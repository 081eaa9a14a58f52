use super::support::MockContext;
use parseq::{factories, Context};

#[test]
fn map_transforms_value() {
    let ctx = MockContext::new();
    let root = factories::value("root", 2_i32);
    let mapped = root.map(|v| v * 10);
    ctx.run(mapped.erased());
    assert_eq!(mapped.promise_handle().peek().unwrap().unwrap(), 20);
}

#[test]
fn map_chain_fuses_through_listeners() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let chained = root.map(|v| v + 1).map(|v| v * 2).map(|v| v - 3);
    ctx.run(chained.erased());
    // (1 + 1) * 2 - 3 == 1
    assert_eq!(chained.promise_handle().peek().unwrap().unwrap(), 1);
}

#[test]
fn map_propagates_upstream_failure_unchanged() {
    use parseq::Failure;

    let ctx = MockContext::new();
    let failure = Failure::cancelled("boom");
    let root = factories::failure::<i32>("root", failure.clone());
    let mapped = root.map(|v| v + 1);
    ctx.run(mapped.erased());
    let observed = mapped.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&failure));
}

#[test]
fn map_panic_becomes_failure() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let mapped = root.map(|_v| -> i32 { panic!("nope") });
    ctx.run(mapped.erased());
    let observed = mapped.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.is_panic());
}

#[test]
fn flat_map_chains_into_follow_up_task() {
    let ctx = MockContext::new();
    let root = factories::value("root", 3_i32);
    let chained = root.flat_map(|v| factories::value("inner", v * v));
    ctx.run(chained.erased());
    assert_eq!(chained.promise_handle().peek().unwrap().unwrap(), 9);
}

#[test]
fn flat_map_propagates_inner_task_failure() {
    use parseq::Failure;

    let ctx = MockContext::new();
    let inner_failure = Failure::cancelled("inner boom");
    let inner_failure_for_check = inner_failure.clone();
    let root = factories::value("root", 1_i32);
    let chained = root.flat_map(move |_v| factories::failure::<i32>("inner", inner_failure.clone()));
    ctx.run(chained.erased());
    let observed = chained.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&inner_failure_for_check));
}

#[test]
fn flat_map_records_dynamic_predecessor_relationship() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let chained = root.flat_map(|v| factories::value("inner", v + 1));
    ctx.run(chained.erased());

    let trace = chained.trace();
    // root + the dynamically-discovered inner task, both reachable.
    assert_eq!(trace.nodes.len(), 3);
}
