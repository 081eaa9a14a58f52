use super::support::MockContext;
use parseq::{factories, Context};

#[test]
fn and_then_preserves_original_value_when_consumer_succeeds() {
    let ctx = MockContext::new();
    let root = factories::value("root", 5_i32);
    let derived = root.and_then(|v| {
        assert_eq!(*v, 5);
        Ok(())
    });
    ctx.run(derived.erased());
    assert_eq!(derived.promise_handle().peek().unwrap().unwrap(), 5);
}

#[test]
fn and_then_fails_with_consumers_error_discarding_its_return() {
    use parseq::Failure;

    let ctx = MockContext::new();
    let root = factories::value("root", 5_i32);
    let derived = root.and_then(|_v| Err(Failure::cancelled("rejected")));
    ctx.run(derived.erased());
    let observed = derived.promise_handle().peek().unwrap().unwrap_err();
    assert!(!observed.is_panic());
}

#[test]
fn and_then_propagates_upstream_failure_without_running_consumer() {
    use parseq::Failure;

    let ctx = MockContext::new();
    let failure = Failure::cancelled("boom");
    let root = factories::failure::<i32>("root", failure.clone());
    let derived = root.and_then(|_v| panic!("consumer must not run"));
    ctx.run(derived.erased());
    let observed = derived.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&failure));
}

#[test]
fn and_then_task_adopts_next_result_when_upstream_succeeds() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let next = factories::value("next", 99_i32);
    let derived = root.and_then_task(next);
    ctx.run(derived.erased());
    assert_eq!(derived.promise_handle().peek().unwrap().unwrap(), 99);
}

#[test]
fn and_then_task_still_runs_next_when_upstream_fails() {
    use parseq::Failure;

    let ctx = MockContext::new();
    let root = factories::failure::<i32>("root", Failure::cancelled("upstream boom"));
    let next = factories::value("next", 7_i32);
    let derived = root.and_then_task(next);
    ctx.run(derived.erased());
    // next still runs and its result wins, regardless of upstream's outcome.
    assert_eq!(derived.promise_handle().peek().unwrap().unwrap(), 7);
}

#[test]
fn and_then_task_adopts_next_failure_even_when_upstream_succeeds() {
    use parseq::Failure;

    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let next_failure = Failure::cancelled("next boom");
    let next = factories::failure::<i32>("next", next_failure.clone());
    let derived = root.and_then_task(next);
    ctx.run(derived.erased());
    let observed = derived.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&next_failure));
}
