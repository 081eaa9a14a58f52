use super::support::MockContext;
use parseq::{factories, Attempt, Context, Failure};

#[test]
fn with_try_wraps_success() {
    let ctx = MockContext::new();
    let root = factories::value("root", 10_i32);
    let attempted = root.with_try();
    ctx.run(attempted.erased());
    match attempted.promise_handle().peek().unwrap().unwrap() {
        Attempt::Success(v) => assert_eq!(v, 10),
        Attempt::Failed(_) => panic!("expected success"),
    }
}

#[test]
fn with_try_wraps_failure_without_failing_itself() {
    let ctx = MockContext::new();
    let original = Failure::cancelled("boom");
    let original_check = original.clone();
    let root = factories::failure::<i32>("root", original);
    let attempted = root.with_try();
    ctx.run(attempted.erased());
    // with_try's own promise is always `Ok`.
    let attempt = attempted.promise_handle().peek().unwrap().unwrap();
    assert!(!attempt.is_success());
    match attempt.into_result() {
        Err(e) => assert!(e.ptr_eq(&original_check)),
        Ok(_) => panic!("expected failure"),
    }
}
