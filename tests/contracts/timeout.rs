use super::support::MockContext;
use parseq::promise::SettablePromise;
use parseq::task::Task;
use parseq::{factories, Context, Priority};
use std::time::Duration;

#[test]
fn body_wins_when_timer_never_fires() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let wrapped = root.with_timeout(Duration::from_secs(5)).unwrap();
    ctx.run(wrapped.erased());
    assert_eq!(wrapped.promise_handle().peek().unwrap().unwrap(), 1);
}

#[test]
fn timer_wins_when_fired_before_body_settles() {
    let ctx = MockContext::new();

    // A task whose body never settles on its own, so the only way it can
    // reach a terminal outcome is via the timeout wrapper's race.
    let never_settles = SettablePromise::<i32>::new();
    let stalled: Task<i32> = Task::async_task("stalled", Priority::DEFAULT, false, move |_ctx| {
        never_settles.promise()
    });

    let wrapped = stalled.with_timeout(Duration::from_millis(1)).unwrap();
    ctx.run(wrapped.erased());

    // The body hasn't settled yet; the wrapped task is still pending.
    assert!(wrapped.promise_handle().peek().is_none());

    ctx.fire_pending_timers();

    let outcome = wrapped.promise_handle().peek().unwrap();
    assert!(outcome.unwrap_err().is_timeout());
}

#[test]
fn wrap_context_run_rejected_after_run_started() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    ctx.run(root.erased());
    assert!(root.with_timeout(Duration::from_secs(1)).is_err());
}
