use super::support::MockContext;
use parseq::task::TaskState;
use parseq::{factories, Cancellable, Context, Schedulable};

#[test]
fn cancel_before_scheduling_settles_failure() {
    let task = factories::value("v", 1_i32);
    assert!(task.cancel("stop".into()));
    assert_eq!(task.state(), TaskState::Cancelled);
    let outcome = task.promise_handle().peek().unwrap();
    assert!(outcome.unwrap_err().is_cancelled());
}

#[test]
fn second_cancel_is_noop() {
    let task = factories::value("v", 1_i32);
    assert!(task.cancel("first".into()));
    assert!(!task.cancel("second".into()));
}

#[test]
fn cancel_after_completion_is_noop() {
    let task = factories::value("v", 1_i32);
    let ctx = MockContext::new();
    ctx.run(task.erased());
    assert_eq!(task.state(), TaskState::Done);

    assert!(!task.cancel("too late".into()));
    assert_eq!(task.state(), TaskState::Done);
    assert_eq!(task.promise_handle().peek().unwrap().unwrap(), 1);
}
