use super::support::MockContext;
use parseq::factories;
use parseq::{ArgumentError, Context, Priority, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};

#[test]
fn out_of_range_is_rejected_at_construction() {
    assert_eq!(
        Priority::new(MAX_PRIORITY + 1),
        Err(ArgumentError::PriorityOutOfRange {
            attempted: MAX_PRIORITY + 1,
            min: MIN_PRIORITY,
            max: MAX_PRIORITY,
        })
    );
    assert!(Priority::new(MIN_PRIORITY - 1).is_err());
}

#[test]
fn mutable_while_created() {
    let task = factories::value("p", 1_i32);
    assert!(task.set_priority(Priority::MAX).is_ok());
    assert_eq!(task.priority(), Priority::MAX);
}

#[test]
fn rejected_once_scheduled() {
    let task = factories::value("p", 1_i32);
    let ctx = MockContext::new();
    ctx.run(task.erased());

    let result = task.set_priority(Priority::MIN);
    assert_eq!(result, Err(ArgumentError::PriorityNotMutableAfterScheduling));
}

#[test]
fn default_priority_is_zero() {
    let task = factories::value("p", 1_i32);
    assert_eq!(task.priority().get(), DEFAULT_PRIORITY);
}
