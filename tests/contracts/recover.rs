use super::support::MockContext;
use parseq::{factories, Context, Failure};

#[test]
fn recover_substitutes_value_on_failure() {
    let ctx = MockContext::new();
    let root = factories::failure::<i32>("root", Failure::cancelled("boom"));
    let recovered = root.recover(|_err| 42);
    ctx.run(recovered.erased());
    assert_eq!(recovered.promise_handle().peek().unwrap().unwrap(), 42);
}

#[test]
fn recover_never_runs_on_success() {
    let ctx = MockContext::new();
    let root = factories::value("root", 7_i32);
    let recovered = root.recover(|_err| unreachable!("must not run on success"));
    ctx.run(recovered.erased());
    assert_eq!(recovered.promise_handle().peek().unwrap().unwrap(), 7);
}

#[test]
fn recover_with_can_itself_fail() {
    let ctx = MockContext::new();
    let replacement = Failure::cancelled("still bad");
    let replacement_check = replacement.clone();
    let root = factories::failure::<i32>("root", Failure::cancelled("boom"));
    let recovered = root.recover_with(move |_err| Err(replacement.clone()));
    ctx.run(recovered.erased());
    let observed = recovered.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&replacement_check));
}

#[test]
fn fall_back_to_adopts_fallback_value_on_failure() {
    let ctx = MockContext::new();
    let root = factories::failure::<i32>("root", Failure::cancelled("boom"));
    let fallback = factories::value("fallback", 99_i32);
    let derived = root.fall_back_to(fallback);
    ctx.run(derived.erased());
    assert_eq!(derived.promise_handle().peek().unwrap().unwrap(), 99);
}

#[test]
fn fall_back_to_preserves_original_error_when_fallback_also_fails() {
    let ctx = MockContext::new();
    let original = Failure::cancelled("original");
    let original_check = original.clone();
    let root = factories::failure::<i32>("root", original);
    let fallback = factories::failure::<i32>("fallback", Failure::cancelled("fallback failure"));
    let derived = root.fall_back_to(fallback);
    ctx.run(derived.erased());
    let observed = derived.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&original_check));
}
