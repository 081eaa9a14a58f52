use super::support::MockContext;
use parseq::combinators::{par2, par3, par4};
use parseq::{factories, Context, Failure};

#[test]
fn par2_joins_both_values() {
    let ctx = MockContext::new();
    let a = factories::value("a", 1_i32);
    let b = factories::value("b", "two");
    let joined = par2(a, b);
    ctx.run(joined.erased());
    assert_eq!(joined.promise_handle().peek().unwrap().unwrap(), (1, "two"));
}

#[test]
fn par2_fails_with_first_failure() {
    let ctx = MockContext::new();
    let failure = Failure::cancelled("boom");
    let failure_check = failure.clone();
    let a = factories::failure::<i32>("a", failure);
    let b = factories::value("b", "two");
    let joined = par2(a, b);
    ctx.run(joined.erased());
    let observed = joined.promise_handle().peek().unwrap().unwrap_err();
    assert!(observed.ptr_eq(&failure_check));
}

#[test]
fn par3_flattens_the_tuple() {
    let ctx = MockContext::new();
    let a = factories::value("a", 1_i32);
    let b = factories::value("b", 2_i32);
    let c = factories::value("c", 3_i32);
    let joined = par3(a, b, c);
    ctx.run(joined.erased());
    assert_eq!(joined.promise_handle().peek().unwrap().unwrap(), (1, 2, 3));
}

#[test]
fn par4_flattens_the_tuple() {
    let ctx = MockContext::new();
    let a = factories::value("a", 1_i32);
    let b = factories::value("b", 2_i32);
    let c = factories::value("c", 3_i32);
    let d = factories::value("d", 4_i32);
    let joined = par4(a, b, c, d);
    ctx.run(joined.erased());
    assert_eq!(
        joined.promise_handle().peek().unwrap().unwrap(),
        (1, 2, 3, 4)
    );
}
