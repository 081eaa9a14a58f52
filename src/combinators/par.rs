//! `par2..par9`: run tasks concurrently and join their results into a tuple,
//! first-failure-wins.
//!
//! # 设计背景（Why）
//! - `par2` is the only arity implemented against [`JoinBarrier`] directly;
//!   `par3..par9` are each one-liners built by pairing `par2` with the next
//!   arity down and flattening with `map` (`par3(a,b,c) =
//!   par2(par2(a,b), c).map(flatten)`). This avoids both a `paste`-generated
//!   macro and eight hand-duplicated full implementations, while still
//!   giving every arity its own named function with its own tuple-shaped
//!   signature.

use super::join::{on_member_failure, JoinBarrier};
use crate::context::Context;
use crate::promise::SettablePromise;
use crate::task::Task;
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;
use spin::Mutex;

/// Run two tasks concurrently; resolve with both values once both succeed,
/// or fail with whichever failure commits first.
pub fn par2<A, B>(a: Task<A>, b: Task<B>) -> Task<(A, B)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
{
    let slot_a: Arc<Mutex<Option<A>>> = Arc::new(Mutex::new(None));
    let slot_b: Arc<Mutex<Option<B>>> = Arc::new(Mutex::new(None));

    let a_for_body = a.clone();
    let b_for_body = b.clone();

    let derived = Task::async_task(
        alloc::format!("par2({}, {})", a.name(), b.name()),
        a.priority().max(b.priority()),
        true,
        move |ctx: Arc<dyn Context>| {
            let settable = SettablePromise::new();
            let promise = settable.promise();
            let barrier = JoinBarrier::new(2);

            let settable_a = settable.clone();
            let barrier_a = barrier.clone();
            let slot_a_for_a = slot_a.clone();
            let slot_b_for_a = slot_b.clone();
            a_for_body.promise_handle().on_complete(move |outcome| match outcome {
                Ok(value) => {
                    *slot_a_for_a.lock() = Some(value);
                    if barrier_a.succeed_one() {
                        let va = slot_a_for_a.lock().take();
                        let vb = slot_b_for_a.lock().take();
                        if let (Some(va), Some(vb)) = (va, vb) {
                            settable_a.done((va, vb));
                        }
                    }
                }
                Err(error) => on_member_failure(&barrier_a, &settable_a, error),
            });

            let settable_b = settable.clone();
            let barrier_b = barrier.clone();
            let slot_a_for_b = slot_a.clone();
            let slot_b_for_b = slot_b.clone();
            b_for_body.promise_handle().on_complete(move |outcome| match outcome {
                Ok(value) => {
                    *slot_b_for_b.lock() = Some(value);
                    if barrier_b.succeed_one() {
                        let va = slot_a_for_b.lock().take();
                        let vb = slot_b_for_b.lock().take();
                        if let (Some(va), Some(vb)) = (va, vb) {
                            settable_b.done((va, vb));
                        }
                    }
                }
                Err(error) => on_member_failure(&barrier_b, &settable_b, error),
            });

            ctx.run(a_for_body.erased());
            ctx.run(b_for_body.erased());
            promise
        },
    );
    derived.add_relationship(RelationshipKind::Predecessor, Arc::new(a.clone()));
    derived.add_relationship(RelationshipKind::Predecessor, Arc::new(b.clone()));
    derived
}

/// Run three tasks concurrently.
pub fn par3<A, B, C>(a: Task<A>, b: Task<B>, c: Task<C>) -> Task<(A, B, C)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
{
    par2(par2(a, b), c).map(|((a, b), c)| (a, b, c))
}

/// Run four tasks concurrently.
pub fn par4<A, B, C, D>(a: Task<A>, b: Task<B>, c: Task<C>, d: Task<D>) -> Task<(A, B, C, D)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
    D: Clone + fmt::Debug + Send + 'static,
{
    par2(par3(a, b, c), d).map(|((a, b, c), d)| (a, b, c, d))
}

/// Run five tasks concurrently.
pub fn par5<A, B, C, D, E>(
    a: Task<A>,
    b: Task<B>,
    c: Task<C>,
    d: Task<D>,
    e: Task<E>,
) -> Task<(A, B, C, D, E)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
    D: Clone + fmt::Debug + Send + 'static,
    E: Clone + fmt::Debug + Send + 'static,
{
    par2(par4(a, b, c, d), e).map(|((a, b, c, d), e)| (a, b, c, d, e))
}

/// Run six tasks concurrently.
pub fn par6<A, B, C, D, E, F>(
    a: Task<A>,
    b: Task<B>,
    c: Task<C>,
    d: Task<D>,
    e: Task<E>,
    f: Task<F>,
) -> Task<(A, B, C, D, E, F)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
    D: Clone + fmt::Debug + Send + 'static,
    E: Clone + fmt::Debug + Send + 'static,
    F: Clone + fmt::Debug + Send + 'static,
{
    par2(par5(a, b, c, d, e), f).map(|((a, b, c, d, e), f)| (a, b, c, d, e, f))
}

/// Run seven tasks concurrently.
pub fn par7<A, B, C, D, E, F, G>(
    a: Task<A>,
    b: Task<B>,
    c: Task<C>,
    d: Task<D>,
    e: Task<E>,
    f: Task<F>,
    g: Task<G>,
) -> Task<(A, B, C, D, E, F, G)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
    D: Clone + fmt::Debug + Send + 'static,
    E: Clone + fmt::Debug + Send + 'static,
    F: Clone + fmt::Debug + Send + 'static,
    G: Clone + fmt::Debug + Send + 'static,
{
    par2(par6(a, b, c, d, e, f), g).map(|((a, b, c, d, e, f), g)| (a, b, c, d, e, f, g))
}

/// Run eight tasks concurrently.
pub fn par8<A, B, C, D, E, F, G, H>(
    a: Task<A>,
    b: Task<B>,
    c: Task<C>,
    d: Task<D>,
    e: Task<E>,
    f: Task<F>,
    g: Task<G>,
    h: Task<H>,
) -> Task<(A, B, C, D, E, F, G, H)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
    D: Clone + fmt::Debug + Send + 'static,
    E: Clone + fmt::Debug + Send + 'static,
    F: Clone + fmt::Debug + Send + 'static,
    G: Clone + fmt::Debug + Send + 'static,
    H: Clone + fmt::Debug + Send + 'static,
{
    par2(par7(a, b, c, d, e, f, g), h).map(|((a, b, c, d, e, f, g), h)| (a, b, c, d, e, f, g, h))
}

/// Run nine tasks concurrently.
pub fn par9<A, B, C, D, E, F, G, H, I>(
    a: Task<A>,
    b: Task<B>,
    c: Task<C>,
    d: Task<D>,
    e: Task<E>,
    f: Task<F>,
    g: Task<G>,
    h: Task<H>,
    i: Task<I>,
) -> Task<(A, B, C, D, E, F, G, H, I)>
where
    A: Clone + fmt::Debug + Send + 'static,
    B: Clone + fmt::Debug + Send + 'static,
    C: Clone + fmt::Debug + Send + 'static,
    D: Clone + fmt::Debug + Send + 'static,
    E: Clone + fmt::Debug + Send + 'static,
    F: Clone + fmt::Debug + Send + 'static,
    G: Clone + fmt::Debug + Send + 'static,
    H: Clone + fmt::Debug + Send + 'static,
    I: Clone + fmt::Debug + Send + 'static,
{
    par2(par8(a, b, c, d, e, f, g, h), i)
        .map(|((a, b, c, d, e, f, g, h), i)| (a, b, c, d, e, f, g, h, i))
}
