use super::support::MockContext;
use parseq::trace::RelationshipKind;
use parseq::{factories, Context};

#[test]
fn shallow_trace_reports_terminal_state_and_outcome() {
    let ctx = MockContext::new();
    let task = factories::value("leaf", 41_i32);
    ctx.run(task.erased());

    let shallow = task.shallow_trace();
    assert_eq!(shallow.name.as_ref(), "leaf");
    assert!(shallow.scheduled_at.is_some());
    assert!(shallow.started_at.is_some());
    assert!(shallow.ended_at.is_some());
    assert!(shallow.outcome.is_some());
}

#[test]
fn a_combinator_never_records_its_own_parent_relationship() {
    // `map`'s own bookkeeping only ever adds `Predecessor` — `Parent` is
    // reserved for whatever `Context` eventually dispatches the task.
    let task = factories::value("leaf", 1_i32);
    let mapped = task.map(|v| v + 1);
    for relationship in mapped.relationships() {
        assert_ne!(relationship.kind, RelationshipKind::Parent);
    }
}

#[test]
fn context_run_records_a_parent_edge_for_a_reentrantly_spawned_task() {
    // `flat_map`'s follow-up task is discovered and run from inside the
    // outer `flat_map` task's own dispatch, so the mock context should
    // observe the outer task as the follow-up's parent.
    let ctx = MockContext::new();
    let root = factories::value("x", 10_i32);
    let chained = root.flat_map(|v| factories::value("inner", v + 1));
    ctx.run(chained.erased());

    let trace = chained.trace();
    let parent_edges: Vec<_> = trace
        .edges
        .iter()
        .filter(|(_, kind, _)| *kind == RelationshipKind::Parent)
        .collect();
    assert_eq!(parent_edges.len(), 1);
    let (child_id, _, parent_id) = parent_edges[0];
    assert_eq!(*parent_id, trace.root);
    assert_ne!(*child_id, trace.root);
}

#[test]
fn trace_deduplicates_diamond_shaped_ancestors() {
    let ctx = MockContext::new();
    let root = factories::value("root", 1_i32);
    let left = root.map(|v| v + 1);
    let right = root.map(|v| v + 2);
    let joined = parseq::combinators::par2(left, right);
    ctx.run(joined.erased());

    let trace = joined.trace();
    // joined, left, right, and the single shared `root` node — not two.
    assert_eq!(trace.nodes.len(), 4);
}
