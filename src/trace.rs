//! The structured execution-trace model: [`ShallowTrace`], [`Trace`], and the
//! [`RelationshipKind`] edges that connect tasks into a traceable graph.
//!
//! # 设计背景（Why）
//! - Edges are stored on one side only, walking an explicit reference to
//!   reach the other, rather than keeping bidirectional owning pointers that
//!   would make a DAG of `Arc`s hard to reason about. A
//!   [`Task`](crate::Task) records most of its own edges (predecessors,
//!   timers, …) as it is constructed; its `Parent` edge is the one
//!   exception, recorded later by `context_run` from whatever the
//!   dispatching `Context` passes in, since only the `Context` knows which
//!   task's execution spawned this one.
//! - [`TraceNode`] is the minimal, type-erased surface `Trace::of` needs to
//!   walk the graph without knowing each task's value type — the same kind
//!   of erasure a scheduling surface needs to stay object-safe across
//!   heterogeneous payloads.

use crate::time::MonotonicInstant;
use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Process-wide unique task identity, used only to deduplicate nodes while
/// walking a [`Trace`] — it carries no meaning outside a single process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TaskId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Mirrors [`crate::task::TaskState`] without requiring callers to depend on
/// the task module directly; kept as a distinct type since a trace is a
/// read-only snapshot, not a live handle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TraceState {
    Created,
    Scheduled,
    Running,
    Done,
    Failed,
    Cancelled,
}

/// The outcome summary carried by a terminal [`ShallowTrace`].
///
/// # 风险提示（Trade-offs）
/// - Summaries are formatted once (via `Debug`) and capped in length so a
///   large value can't balloon a trace dump the way an uncapped log field
///   would — the same low-cardinality-attributes discipline this crate's
///   `observability` module follows for everything it emits.
#[derive(Clone, Debug)]
pub enum OutcomeSummary {
    Value(String),
    Error(String),
}

const SUMMARY_CAP: usize = 256;

pub(crate) fn summarize(debug: &dyn fmt::Debug) -> String {
    let full = alloc::format!("{debug:?}");
    if full.len() > SUMMARY_CAP {
        let mut truncated: String = full.chars().take(SUMMARY_CAP).collect();
        truncated.push('…');
        truncated
    } else {
        full
    }
}

/// An immutable snapshot of one task's trace-relevant state at the moment it
/// was taken.
#[derive(Clone, Debug)]
pub struct ShallowTrace {
    pub id: TaskId,
    pub name: Cow<'static, str>,
    pub state: TraceState,
    pub scheduled_at: Option<MonotonicInstant>,
    pub started_at: Option<MonotonicInstant>,
    pub ended_at: Option<MonotonicInstant>,
    pub outcome: Option<OutcomeSummary>,
    pub system_hidden: bool,
}

/// The kind of edge a task records toward another task it relates to.
///
/// # 契约说明（What）
/// - `Parent` is contributed by the dispatching `Context`, not by a
///   combinator: `Schedulable::context_run` records it from the `parent`
///   argument the `Context` passes at dispatch time. Every other variant is
///   recorded by the combinator that derives the task carrying it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RelationshipKind {
    Parent,
    Predecessor,
    SuccessorOfType,
    Timer,
    PotentialParent,
    SideEffectParent,
}

/// One edge in the relationship graph: this task relates to `other` via
/// `kind`.
#[derive(Clone)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub other: Arc<dyn TraceNode>,
}

/// Minimal, type-erased surface a task exposes to the trace walker.
///
/// # 设计背景（Why）
/// - Object-safe so `Relationship::other` can point at a `Task<R>` for any
///   `R` without `Trace` itself becoming generic.
pub trait TraceNode: Send + Sync {
    fn task_id(&self) -> TaskId;
    fn shallow_trace(&self) -> ShallowTrace;
    fn relationships(&self) -> Vec<Relationship>;
}

/// The transitive closure of shallow traces reachable from a task's
/// relationships at the moment of the call.
///
/// # 契约说明（What）
/// - `nodes` is keyed by [`TaskId`] and deduplicated — a diamond-shaped graph
///   (two relationships reaching the same ancestor) appears once.
/// - `edges` records every relationship traversed, including ones whose
///   target duplicates an already-visited node, so the edge set is the full
///   graph even though `nodes` is deduplicated.
#[derive(Clone, Debug)]
pub struct Trace {
    pub root: TaskId,
    pub nodes: BTreeMap<TaskId, ShallowTrace>,
    pub edges: Vec<(TaskId, RelationshipKind, TaskId)>,
}

impl Trace {
    /// Walk the relationship graph reachable from `root`, building its
    /// transitive closure. Cycle-safe via the `nodes` visited-set, though the
    /// graph is expected to be a DAG in practice.
    pub fn of(root: &dyn TraceNode) -> Self {
        let root_id = root.task_id();
        let mut nodes = BTreeMap::new();
        let mut edges = Vec::new();
        nodes.insert(root_id, root.shallow_trace());

        let mut frontier: Vec<Arc<dyn TraceNode>> = root
            .relationships()
            .into_iter()
            .map(|rel| {
                edges.push((root_id, rel.kind, rel.other.task_id()));
                rel.other
            })
            .collect();

        while let Some(node) = frontier.pop() {
            let id = node.task_id();
            if nodes.contains_key(&id) {
                continue;
            }
            nodes.insert(id, node.shallow_trace());
            for rel in node.relationships() {
                edges.push((id, rel.kind, rel.other.task_id()));
                if !nodes.contains_key(&rel.other.task_id()) {
                    frontier.push(rel.other);
                }
            }
        }

        Trace {
            root: root_id,
            nodes,
            edges,
        }
    }
}
