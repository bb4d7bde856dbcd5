//! Plan node and cursor protocol.
//!
//! This module defines the contracts that every node in a query execution
//! tree satisfies. A [`PlanNode`] is a reusable, shareable description of
//! one step of a query; asking it to [`iterate`](PlanNode::iterate) or
//! [`lookup`](PlanNode::lookup) produces a fresh, stateful cursor that
//! performs the actual traversal.
//!
//! # Lifecycle
//!
//! 1. The planner builds a tree of plan nodes.
//! 2. The tree is rewritten bottom-up through [`PlanNode::optimize`].
//! 3. The executor requests a cursor from the root; cursors recursively
//!    request cursors from children.
//! 4. Each `advance`/`test` call recurses down; each `emit_bindings` call
//!    recurses up.
//! 5. Every cursor is released exactly once, on every exit path.

use std::collections::HashMap;

use weft_core::Ref;

use crate::error::{QueryError, QueryResult};
use crate::exec::bindings::Bindings;
use crate::exec::context::ExecutionContext;

/// Estimated number of results a plan node will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEstimate {
    /// The estimated result count.
    pub value: i64,
    /// Whether the estimate is exact.
    pub exact: bool,
}

impl SizeEstimate {
    /// Creates an exact estimate.
    #[must_use]
    pub const fn exact(value: i64) -> Self {
        Self { value, exact: true }
    }

    /// Creates an inexact estimate.
    #[must_use]
    pub const fn approximate(value: i64) -> Self {
        Self { value, exact: false }
    }
}

/// Cost statistics reported by a plan node for planning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostStats {
    /// Relative cost of answering one containment probe.
    pub lookup_cost: i64,
    /// Relative cost of producing one result.
    pub advance_cost: i64,
    /// Estimated result count.
    pub size: SizeEstimate,
}

/// Read-only view of a node's tagging state.
///
/// Split from [`Tagger`] so that merge sources (snapshots, foreign nodes)
/// can be read without exposing mutation.
pub trait TagView {
    /// The dynamic tag names, in insertion order. Duplicates are allowed.
    ///
    /// The returned slice must not be assumed unique or sorted.
    fn tags(&self) -> &[String];

    /// The fixed-tag mapping. The returned map must not be mutated.
    fn fixed_tags(&self) -> &HashMap<String, Ref>;
}

/// The tagging capability of a plan node.
///
/// A node exposing this capability accepts variable names to bind against
/// its results, so tag attachment can mutate it in place instead of
/// wrapping it in another decorator.
pub trait Tagger: TagView {
    /// Appends dynamic tag names. No uniqueness is enforced.
    fn add_tags(&mut self, names: Vec<String>);

    /// Inserts or overwrites a fixed-tag entry.
    fn add_fixed_tag(&mut self, name: String, value: Ref);

    /// Merges another tagger's state into this one.
    ///
    /// The other's dynamic tags are appended after this node's own list;
    /// the other's fixed entries overwrite on key collision. Order-stable:
    /// this node's original tags remain first.
    fn copy_from(&mut self, other: &dyn TagView);
}

/// A node in the query execution tree.
///
/// Plan nodes are immutable after optimization and may produce many
/// independent cursors over their lifetime; cursors are stateful and
/// single-owner.
pub trait PlanNode: Send {
    /// Returns the name of this node type, for explain output.
    fn name(&self) -> &'static str;

    /// Produces a fresh enumeration cursor over this subtree's results.
    fn iterate(&self) -> Box<dyn Enumerator>;

    /// Produces a fresh containment cursor for this subtree.
    fn lookup(&self) -> Box<dyn Prober>;

    /// Reports cost statistics for planning.
    fn stats(&self) -> CostStats;

    /// Reports the estimated result count.
    fn size_estimate(&self) -> SizeEstimate;

    /// Exposes the direct children of this node, for tree introspection.
    fn children(&self) -> Vec<&dyn PlanNode>;

    /// Rewrites this subtree into a cheaper equivalent.
    ///
    /// Returns the replacement node and whether anything changed. The
    /// external optimizer applies this bottom-up; implementations optimize
    /// their children before deciding about themselves.
    fn optimize(self: Box<Self>) -> (Box<dyn PlanNode>, bool);

    /// Probes for the tagging capability.
    ///
    /// Adapter nodes forward this probe across protocol generations, so a
    /// `Some` answer may come from a wrapped legacy node.
    fn as_tagger(&mut self) -> Option<&mut dyn Tagger> {
        None
    }
}

/// Boxed plan node for dynamic dispatch.
pub type BoxedNode = Box<dyn PlanNode>;

/// Live traversal state shared by both cursor variants.
pub trait Cursor: Send {
    /// The result at the current position, if any.
    ///
    /// Before the first successful step this reports whatever the
    /// underlying source considers current, typically `None`.
    fn current(&self) -> Option<Ref>;

    /// Steps to the next alternate binding path for the current result.
    ///
    /// A false return means no more alternate paths exist for the current
    /// result, not that the cursor is exhausted.
    fn advance_alternate(&mut self, ctx: &ExecutionContext) -> bool;

    /// Writes the bindings for the current position into `dst`.
    ///
    /// Implementations delegate to their child first, then overwrite with
    /// their own entries, so ancestors win on name collision.
    fn emit_bindings(&self, dst: &mut Bindings);

    /// The error behind the most recent false `advance`/`test` return, if
    /// any.
    fn last_error(&self) -> Option<QueryError>;

    /// Releases the resources held by this cursor.
    ///
    /// Idempotent. A failure in a child's release is forwarded, never
    /// hidden.
    fn release(&mut self) -> QueryResult<()>;
}

/// Enumeration cursor: steps through the subtree's results one by one.
pub trait Enumerator: Cursor {
    /// Steps to the next result.
    ///
    /// Returns false on exhaustion, cancellation, or error; the three are
    /// disambiguated via [`Cursor::last_error`].
    fn advance(&mut self, ctx: &ExecutionContext) -> bool;
}

/// Containment cursor: answers whether the subtree contains a candidate.
///
/// Used when a node sits beneath an intersection that drives by
/// enumerating one branch and testing candidates against the others.
pub trait Prober: Cursor {
    /// Tests whether the subtree contains `candidate`.
    ///
    /// A true return establishes `candidate` as the current result.
    fn test(&mut self, ctx: &ExecutionContext, candidate: Ref) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_estimate_constructors() {
        let e = SizeEstimate::exact(3);
        assert_eq!(e.value, 3);
        assert!(e.exact);

        let a = SizeEstimate::approximate(100);
        assert!(!a.exact);
    }
}
