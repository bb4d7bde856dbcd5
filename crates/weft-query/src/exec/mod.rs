//! Query execution engine.
//!
//! Execution is built from an **iterator algebra**: primitive nodes
//! (fixed sets, scans) and decorators compose into a tree of plan nodes,
//! and each node enumerates or tests candidate graph primitives through
//! the cursors it produces.
//!
//! # Architecture
//!
//! - A [`PlanNode`] is stateless and reusable; it describes one step of a
//!   query and produces fresh cursors per traversal.
//! - An [`Enumerator`] steps through a subtree's results; a [`Prober`]
//!   answers containment for candidates pushed down from above.
//! - [`Bindings`] accumulate name-to-primitive assignments as
//!   `emit_bindings` recurses up the tree; [`TagNode`] is the decorator
//!   that writes them.
//! - The [`legacy`] module bridges the previous protocol generation, in
//!   which one stateful object was both node and cursor.
//!
//! # Modules
//!
//! - [`bindings`] - Named variable bindings for the current position
//! - [`context`] - Execution context (cancellation, statistics)
//! - [`node`] - Plan node and cursor protocol
//! - [`tag`] - Tagging decorator and tag attachment entry points
//! - [`legacy`] - Protocol-generation adapter
//! - [`fixed`] - Constant result-set node

pub mod bindings;
pub mod context;
pub mod fixed;
pub mod legacy;
pub mod node;
pub mod tag;

#[cfg(test)]
mod proptest_tests;

// Re-exports
pub use bindings::Bindings;
pub use context::{CancellationToken, ExecutionContext, ExecutionStats};
pub use fixed::FixedNode;
pub use legacy::{as_legacy, as_modern, BridgedNode, LegacyIterator, LegacyShim};
pub use node::{
    BoxedNode, CostStats, Cursor, Enumerator, PlanNode, Prober, SizeEstimate, TagView, Tagger,
};
pub use tag::{tag, tag_legacy, TagEnumerator, TagNode, TagProber};
