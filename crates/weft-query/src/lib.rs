//! Weft Query
//!
//! This crate provides the query execution layer of the Weft graph
//! engine: the plan-node/cursor protocol, the result-tagging decorator,
//! and the adapter bridging the legacy iterator protocol.
//!
//! # Overview
//!
//! A query is answered by composing plan nodes into a tree and pulling
//! results through cursors. Wherever the query language needs a named
//! variable ("find `x` such that ..."), the planner attaches a tag to the
//! relevant subtree; every result then carries a binding set mapping each
//! tagged name to the graph primitive it was bound to.
//!
//! # Quick Start
//!
//! ```
//! use weft_core::Ref;
//! use weft_query::exec::{
//!     tag, Bindings, Cursor, Enumerator, ExecutionContext, FixedNode, PlanNode,
//! };
//!
//! let people = FixedNode::from_values([Ref::node(1), Ref::node(2)]);
//! let tagged = tag(Box::new(people), "person");
//!
//! let ctx = ExecutionContext::new();
//! let mut cur = tagged.iterate();
//! while cur.advance(&ctx) {
//!     let mut bindings = Bindings::new();
//!     cur.emit_bindings(&mut bindings);
//!     assert_eq!(bindings.get("person"), cur.current());
//! }
//! cur.release().unwrap();
//! ```
//!
//! # Modules
//!
//! - [`exec`] - Execution protocol, tagging, and the generation adapter
//! - [`error`] - Error types for query execution

pub mod error;
pub mod exec;

pub use error::{QueryError, QueryResult};
