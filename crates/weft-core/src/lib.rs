//! Weft Core
//!
//! This crate provides the primitive types shared across the Weft graph
//! query engine.
//!
//! # Overview
//!
//! A Weft graph is made of two kinds of primitive: nodes and statements
//! (the links between nodes). The storage backend assigns each primitive
//! an opaque identifier, and everything above storage — the query planner,
//! the execution tree, the result binder — passes those identifiers around
//! without interpreting them.
//!
//! - **Identifiers**: [`NodeId`] and [`StatementId`] for the two primitive
//!   kinds
//! - **References**: [`Ref`], an opaque handle to either kind, used as the
//!   currency of query execution
//!
//! # Example
//!
//! ```
//! use weft_core::{NodeId, Ref};
//!
//! let alice = Ref::node(1);
//! let knows = Ref::statement(7);
//!
//! assert!(alice.is_node());
//! assert!(knows.is_statement());
//! assert_eq!(alice, Ref::Node(NodeId::new(1)));
//! ```

pub mod types;

pub use types::{NodeId, Ref, StatementId};
