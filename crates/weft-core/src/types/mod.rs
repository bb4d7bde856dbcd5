//! Core data types.

mod id;

pub use id::{NodeId, Ref, StatementId};
