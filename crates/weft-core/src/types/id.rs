//! Opaque identifiers for graph primitives.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new `NodeId` from a raw u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a statement (link) in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementId(u64);

impl StatementId {
    /// Create a new `StatementId` from a raw u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for StatementId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Opaque reference to a graph primitive as produced by the storage backend.
///
/// Query execution treats a `Ref` as an immutable value: it is stored,
/// compared, and forwarded, never interpreted. Resolving a `Ref` back to
/// actual graph data is the storage layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ref {
    /// A node primitive.
    Node(NodeId),
    /// A statement primitive.
    Statement(StatementId),
}

impl Ref {
    /// Create a reference to a node from a raw id.
    #[must_use]
    pub const fn node(id: u64) -> Self {
        Self::Node(NodeId::new(id))
    }

    /// Create a reference to a statement from a raw id.
    #[must_use]
    pub const fn statement(id: u64) -> Self {
        Self::Statement(StatementId::new(id))
    }

    /// Returns true if this reference points at a node.
    #[must_use]
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// Returns true if this reference points at a statement.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(self, Self::Statement(_))
    }
}

impl From<NodeId> for Ref {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<StatementId> for Ref {
    fn from(id: StatementId) -> Self {
        Self::Statement(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_roundtrip() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
    }

    #[test]
    fn statement_id_roundtrip() {
        let id = StatementId::new(123);
        assert_eq!(id.as_u64(), 123);
    }

    #[test]
    fn refs_compare_by_kind_and_id() {
        assert_eq!(Ref::node(1), Ref::node(1));
        assert_ne!(Ref::node(1), Ref::node(2));
        assert_ne!(Ref::node(1), Ref::statement(1));
    }

    #[test]
    fn ref_kind_predicates() {
        assert!(Ref::node(1).is_node());
        assert!(!Ref::node(1).is_statement());
        assert!(Ref::statement(1).is_statement());
    }

    #[test]
    fn ids_are_ordered() {
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        assert!(a < b);
    }
}
