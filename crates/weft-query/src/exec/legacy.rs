//! Protocol-generation adapter.
//!
//! The execution tree has lived through two generations of the
//! plan-node/cursor split. In the legacy generation the iterator object
//! itself holds cursor state; in the modern generation a stateless
//! [`PlanNode`] is asked to produce a fresh cursor per traversal. Parts of
//! a plan tree may still be built against either shape, so both must
//! interoperate without a full-codebase migration.
//!
//! The modern split is the canonical representation. This module keeps
//! the entire bridge in one place so the core node logic never branches
//! on generation:
//!
//! - [`LegacyShim`] exposes a modern node through the legacy surface.
//! - [`BridgedNode`] exposes a pure-legacy iterator as a modern node.
//! - [`as_legacy`] / [`as_modern`] are the only conversion entry points.
//!
//! Capability probes (`as_tagger`) are forwarded through both wrappers,
//! so "does this node support tagging" has one answer regardless of which
//! generation the caller holds.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use weft_core::Ref;

use crate::error::{QueryError, QueryResult};
use crate::exec::bindings::Bindings;
use crate::exec::context::ExecutionContext;
use crate::exec::node::{
    BoxedNode, CostStats, Cursor, Enumerator, PlanNode, Prober, SizeEstimate, Tagger,
};

/// The legacy iterator shape: plan-node surface and cursor state on one
/// stateful object.
///
/// Implementers carry a single live traversal; [`reset`](Self::reset)
/// rewinds it so the object can be traversed again.
pub trait LegacyIterator: Send {
    /// Returns the name of this iterator type, for explain output.
    fn name(&self) -> &'static str;

    /// Steps to the next result. False on exhaustion, cancellation, or
    /// error, disambiguated via [`last_error`](Self::last_error).
    fn advance(&mut self, ctx: &ExecutionContext) -> bool;

    /// Steps to the next alternate binding path for the current result.
    fn advance_alternate(&mut self, ctx: &ExecutionContext) -> bool;

    /// Tests whether this subtree contains `candidate`, establishing it
    /// as the current result on success.
    fn test(&mut self, ctx: &ExecutionContext, candidate: Ref) -> bool;

    /// The result at the current position, if any.
    fn current(&self) -> Option<Ref>;

    /// Writes the bindings for the current position into `dst`.
    fn emit_bindings(&self, dst: &mut Bindings);

    /// Rewinds the traversal state to the beginning.
    fn reset(&mut self);

    /// Reports cost statistics for planning.
    fn stats(&self) -> CostStats;

    /// Reports the estimated result count.
    fn size_estimate(&self) -> SizeEstimate;

    /// Rewrites this subtree into a cheaper equivalent.
    fn optimize(self: Box<Self>) -> (Box<dyn LegacyIterator>, bool);

    /// Probes for the tagging capability.
    fn as_tagger(&mut self) -> Option<&mut dyn Tagger> {
        None
    }

    /// The error behind the most recent false `advance`/`test` return.
    fn last_error(&self) -> Option<QueryError>;

    /// Releases the resources held by the traversal state. Idempotent.
    fn release(&mut self) -> QueryResult<()>;

    /// Converts this iterator into its canonical modern representation.
    ///
    /// Shims unwrap to the node they carry; genuine legacy iterators
    /// bridge themselves, typically via [`BridgedNode::new`].
    fn into_plan_node(self: Box<Self>) -> BoxedNode;
}

/// Exposes a modern plan node through the legacy surface.
#[must_use]
pub fn as_legacy(node: BoxedNode) -> Box<dyn LegacyIterator> {
    Box::new(LegacyShim::new(node))
}

/// Recovers the canonical modern representation of a legacy iterator.
///
/// Lossless for iterators produced by [`as_legacy`]: the original node is
/// returned unwrapped, so converting a node to the legacy generation and
/// back is the identity.
#[must_use]
pub fn as_modern(it: Box<dyn LegacyIterator>) -> BoxedNode {
    it.into_plan_node()
}

/// Which of the shim's two cursors answered the most recent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastUsed {
    None,
    Scan,
    Probe,
}

/// Legacy view of a modern plan node.
///
/// Holds the node plus lazily-created enumeration and containment
/// cursors. `current`/`emit_bindings` report from whichever cursor
/// answered the most recent stepping call, matching the single-state
/// behavior legacy callers expect.
pub struct LegacyShim {
    node: BoxedNode,
    scan: Option<Box<dyn Enumerator>>,
    probe: Option<Box<dyn Prober>>,
    last: LastUsed,
    err: Option<QueryError>,
}

impl LegacyShim {
    /// Wraps `node` in the legacy surface.
    #[must_use]
    pub fn new(node: BoxedNode) -> Self {
        Self { node, scan: None, probe: None, last: LastUsed::None, err: None }
    }

    /// Releases both cursors, remembering the first failure.
    fn release_cursors(&mut self) {
        if let Some(mut scan) = self.scan.take() {
            if let Err(err) = scan.release() {
                self.err.get_or_insert(err);
            }
        }
        if let Some(mut probe) = self.probe.take() {
            if let Err(err) = probe.release() {
                self.err.get_or_insert(err);
            }
        }
        self.last = LastUsed::None;
    }
}

impl LegacyIterator for LegacyShim {
    fn name(&self) -> &'static str {
        self.node.name()
    }

    fn advance(&mut self, ctx: &ExecutionContext) -> bool {
        self.last = LastUsed::Scan;
        let scan = self.scan.get_or_insert_with(|| self.node.iterate());
        scan.advance(ctx)
    }

    fn advance_alternate(&mut self, ctx: &ExecutionContext) -> bool {
        match self.last {
            LastUsed::Scan => {
                self.scan.as_mut().is_some_and(|scan| scan.advance_alternate(ctx))
            }
            LastUsed::Probe => {
                self.probe.as_mut().is_some_and(|probe| probe.advance_alternate(ctx))
            }
            LastUsed::None => false,
        }
    }

    fn test(&mut self, ctx: &ExecutionContext, candidate: Ref) -> bool {
        self.last = LastUsed::Probe;
        let probe = self.probe.get_or_insert_with(|| self.node.lookup());
        probe.test(ctx, candidate)
    }

    fn current(&self) -> Option<Ref> {
        match self.last {
            LastUsed::Scan => self.scan.as_ref().and_then(|scan| scan.current()),
            LastUsed::Probe => self.probe.as_ref().and_then(|probe| probe.current()),
            LastUsed::None => None,
        }
    }

    fn emit_bindings(&self, dst: &mut Bindings) {
        match self.last {
            LastUsed::Scan => {
                if let Some(scan) = self.scan.as_ref() {
                    scan.emit_bindings(dst);
                }
            }
            LastUsed::Probe => {
                if let Some(probe) = self.probe.as_ref() {
                    probe.emit_bindings(dst);
                }
            }
            LastUsed::None => {}
        }
    }

    fn reset(&mut self) {
        self.release_cursors();
    }

    fn stats(&self) -> CostStats {
        self.node.stats()
    }

    fn size_estimate(&self) -> SizeEstimate {
        self.node.size_estimate()
    }

    fn optimize(mut self: Box<Self>) -> (Box<dyn LegacyIterator>, bool) {
        self.release_cursors();
        let (node, changed) = self.node.optimize();
        (as_legacy(node), changed)
    }

    fn as_tagger(&mut self) -> Option<&mut dyn Tagger> {
        self.node.as_tagger()
    }

    fn last_error(&self) -> Option<QueryError> {
        let cursor_err = match self.last {
            LastUsed::Scan => self.scan.as_ref().and_then(|scan| scan.last_error()),
            LastUsed::Probe => self.probe.as_ref().and_then(|probe| probe.last_error()),
            LastUsed::None => None,
        };
        cursor_err.or_else(|| self.err.clone())
    }

    fn release(&mut self) -> QueryResult<()> {
        self.release_cursors();
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn into_plan_node(mut self: Box<Self>) -> BoxedNode {
        self.release_cursors();
        self.node
    }
}

type SharedLegacy = Arc<Mutex<Box<dyn LegacyIterator>>>;

fn lock_shared(inner: &SharedLegacy) -> MutexGuard<'_, Box<dyn LegacyIterator>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Modern view of a pure-legacy iterator.
///
/// A legacy iterator carries exactly one live traversal, so the bridge
/// holds it behind a shared handle: the node half answers plan-level
/// calls, and each cursor obtained from it operates on that same single
/// traversal after rewinding it. Requesting a second concurrent cursor
/// from a bridged node hands back the same underlying state, which is the
/// legacy generation's own semantics.
pub struct BridgedNode {
    inner: SharedLegacy,
}

impl BridgedNode {
    /// Bridges `it` into the modern protocol.
    #[must_use]
    pub fn new(it: Box<dyn LegacyIterator>) -> Self {
        Self { inner: Arc::new(Mutex::new(it)) }
    }
}

impl PlanNode for BridgedNode {
    fn name(&self) -> &'static str {
        "LegacyBridge"
    }

    fn iterate(&self) -> Box<dyn Enumerator> {
        lock_shared(&self.inner).reset();
        Box::new(BridgedCursor { inner: Arc::clone(&self.inner) })
    }

    fn lookup(&self) -> Box<dyn Prober> {
        lock_shared(&self.inner).reset();
        Box::new(BridgedCursor { inner: Arc::clone(&self.inner) })
    }

    fn stats(&self) -> CostStats {
        lock_shared(&self.inner).stats()
    }

    fn size_estimate(&self) -> SizeEstimate {
        lock_shared(&self.inner).size_estimate()
    }

    fn children(&self) -> Vec<&dyn PlanNode> {
        // Legacy subtrees are opaque to modern introspection.
        Vec::new()
    }

    fn optimize(self: Box<Self>) -> (BoxedNode, bool) {
        // Rewriting requires exclusive ownership of the legacy state; a
        // bridge with outstanding cursors is left as-is.
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => {
                let it = mutex.into_inner().unwrap_or_else(PoisonError::into_inner);
                let (opt, changed) = it.optimize();
                (Box::new(BridgedNode::new(opt)), changed)
            }
            Err(inner) => (Box::new(BridgedNode { inner }), false),
        }
    }

    fn as_tagger(&mut self) -> Option<&mut dyn Tagger> {
        let mutex = Arc::get_mut(&mut self.inner)?;
        mutex.get_mut().unwrap_or_else(PoisonError::into_inner).as_tagger()
    }
}

/// Cursor half of a bridged legacy iterator.
///
/// Serves as both the enumeration and the containment variant, since the
/// legacy object exposes both stepping operations on one state.
struct BridgedCursor {
    inner: SharedLegacy,
}

impl Cursor for BridgedCursor {
    fn current(&self) -> Option<Ref> {
        lock_shared(&self.inner).current()
    }

    fn advance_alternate(&mut self, ctx: &ExecutionContext) -> bool {
        lock_shared(&self.inner).advance_alternate(ctx)
    }

    fn emit_bindings(&self, dst: &mut Bindings) {
        lock_shared(&self.inner).emit_bindings(dst);
    }

    fn last_error(&self) -> Option<QueryError> {
        lock_shared(&self.inner).last_error()
    }

    fn release(&mut self) -> QueryResult<()> {
        lock_shared(&self.inner).release()
    }
}

impl Enumerator for BridgedCursor {
    fn advance(&mut self, ctx: &ExecutionContext) -> bool {
        lock_shared(&self.inner).advance(ctx)
    }
}

impl Prober for BridgedCursor {
    fn test(&mut self, ctx: &ExecutionContext, candidate: Ref) -> bool {
        lock_shared(&self.inner).test(ctx, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::fixed::FixedNode;

    fn abc() -> BoxedNode {
        Box::new(FixedNode::from_values([Ref::node(1), Ref::node(2), Ref::node(3)]))
    }

    #[test]
    fn shim_enumerates_like_the_node() {
        let ctx = ExecutionContext::new();
        let mut it = as_legacy(abc());

        let mut seen = Vec::new();
        while it.advance(&ctx) {
            seen.push(it.current().unwrap());
        }
        assert!(it.last_error().is_none());
        it.release().unwrap();

        assert_eq!(seen, vec![Ref::node(1), Ref::node(2), Ref::node(3)]);
    }

    #[test]
    fn shim_reset_restarts_enumeration() {
        let ctx = ExecutionContext::new();
        let mut it = as_legacy(abc());

        assert!(it.advance(&ctx));
        assert!(it.advance(&ctx));
        it.reset();

        assert!(it.advance(&ctx));
        assert_eq!(it.current(), Some(Ref::node(1)));
        it.release().unwrap();
    }

    #[test]
    fn shim_answers_containment() {
        let ctx = ExecutionContext::new();
        let mut it = as_legacy(abc());

        assert!(it.test(&ctx, Ref::node(2)));
        assert_eq!(it.current(), Some(Ref::node(2)));
        assert!(!it.test(&ctx, Ref::node(9)));
        it.release().unwrap();
    }

    #[test]
    fn round_trip_unwraps_to_the_original_node() {
        let node = as_modern(as_legacy(abc()));
        assert_eq!(node.name(), "Fixed");
        assert_eq!(node.size_estimate(), SizeEstimate::exact(3));
    }

    #[test]
    fn shim_passes_stats_through() {
        let node = abc();
        let stats = node.stats();
        let it = as_legacy(node);

        assert_eq!(it.stats(), stats);
        assert_eq!(it.size_estimate(), SizeEstimate::exact(3));
    }

    #[test]
    fn shim_current_is_none_before_any_step() {
        let it = as_legacy(abc());
        assert_eq!(it.current(), None);

        let mut dst = Bindings::new();
        it.emit_bindings(&mut dst);
        assert!(dst.is_empty());
    }

    #[test]
    fn bridged_node_enumerates_the_legacy_state() {
        let ctx = ExecutionContext::new();
        let bridged = BridgedNode::new(as_legacy(abc()));

        let mut cur = bridged.iterate();
        let mut seen = Vec::new();
        while cur.advance(&ctx) {
            seen.push(cur.current().unwrap());
        }
        cur.release().unwrap();
        assert_eq!(seen.len(), 3);

        // A fresh cursor rewinds the shared legacy state.
        let mut cur = bridged.iterate();
        assert!(cur.advance(&ctx));
        assert_eq!(cur.current(), Some(Ref::node(1)));
        cur.release().unwrap();
    }

    #[test]
    fn bridged_node_optimize_without_cursors_reaches_the_legacy_side() {
        let bridged: BoxedNode = Box::new(BridgedNode::new(as_legacy(abc())));
        let (opt, _changed) = bridged.optimize();
        assert_eq!(opt.name(), "LegacyBridge");
        assert_eq!(opt.size_estimate(), SizeEstimate::exact(3));
    }
}
