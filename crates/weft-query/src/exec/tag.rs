//! Tagging decorator.
//!
//! [`TagNode`] wraps exactly one child plan node and records, for every
//! result the child produces, which graph primitive was bound to which
//! variable name at this point of the tree. It never decides which results
//! exist, never filters, and never alters cost or cardinality estimates —
//! it only decorates outputs.
//!
//! Two kinds of tag are carried:
//!
//! - **Dynamic tags** bind a name to whatever the child currently
//!   considers its result, re-read on every emission.
//! - **Fixed tags** bind a name to a constant [`Ref`] fixed at
//!   construction time.
//!
//! On a name collision this node's entries always win over bindings
//! contributed by its descendants.

use std::collections::HashMap;

use weft_core::Ref;

use crate::error::{QueryError, QueryResult};
use crate::exec::bindings::Bindings;
use crate::exec::context::ExecutionContext;
use crate::exec::legacy::{as_legacy, as_modern, LegacyIterator};
use crate::exec::node::{
    BoxedNode, CostStats, Cursor, Enumerator, PlanNode, Prober, SizeEstimate, TagView, Tagger,
};

/// Attaches `name` as a dynamic tag to an arbitrary plan node.
///
/// If the node already exposes tagging capability — directly or through a
/// protocol-generation adapter — the tag is added in place and the same
/// node is returned. Otherwise the node is wrapped in a new [`TagNode`].
/// Repeated attachment therefore builds at most one tagging wrapper per
/// subtree.
#[must_use]
pub fn tag(mut node: BoxedNode, name: impl Into<String>) -> BoxedNode {
    let name = name.into();
    if let Some(tagger) = node.as_tagger() {
        tagger.add_tags(vec![name]);
        return node;
    }
    Box::new(TagNode::with_tags(node, [name]))
}

/// Attaches `name` as a dynamic tag to a legacy-generation iterator.
///
/// The legacy counterpart of [`tag`]: adds in place when the iterator
/// exposes tagging capability in either generation, otherwise wraps the
/// iterator's canonical form in a new [`TagNode`] and returns it through
/// the legacy surface.
#[must_use]
pub fn tag_legacy(mut it: Box<dyn LegacyIterator>, name: impl Into<String>) -> Box<dyn LegacyIterator> {
    let name = name.into();
    if let Some(tagger) = it.as_tagger() {
        tagger.add_tags(vec![name]);
        return it;
    }
    as_legacy(Box::new(TagNode::with_tags(as_modern(it), [name])))
}

/// Ordered dynamic tags plus the fixed-tag mapping of one tagging node.
///
/// Cloneable so cursors snapshot it at creation; mutating the node
/// afterwards never retroactively affects cursors already in flight.
#[derive(Debug, Clone, Default)]
pub(crate) struct TagSet {
    tags: Vec<String>,
    fixed: HashMap<String, Ref>,
}

impl TagSet {
    fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.fixed.is_empty()
    }

    fn add_tags(&mut self, names: Vec<String>) {
        self.tags.extend(names);
    }

    fn add_fixed_tag(&mut self, name: String, value: Ref) {
        self.fixed.insert(name, value);
    }

    fn copy_from(&mut self, other: &dyn TagView) {
        self.tags.extend_from_slice(other.tags());
        for (name, value) in other.fixed_tags() {
            self.fixed.insert(name.clone(), *value);
        }
    }

    /// Writes this set's entries for `current` into `dst`, dynamic tags
    /// first, fixed tags last.
    fn emit(&self, current: Option<Ref>, dst: &mut Bindings) {
        if let Some(value) = current {
            for name in &self.tags {
                dst.bind(name.clone(), value);
            }
        }
        for (name, value) in &self.fixed {
            dst.bind(name.clone(), *value);
        }
    }
}

impl TagView for TagSet {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn fixed_tags(&self) -> &HashMap<String, Ref> {
        &self.fixed
    }
}

/// The tagging decorator node.
///
/// Owns exactly one child plan node. Passes `stats`/`size_estimate`
/// through unchanged and folds away during optimization whenever it is
/// empty or its child can absorb its tags.
pub struct TagNode {
    child: BoxedNode,
    set: TagSet,
}

impl TagNode {
    /// Wraps `child` with no tags attached yet.
    #[must_use]
    pub fn new(child: BoxedNode) -> Self {
        Self { child, set: TagSet::default() }
    }

    /// Wraps `child` with an initial list of dynamic tags.
    #[must_use]
    pub fn with_tags<I, S>(child: BoxedNode, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = Self::new(child);
        node.set.add_tags(tags.into_iter().map(Into::into).collect());
        node
    }
}

impl TagView for TagNode {
    fn tags(&self) -> &[String] {
        self.set.tags()
    }

    fn fixed_tags(&self) -> &HashMap<String, Ref> {
        self.set.fixed_tags()
    }
}

impl Tagger for TagNode {
    fn add_tags(&mut self, names: Vec<String>) {
        self.set.add_tags(names);
    }

    fn add_fixed_tag(&mut self, name: String, value: Ref) {
        self.set.add_fixed_tag(name, value);
    }

    fn copy_from(&mut self, other: &dyn TagView) {
        self.set.copy_from(other);
    }
}

impl PlanNode for TagNode {
    fn name(&self) -> &'static str {
        "Tag"
    }

    fn iterate(&self) -> Box<dyn Enumerator> {
        Box::new(TagEnumerator { child: self.child.iterate(), set: self.set.clone() })
    }

    fn lookup(&self) -> Box<dyn Prober> {
        Box::new(TagProber { child: self.child.lookup(), set: self.set.clone() })
    }

    fn stats(&self) -> CostStats {
        self.child.stats()
    }

    fn size_estimate(&self) -> SizeEstimate {
        self.child.size_estimate()
    }

    fn children(&self) -> Vec<&dyn PlanNode> {
        vec![self.child.as_ref()]
    }

    fn optimize(self: Box<Self>) -> (BoxedNode, bool) {
        let TagNode { child, set } = *self;
        let (mut child, child_changed) = child.optimize();

        // An empty tagger is a no-op wrapper; drop it entirely.
        if set.is_empty() {
            return (child, true);
        }

        // A tagging-capable child absorbs this node's tags, keeping the
        // tree at one tagging wrapper per subtree. The probe reaches
        // legacy taggers through the generation adapter.
        if let Some(tagger) = child.as_tagger() {
            tagger.copy_from(&set);
            return (child, true);
        }

        if !child_changed {
            return (Box::new(TagNode { child, set }), false);
        }

        let mut node = TagNode::new(child);
        node.copy_from(&set);
        (Box::new(node), true)
    }

    fn as_tagger(&mut self) -> Option<&mut dyn Tagger> {
        Some(self)
    }
}

/// Enumeration cursor of a [`TagNode`].
///
/// Delegates stepping verbatim to the child's cursor and splices its tag
/// snapshot into every binding emission.
pub struct TagEnumerator {
    child: Box<dyn Enumerator>,
    set: TagSet,
}

impl Cursor for TagEnumerator {
    fn current(&self) -> Option<Ref> {
        self.child.current()
    }

    fn advance_alternate(&mut self, ctx: &ExecutionContext) -> bool {
        self.child.advance_alternate(ctx)
    }

    fn emit_bindings(&self, dst: &mut Bindings) {
        self.child.emit_bindings(dst);
        self.set.emit(self.child.current(), dst);
    }

    fn last_error(&self) -> Option<QueryError> {
        self.child.last_error()
    }

    fn release(&mut self) -> QueryResult<()> {
        self.child.release()
    }
}

impl Enumerator for TagEnumerator {
    fn advance(&mut self, ctx: &ExecutionContext) -> bool {
        self.child.advance(ctx)
    }
}

/// Containment cursor of a [`TagNode`].
pub struct TagProber {
    child: Box<dyn Prober>,
    set: TagSet,
}

impl Cursor for TagProber {
    fn current(&self) -> Option<Ref> {
        self.child.current()
    }

    fn advance_alternate(&mut self, ctx: &ExecutionContext) -> bool {
        self.child.advance_alternate(ctx)
    }

    fn emit_bindings(&self, dst: &mut Bindings) {
        self.child.emit_bindings(dst);
        self.set.emit(self.child.current(), dst);
    }

    fn last_error(&self) -> Option<QueryError> {
        self.child.last_error()
    }

    fn release(&mut self) -> QueryResult<()> {
        self.child.release()
    }
}

impl Prober for TagProber {
    fn test(&mut self, ctx: &ExecutionContext, candidate: Ref) -> bool {
        self.child.test(ctx, candidate)
    }
}
