//! Constant result-set node.
//!
//! [`FixedNode`] enumerates an explicit list of [`Ref`]s supplied at
//! construction time. The planner uses it for literal values resolved
//! before execution; it is also the simplest concrete implementer of the
//! plan-node protocol.

use weft_core::Ref;

use crate::error::{QueryError, QueryResult};
use crate::exec::bindings::Bindings;
use crate::exec::context::ExecutionContext;
use crate::exec::node::{
    BoxedNode, CostStats, Cursor, Enumerator, PlanNode, Prober, SizeEstimate,
};

/// A plan node producing a fixed set of references.
#[derive(Debug, Clone, Default)]
pub struct FixedNode {
    values: Vec<Ref>,
}

impl FixedNode {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node producing the given values in order.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Ref>) -> Self {
        Self { values: values.into_iter().collect() }
    }

    /// Appends a value to the set.
    pub fn add(&mut self, value: Ref) {
        self.values.push(value);
    }

    /// Returns the values this node produces.
    #[must_use]
    pub fn values(&self) -> &[Ref] {
        &self.values
    }
}

impl PlanNode for FixedNode {
    fn name(&self) -> &'static str {
        "Fixed"
    }

    fn iterate(&self) -> Box<dyn Enumerator> {
        Box::new(FixedEnumerator {
            values: self.values.clone(),
            pos: 0,
            cur: None,
            err: None,
        })
    }

    fn lookup(&self) -> Box<dyn Prober> {
        Box::new(FixedProber { values: self.values.clone(), cur: None, err: None })
    }

    fn stats(&self) -> CostStats {
        CostStats {
            lookup_cost: self.values.len() as i64,
            advance_cost: 1,
            size: self.size_estimate(),
        }
    }

    fn size_estimate(&self) -> SizeEstimate {
        SizeEstimate::exact(self.values.len() as i64)
    }

    fn children(&self) -> Vec<&dyn PlanNode> {
        Vec::new()
    }

    fn optimize(self: Box<Self>) -> (BoxedNode, bool) {
        (self, false)
    }
}

/// Enumeration cursor over a fixed value list.
struct FixedEnumerator {
    values: Vec<Ref>,
    pos: usize,
    cur: Option<Ref>,
    err: Option<QueryError>,
}

impl Cursor for FixedEnumerator {
    fn current(&self) -> Option<Ref> {
        self.cur
    }

    fn advance_alternate(&mut self, _ctx: &ExecutionContext) -> bool {
        false
    }

    fn emit_bindings(&self, _dst: &mut Bindings) {}

    fn last_error(&self) -> Option<QueryError> {
        self.err.clone()
    }

    fn release(&mut self) -> QueryResult<()> {
        Ok(())
    }
}

impl Enumerator for FixedEnumerator {
    fn advance(&mut self, ctx: &ExecutionContext) -> bool {
        if ctx.is_cancelled() {
            self.err = Some(QueryError::Cancelled);
            return false;
        }
        if self.pos < self.values.len() {
            self.cur = Some(self.values[self.pos]);
            self.pos += 1;
            ctx.record_result();
            true
        } else {
            false
        }
    }
}

/// Containment cursor over a fixed value list.
struct FixedProber {
    values: Vec<Ref>,
    cur: Option<Ref>,
    err: Option<QueryError>,
}

impl Cursor for FixedProber {
    fn current(&self) -> Option<Ref> {
        self.cur
    }

    fn advance_alternate(&mut self, _ctx: &ExecutionContext) -> bool {
        false
    }

    fn emit_bindings(&self, _dst: &mut Bindings) {}

    fn last_error(&self) -> Option<QueryError> {
        self.err.clone()
    }

    fn release(&mut self) -> QueryResult<()> {
        Ok(())
    }
}

impl Prober for FixedProber {
    fn test(&mut self, ctx: &ExecutionContext, candidate: Ref) -> bool {
        if ctx.is_cancelled() {
            self.err = Some(QueryError::Cancelled);
            return false;
        }
        ctx.record_probe();
        if self.values.contains(&candidate) {
            self.cur = Some(candidate);
            true
        } else {
            false
        }
    }
}
