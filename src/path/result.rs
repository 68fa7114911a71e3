//! Resolved outcomes of routing queries.

use crate::graph::VertexId;

/// Outcome of a shortest-path or farthest-pair query.
///
/// A reachable result carries the total additive cost and the full hop
/// sequence from source to target, both inclusive, so a self-query yields
/// a single hop. The "no path" sentinel carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult<C> {
    cost: Option<C>,
    hops: Vec<VertexId>,
}

impl<C> PathResult<C> {
    /// The sentinel result: no connecting path exists.
    pub(crate) fn unreachable() -> Self {
        Self {
            cost: None,
            hops: Vec::new(),
        }
    }

    pub(crate) fn reached(cost: C, hops: Vec<VertexId>) -> Self {
        debug_assert!(!hops.is_empty());
        Self {
            cost: Some(cost),
            hops,
        }
    }

    /// Total additive cost, or `None` when no path exists.
    pub fn cost(&self) -> Option<C>
    where
        C: Copy,
    {
        self.cost
    }

    /// Vertex handles from source to target inclusive, empty when no path
    /// exists.
    pub fn hops(&self) -> &[VertexId] {
        &self.hops
    }

    /// Whether this is the "no path" sentinel.
    pub fn is_unreachable(&self) -> bool {
        self.cost.is_none()
    }

    /// Consumes the result, yielding the hop sequence.
    pub fn into_hops(self) -> Vec<VertexId> {
        self.hops
    }
}
