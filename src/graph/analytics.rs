//! Read-only structural folds over a [`Graph`].
//!
//! Everything here is a pure query: isolation checks, degree-distribution
//! shares, weight aggregates, and a coarse [`GraphSummary`]. None of these
//! touch the adjacency index, so they can be offered as free functions
//! instead of container methods.

use core::ops::RangeBounds;

use num_traits::ToPrimitive;

use crate::graph::adjacency::{EdgeId, Graph, GraphError, VertexId};
use crate::weight::Weighted;

/// Whether `v` has no incident edges.
///
/// # Errors
/// [`GraphError::InvalidVertex`] if the handle is stale or foreign.
pub fn is_isolated<V, E>(graph: &Graph<V, E>, v: VertexId) -> Result<bool, GraphError> {
    Ok(graph.degree(v)? == 0)
}

/// All vertices with no incident edges, in container iteration order.
pub fn isolated_vertices<V, E>(graph: &Graph<V, E>) -> Vec<VertexId> {
    graph
        .vertices()
        .filter(|&v| graph.adjacency_slice(v).is_empty())
        .collect()
}

/// Share of vertices whose degree falls within `bounds`, as a percentage
/// in `0.0..=100.0`.
///
/// An empty graph yields `0.0`.
pub fn degree_percentage<V, E>(graph: &Graph<V, E>, bounds: impl RangeBounds<usize>) -> f64 {
    let total = graph.num_vertices();
    if total == 0 {
        return 0.0;
    }
    let matching = graph
        .vertices()
        .filter(|&v| bounds.contains(&graph.adjacency_slice(v).len()))
        .count();
    matching as f64 / total as f64 * 100.0
}

/// Arithmetic mean of all edge weights, or `None` for an edgeless graph.
pub fn average_edge_weight<V, E>(graph: &Graph<V, E>) -> Option<f64>
where
    E: Weighted,
    E::Cost: ToPrimitive,
{
    let count = graph.num_edges();
    if count == 0 {
        return None;
    }
    let mut sum = 0.0_f64;
    for (_, payload) in graph.edge_entries() {
        sum += payload.weight().to_f64()?;
    }
    Some(sum / count as f64)
}

/// The heaviest edge, or `None` for an edgeless graph.
pub fn max_edge_by_weight<V, E>(graph: &Graph<V, E>) -> Option<EdgeId>
where
    E: Weighted,
{
    graph
        .edge_entries()
        .max_by_key(|&(_, payload)| payload.weight())
        .map(|(id, _)| id)
}

/// The lightest edge, or `None` for an edgeless graph.
pub fn min_edge_by_weight<V, E>(graph: &Graph<V, E>) -> Option<EdgeId>
where
    E: Weighted,
{
    graph
        .edge_entries()
        .min_by_key(|&(_, payload)| payload.weight())
        .map(|(id, _)| id)
}

/// Computes the degree-distribution summary of `graph`.
pub fn summary<V, E>(graph: &Graph<V, E>) -> GraphSummary {
    let vertex_count = graph.num_vertices();
    let edge_count = graph.num_edges();

    let mut degrees: Vec<usize> = graph
        .vertices()
        .map(|v| graph.adjacency_slice(v).len())
        .collect();
    degrees.sort_unstable();

    let (min_degree, max_degree) = match degrees.as_slice() {
        [] => (0, 0),
        [only] => (*only, *only),
        [first, .., last] => (*first, *last),
    };
    let median_degree = if degrees.is_empty() {
        0
    } else if degrees.len() % 2 == 0 {
        let a = degrees[degrees.len() / 2 - 1];
        let b = degrees[degrees.len() / 2];
        (a + b) / 2
    } else {
        degrees[degrees.len() / 2]
    };
    let degree_sum: usize = degrees.iter().sum();

    GraphSummary {
        vertex_count,
        edge_count,
        min_degree,
        max_degree,
        median_degree,
        average_degree: if vertex_count == 0 {
            0.0
        } else {
            degree_sum as f64 / vertex_count as f64
        },
    }
}

/// Degree-distribution statistics about a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSummary {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of edges, each counted once.
    pub edge_count: usize,
    /// Minimum degree over all vertices.
    pub min_degree: usize,
    /// Maximum degree over all vertices.
    pub max_degree: usize,
    /// Median degree over all vertices.
    pub median_degree: usize,
    /// Mean degree over all vertices.
    pub average_degree: f64,
}
