//! Iterator-based traversal over the adjacency index.
//!
//! [`Dfs`] walks the graph lazily and yields each reachable vertex exactly
//! once; [`depth_first_reachable`] collects the walk for callers that want
//! the whole reachable set. Traversal order is deterministic given the
//! container's iteration order.

use crate::graph::adjacency::{Graph, GraphError, VertexId};

/// An iterator for depth-first search.
///
/// Yields vertex handles in DFS order, starting from the seed vertex.
/// Uses an explicit stack and a slot-indexed visited table; vertices are
/// marked when pushed, so each is yielded at most once.
pub struct Dfs<'a, V, E> {
    graph: &'a Graph<V, E>,
    visited: Vec<bool>,
    stack: Vec<VertexId>,
}

impl<'a, V, E> Dfs<'a, V, E> {
    /// Creates a DFS over `graph` seeded at `start`.
    ///
    /// A stale or foreign `start` yields an empty traversal.
    pub fn new(graph: &'a Graph<V, E>, start: VertexId) -> Self {
        let mut visited = vec![false; graph.vertex_slot_bound()];
        let mut stack = Vec::new();

        if graph.contains_vertex(start) {
            visited[start.slot()] = true;
            stack.push(start);
        }

        Self {
            graph,
            visited,
            stack,
        }
    }
}

impl<V, E> Iterator for Dfs<'_, V, E> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.stack.pop()?;

        for &(v, _) in self.graph.adjacency_slice(u) {
            if !self.visited[v.slot()] {
                self.visited[v.slot()] = true;
                self.stack.push(v);
            }
        }

        Some(u)
    }
}

/// Every vertex reachable from `start`, including `start` itself, in
/// depth-first visit order.
///
/// # Errors
/// [`GraphError::InvalidVertex`] if `start` is stale or foreign.
pub fn depth_first_reachable<V, E>(
    graph: &Graph<V, E>,
    start: VertexId,
) -> Result<Vec<VertexId>, GraphError> {
    if !graph.contains_vertex(start) {
        return Err(GraphError::InvalidVertex);
    }
    Ok(Dfs::new(graph, start).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_components() -> (Graph<&'static str, &'static str>, Vec<VertexId>) {
        let mut graph = Graph::new();
        let a = graph.insert_vertex("A").unwrap();
        let b = graph.insert_vertex("B").unwrap();
        let c = graph.insert_vertex("C").unwrap();
        let d = graph.insert_vertex("D").unwrap();
        let e = graph.insert_vertex("E").unwrap();
        graph.insert_edge(a, b, "ab").unwrap();
        graph.insert_edge(b, c, "bc").unwrap();
        graph.insert_edge(d, e, "de").unwrap();
        (graph, vec![a, b, c, d, e])
    }

    #[test]
    fn reachable_covers_the_component() {
        let (graph, vs) = two_components();
        let reached = depth_first_reachable(&graph, vs[0]).unwrap();
        assert_eq!(reached.len(), 3);
        assert!(reached.contains(&vs[0]));
        assert!(reached.contains(&vs[1]));
        assert!(reached.contains(&vs[2]));
        assert!(!reached.contains(&vs[3]));
        assert_eq!(reached[0], vs[0]);
    }

    #[test]
    fn reachable_from_the_other_component() {
        let (graph, vs) = two_components();
        let reached = depth_first_reachable(&graph, vs[4]).unwrap();
        assert_eq!(reached.len(), 2);
        assert!(reached.contains(&vs[3]));
        assert!(reached.contains(&vs[4]));
    }

    #[test]
    fn isolated_start_reaches_only_itself() {
        let mut graph: Graph<&str, &str> = Graph::new();
        let lone = graph.insert_vertex("lone").unwrap();
        assert_eq!(depth_first_reachable(&graph, lone).unwrap(), vec![lone]);
    }

    #[test]
    fn stale_start_is_an_error() {
        let (mut graph, vs) = two_components();
        graph.remove_vertex(vs[0]).unwrap();
        assert_eq!(
            depth_first_reachable(&graph, vs[0]),
            Err(GraphError::InvalidVertex)
        );
    }

    #[test]
    fn dfs_iterator_visits_each_vertex_once() {
        let (graph, vs) = two_components();
        let mut seen = std::collections::HashSet::new();
        for v in Dfs::new(&graph, vs[1]) {
            assert!(seen.insert(v));
        }
        assert_eq!(seen.len(), 3);
    }
}
