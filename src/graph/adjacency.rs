//! An undirected labeled graph over generational arenas.
//!
//! Vertices and edges each carry one payload and are addressed through
//! opaque handles ([`VertexId`], [`EdgeId`]). The adjacency index is stored
//! per vertex as `(neighbor, edge)` pairs and kept **symmetric**: an edge
//! joining `u` and `v` appears in both vertices' entries (once, for a
//! self-loop). Mutations validate every precondition before touching the
//! index, so a failed operation leaves the graph untouched.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `insert_vertex` | \(O(V)\) | Duplicate-payload scan |
//! | `insert_edge` | \(O(E + \text{deg})\) | Duplicate scan plus adjacency check |
//! | `remove_vertex` | \(O(\sum \text{deg(nbr)})\) | Unregisters each incident edge |
//! | `remove_edge` | \(O(\text{deg})\) | Linear scan of both endpoint lists |
//! | `are_adjacent` | \(O(\text{deg})\) | Scan of one endpoint's entries |
//! | `find_vertex_by` / `find_edge_by` | \(O(V)\) / \(O(E)\) | Linear scan in slot order |

use thiserror::Error;

use crate::graph::arena::{Arena, SlotKey};

/// Handle to a vertex of a [`Graph`].
///
/// Valid only within the graph that issued it; goes stale when the vertex
/// is removed (including via [`Graph::clear`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub(crate) SlotKey);

/// Handle to an edge of a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) SlotKey);

impl VertexId {
    /// Dense slot index for sizing side tables (distance maps, visited bits).
    pub(crate) fn slot(self) -> usize {
        self.0.index()
    }
}

/// Failure kinds reported by [`Graph`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The vertex handle was not issued by this graph or has been removed.
    #[error("vertex handle does not belong to this graph")]
    InvalidVertex,
    /// The edge handle was not issued by this graph, has been removed, or is
    /// not incident to the vertex named in the query.
    #[error("edge handle does not belong to this graph or is not incident to the queried vertex")]
    InvalidEdge,
    /// A vertex with an equal payload already exists.
    #[error("a vertex with an equal payload already exists")]
    DuplicateVertex,
    /// An edge with an equal payload, or between the same endpoints, already
    /// exists.
    #[error("an edge with an equal payload or the same endpoints already exists")]
    DuplicateEdge,
}

#[derive(Debug, Clone, PartialEq)]
struct VertexRecord<V> {
    payload: V,
    stamp: u64,
    adjacency: Vec<(VertexId, EdgeId)>,
}

#[derive(Debug, Clone, PartialEq)]
struct EdgeRecord<E> {
    payload: E,
    endpoints: [VertexId; 2],
}

/// An undirected graph with labeled vertices and edges.
///
/// Payload equality drives duplicate rejection on insertion: vertices are
/// unique by `V: PartialEq`, edges by `E: PartialEq` (domains typically make
/// edge equality commutative over endpoints) and additionally by endpoint
/// pair, since the adjacency index holds at most one edge per neighbor.
///
/// ```
/// use airlane::graph::{Graph, GraphError};
///
/// let mut graph: Graph<&str, &str> = Graph::new();
/// let lis = graph.insert_vertex("Lisboa")?;
/// let por = graph.insert_vertex("Porto")?;
/// let route = graph.insert_edge(lis, por, "LIS-POR")?;
///
/// assert!(graph.are_adjacent(lis, por)?);
/// assert_eq!(graph.opposite(por, route)?, lis);
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<V, E> {
    vertices: Arena<VertexRecord<V>>,
    edges: Arena<EdgeRecord<E>>,
    next_stamp: u64,
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Arena::new(),
            edges: Arena::new(),
            next_stamp: 0,
        }
    }

    /// Number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges, each counted exactly once.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether `v` currently addresses a vertex of this graph.
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(v.0)
    }

    /// Whether `e` currently addresses an edge of this graph.
    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edges.contains(e.0)
    }

    /// Borrows the payload of `v`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if the handle is stale or foreign.
    pub fn vertex(&self, v: VertexId) -> Result<&V, GraphError> {
        self.vertices
            .get(v.0)
            .map(|record| &record.payload)
            .ok_or(GraphError::InvalidVertex)
    }

    /// Borrows the payload of `e`.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if the handle is stale or foreign.
    pub fn edge(&self, e: EdgeId) -> Result<&E, GraphError> {
        self.get_edge(e).ok_or(GraphError::InvalidEdge)
    }

    pub(crate) fn get_edge(&self, e: EdgeId) -> Option<&E> {
        self.edges.get(e.0).map(|record| &record.payload)
    }

    /// The two endpoints of `e`, in insertion orientation.
    ///
    /// Both elements are equal for a self-loop.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if the handle is stale or foreign.
    pub fn endpoints(&self, e: EdgeId) -> Result<(VertexId, VertexId), GraphError> {
        self.edges
            .get(e.0)
            .map(|record| (record.endpoints[0], record.endpoints[1]))
            .ok_or(GraphError::InvalidEdge)
    }

    /// The vertex on the other side of `e` from `v`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] for a bad vertex handle;
    /// [`GraphError::InvalidEdge`] for a bad edge handle or an edge that is
    /// not incident to `v`.
    pub fn opposite(&self, v: VertexId, e: EdgeId) -> Result<VertexId, GraphError> {
        if !self.vertices.contains(v.0) {
            return Err(GraphError::InvalidVertex);
        }
        let record = self.edges.get(e.0).ok_or(GraphError::InvalidEdge)?;
        let [a, b] = record.endpoints;
        if a == v {
            Ok(b)
        } else if b == v {
            Ok(a)
        } else {
            Err(GraphError::InvalidEdge)
        }
    }

    /// Number of edges incident to `v`, a self-loop counting once.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if the handle is stale or foreign.
    pub fn degree(&self, v: VertexId) -> Result<usize, GraphError> {
        self.vertices
            .get(v.0)
            .map(|record| record.adjacency.len())
            .ok_or(GraphError::InvalidVertex)
    }

    /// Whether an edge joins `u` and `v` (`u == v` asks for a self-loop).
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if either handle is stale or foreign.
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> Result<bool, GraphError> {
        if !self.vertices.contains(u.0) || !self.vertices.contains(v.0) {
            return Err(GraphError::InvalidVertex);
        }
        Ok(self
            .adjacency_slice(u)
            .iter()
            .any(|&(neighbor, _)| neighbor == v))
    }

    /// The edge joining `u` and `v`, if any.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if either handle is stale or foreign.
    pub fn edge_between(&self, u: VertexId, v: VertexId) -> Result<Option<EdgeId>, GraphError> {
        if !self.vertices.contains(u.0) || !self.vertices.contains(v.0) {
            return Err(GraphError::InvalidVertex);
        }
        Ok(self
            .adjacency_slice(u)
            .iter()
            .find(|&&(neighbor, _)| neighbor == v)
            .map(|&(_, edge)| edge))
    }

    /// Iterates `(neighbor, edge)` pairs incident to `v`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if the handle is stale or foreign.
    pub fn neighbors(
        &self,
        v: VertexId,
    ) -> Result<impl Iterator<Item = (VertexId, EdgeId)> + '_, GraphError> {
        let record = self.vertices.get(v.0).ok_or(GraphError::InvalidVertex)?;
        Ok(record.adjacency.iter().copied())
    }

    /// Iterates the edges incident to `v`, each exactly once.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if the handle is stale or foreign.
    pub fn incident_edges(
        &self,
        v: VertexId,
    ) -> Result<impl Iterator<Item = EdgeId> + '_, GraphError> {
        Ok(self.neighbors(v)?.map(|(_, edge)| edge))
    }

    /// Iterates all vertex handles in slot order.
    ///
    /// Slot order equals insertion order until a removal recycles a slot.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|(key, _)| VertexId(key))
    }

    /// Iterates `(handle, payload)` for every vertex.
    pub fn vertex_entries(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.vertices
            .iter()
            .map(|(key, record)| (VertexId(key), &record.payload))
    }

    /// Iterates all edge handles, each edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|(key, _)| EdgeId(key))
    }

    /// Iterates `(handle, payload)` for every edge, each edge exactly once.
    pub fn edge_entries(&self) -> impl Iterator<Item = (EdgeId, &E)> + '_ {
        self.edges
            .iter()
            .map(|(key, record)| (EdgeId(key), &record.payload))
    }

    /// First vertex whose payload satisfies `predicate`, in slot order.
    pub fn find_vertex_by(&self, mut predicate: impl FnMut(&V) -> bool) -> Option<VertexId> {
        self.vertex_entries()
            .find(|&(_, payload)| predicate(payload))
            .map(|(id, _)| id)
    }

    /// First edge whose payload satisfies `predicate`, in slot order.
    pub fn find_edge_by(&self, mut predicate: impl FnMut(&E) -> bool) -> Option<EdgeId> {
        self.edge_entries()
            .find(|&(_, payload)| predicate(payload))
            .map(|(id, _)| id)
    }

    /// Adds a vertex holding `payload`.
    ///
    /// # Errors
    /// [`GraphError::DuplicateVertex`] if an existing vertex payload compares
    /// equal to `payload`.
    pub fn insert_vertex(&mut self, payload: V) -> Result<VertexId, GraphError>
    where
        V: PartialEq,
    {
        if self
            .vertices
            .iter()
            .any(|(_, record)| record.payload == payload)
        {
            return Err(GraphError::DuplicateVertex);
        }
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        let key = self.vertices.insert(VertexRecord {
            payload,
            stamp,
            adjacency: Vec::new(),
        });
        Ok(VertexId(key))
    }

    /// Adds an edge joining `u` and `v` (a self-loop when `u == v`).
    ///
    /// The edge is registered in both endpoints' adjacency, once for a
    /// self-loop.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if either handle is stale or foreign;
    /// [`GraphError::DuplicateEdge`] if an existing edge payload compares
    /// equal to `payload`, or if `u` and `v` are already joined.
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, payload: E) -> Result<EdgeId, GraphError>
    where
        E: PartialEq,
    {
        if !self.vertices.contains(u.0) || !self.vertices.contains(v.0) {
            return Err(GraphError::InvalidVertex);
        }
        if self
            .edges
            .iter()
            .any(|(_, record)| record.payload == payload)
        {
            return Err(GraphError::DuplicateEdge);
        }
        if self
            .adjacency_slice(u)
            .iter()
            .any(|&(neighbor, _)| neighbor == v)
        {
            return Err(GraphError::DuplicateEdge);
        }

        let edge = EdgeId(self.edges.insert(EdgeRecord {
            payload,
            endpoints: [u, v],
        }));
        if let Some(record) = self.vertices.get_mut(u.0) {
            record.adjacency.push((v, edge));
        }
        if u != v {
            if let Some(record) = self.vertices.get_mut(v.0) {
                record.adjacency.push((u, edge));
            }
        }
        Ok(edge)
    }

    /// Removes `v`, its incident edges, and every adjacency entry that
    /// referenced it, returning the vertex payload.
    ///
    /// [`num_edges`](Self::num_edges) decreases by the prior degree of `v`;
    /// handles to the dropped edges go stale.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if the handle is stale or foreign; the
    /// graph is unchanged on error.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<V, GraphError> {
        let record = self.vertices.remove(v.0).ok_or(GraphError::InvalidVertex)?;
        for &(neighbor, edge) in &record.adjacency {
            self.edges.remove(edge.0);
            if neighbor == v {
                continue;
            }
            if let Some(other) = self.vertices.get_mut(neighbor.0) {
                other.adjacency.retain(|&(_, e)| e != edge);
            }
        }
        Ok(record.payload)
    }

    /// Removes `e`, unregistering it from both endpoints, and returns its
    /// payload.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if the handle is stale or foreign; the
    /// graph is unchanged on error.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<E, GraphError> {
        let record = self.edges.remove(e.0).ok_or(GraphError::InvalidEdge)?;
        let [u, v] = record.endpoints;
        if let Some(rec) = self.vertices.get_mut(u.0) {
            rec.adjacency.retain(|&(_, edge)| edge != e);
        }
        if u != v {
            if let Some(rec) = self.vertices.get_mut(v.0) {
                rec.adjacency.retain(|&(_, edge)| edge != e);
            }
        }
        Ok(record.payload)
    }

    /// Swaps the payload of `v` for `payload`, returning the previous one.
    ///
    /// Identity and adjacency are untouched; no duplicate check is applied.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if the handle is stale or foreign.
    pub fn replace_vertex_payload(&mut self, v: VertexId, payload: V) -> Result<V, GraphError> {
        let record = self.vertices.get_mut(v.0).ok_or(GraphError::InvalidVertex)?;
        Ok(core::mem::replace(&mut record.payload, payload))
    }

    /// Swaps the payload of `e` for `payload`, returning the previous one.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if the handle is stale or foreign.
    pub fn replace_edge_payload(&mut self, e: EdgeId, payload: E) -> Result<E, GraphError> {
        let record = self.edges.get_mut(e.0).ok_or(GraphError::InvalidEdge)?;
        Ok(core::mem::replace(&mut record.payload, payload))
    }

    /// All vertices ranked by degree descending; ties keep insertion order.
    pub fn rank_by_degree(&self) -> Vec<(VertexId, usize)> {
        let mut ranked: Vec<(u64, VertexId, usize)> = self
            .vertices
            .iter()
            .map(|(key, record)| (record.stamp, VertexId(key), record.adjacency.len()))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .map(|(_, id, degree)| (id, degree))
            .collect()
    }

    /// Payloads of the `k` highest-degree vertices, descending, ties stable
    /// by insertion order.
    pub fn top_k_by_degree(&self, k: usize) -> Vec<&V> {
        self.rank_by_degree()
            .into_iter()
            .take(k)
            .filter_map(|(id, _)| self.vertices.get(id.0).map(|record| &record.payload))
            .collect()
    }

    /// Removes every vertex and edge.
    ///
    /// All previously issued handles go stale.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    pub(crate) fn adjacency_slice(&self, v: VertexId) -> &[(VertexId, EdgeId)] {
        self.vertices
            .get(v.0)
            .map_or(&[], |record| record.adjacency.as_slice())
    }

    pub(crate) fn vertex_slot_bound(&self) -> usize {
        self.vertices.slot_bound()
    }

    /// Checks the structural invariants: adjacency symmetry, endpoint
    /// liveness, and agreement between the adjacency index and the edge
    /// store. Intended for tests and debug assertions.
    #[cfg(debug_assertions)]
    pub fn validate_invariants(&self) -> bool {
        for (key, record) in self.vertices.iter() {
            let v = VertexId(key);
            for &(neighbor, edge) in &record.adjacency {
                if !self.vertices.contains(neighbor.0) {
                    return false;
                }
                let Some(edge_record) = self.edges.get(edge.0) else {
                    return false;
                };
                let [a, b] = edge_record.endpoints;
                if !(a == v && b == neighbor || a == neighbor && b == v) {
                    return false;
                }
            }
        }
        for (key, record) in self.edges.iter() {
            let e = EdgeId(key);
            let [u, v] = record.endpoints;
            let on_u = self
                .adjacency_slice(u)
                .iter()
                .filter(|&&(_, edge)| edge == e)
                .count();
            if on_u != 1 {
                return false;
            }
            if u != v {
                let on_v = self
                    .adjacency_slice(v)
                    .iter()
                    .filter(|&&(_, edge)| edge == e)
                    .count();
                if on_v != 1 {
                    return false;
                }
            }
        }
        let entries: usize = self
            .vertices
            .iter()
            .map(|(_, record)| record.adjacency.len())
            .sum();
        let loops = self
            .edges
            .iter()
            .filter(|(_, record)| record.endpoints[0] == record.endpoints[1])
            .count();
        entries == 2 * (self.edges.len() - loops) + loops
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five vertices A..E and edges e1(A-B), e2(A-C), e3(C-B), e4(E-D),
    /// e5(E-C).
    fn sample() -> (
        Graph<&'static str, &'static str>,
        Vec<VertexId>,
        Vec<EdgeId>,
    ) {
        let mut graph = Graph::new();
        let a = graph.insert_vertex("A").unwrap();
        let b = graph.insert_vertex("B").unwrap();
        let c = graph.insert_vertex("C").unwrap();
        let d = graph.insert_vertex("D").unwrap();
        let e = graph.insert_vertex("E").unwrap();
        let e1 = graph.insert_edge(a, b, "e1").unwrap();
        let e2 = graph.insert_edge(a, c, "e2").unwrap();
        let e3 = graph.insert_edge(c, b, "e3").unwrap();
        let e4 = graph.insert_edge(e, d, "e4").unwrap();
        let e5 = graph.insert_edge(e, c, "e5").unwrap();
        (graph, vec![a, b, c, d, e], vec![e1, e2, e3, e4, e5])
    }

    #[test]
    fn empty_graph_has_no_elements() {
        let graph: Graph<&str, &str> = Graph::new();
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.vertices().count(), 0);
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn construction_counts() {
        let (graph, vs, es) = sample();
        assert_eq!(graph.num_vertices(), 5);
        assert_eq!(graph.num_edges(), 5);
        assert!(vs.iter().all(|&v| graph.contains_vertex(v)));
        assert!(es.iter().all(|&e| graph.contains_edge(e)));
    }

    #[test]
    fn vertices_iterate_in_insertion_order() {
        let (graph, _, _) = sample();
        let names: Vec<&str> = graph.vertex_entries().map(|(_, name)| *name).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn insert_vertex_rejects_duplicate_payload() {
        let (mut graph, _, _) = sample();
        assert_eq!(graph.insert_vertex("C"), Err(GraphError::DuplicateVertex));
        assert_eq!(graph.num_vertices(), 5);
    }

    #[test]
    fn insert_edge_registers_symmetrically() {
        let (graph, vs, es) = sample();
        let (a, b) = (vs[0], vs[1]);
        assert!(graph.are_adjacent(a, b).unwrap());
        assert!(graph.are_adjacent(b, a).unwrap());
        let on_a: Vec<EdgeId> = graph.incident_edges(a).unwrap().collect();
        let on_b: Vec<EdgeId> = graph.incident_edges(b).unwrap().collect();
        assert!(on_a.contains(&es[0]));
        assert!(on_b.contains(&es[0]));
    }

    #[test]
    fn insert_edge_rejects_duplicate_payload() {
        let (mut graph, vs, _) = sample();
        // "e1" already joins A and B; reusing the payload elsewhere fails.
        assert_eq!(
            graph.insert_edge(vs[3], vs[4], "e1"),
            Err(GraphError::DuplicateEdge)
        );
        assert_eq!(graph.num_edges(), 5);
    }

    #[test]
    fn insert_edge_rejects_second_edge_between_pair() {
        let (mut graph, vs, _) = sample();
        assert_eq!(
            graph.insert_edge(vs[0], vs[1], "fresh payload"),
            Err(GraphError::DuplicateEdge)
        );
        assert_eq!(
            graph.insert_edge(vs[1], vs[0], "other direction"),
            Err(GraphError::DuplicateEdge)
        );
    }

    #[test]
    fn insert_edge_rejects_stale_endpoint() {
        let (mut graph, vs, _) = sample();
        let d = vs[3];
        graph.remove_vertex(d).unwrap();
        assert_eq!(
            graph.insert_edge(vs[0], d, "dangling"),
            Err(GraphError::InvalidVertex)
        );
    }

    #[test]
    fn self_loop_registers_once() {
        let mut graph: Graph<&str, &str> = Graph::new();
        let a = graph.insert_vertex("A").unwrap();
        let loop_edge = graph.insert_edge(a, a, "loop").unwrap();

        assert_eq!(graph.degree(a).unwrap(), 1);
        assert!(graph.are_adjacent(a, a).unwrap());
        assert_eq!(graph.opposite(a, loop_edge).unwrap(), a);
        assert_eq!(graph.num_edges(), 1);

        graph.remove_vertex(a).unwrap();
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn opposite_requires_incidence() {
        let (graph, vs, es) = sample();
        // e1 joins A and B; D is not an endpoint.
        assert_eq!(graph.opposite(vs[3], es[0]), Err(GraphError::InvalidEdge));
        assert_eq!(graph.opposite(vs[0], es[0]).unwrap(), vs[1]);
        assert_eq!(graph.opposite(vs[1], es[0]).unwrap(), vs[0]);
    }

    #[test]
    fn endpoints_keep_insertion_orientation() {
        let (graph, vs, es) = sample();
        assert_eq!(graph.endpoints(es[3]).unwrap(), (vs[4], vs[3]));
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let (mut graph, vs, es) = sample();
        let c = vs[2];
        let prior_degree = graph.degree(c).unwrap();
        assert_eq!(prior_degree, 3);

        let payload = graph.remove_vertex(c).unwrap();
        assert_eq!(payload, "C");
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 5 - prior_degree);

        // No surviving adjacency entry references C.
        for v in graph.vertices() {
            for (neighbor, _) in graph.neighbors(v).unwrap() {
                assert_ne!(neighbor, c);
            }
        }
        // Handles to the dropped edges are stale.
        assert_eq!(graph.edge(es[1]), Err(GraphError::InvalidEdge));
        assert_eq!(graph.edge(es[2]), Err(GraphError::InvalidEdge));
        assert_eq!(graph.edge(es[4]), Err(GraphError::InvalidEdge));
        // The untouched edge survives.
        assert_eq!(graph.edge(es[3]).unwrap(), &"e4");
    }

    #[test]
    fn remove_vertex_rejects_stale_handle() {
        let (mut graph, vs, _) = sample();
        graph.remove_vertex(vs[3]).unwrap();
        assert_eq!(graph.remove_vertex(vs[3]), Err(GraphError::InvalidVertex));
    }

    #[test]
    fn remove_edge_unregisters_both_endpoints() {
        let (mut graph, vs, es) = sample();
        assert_eq!(graph.remove_edge(es[0]).unwrap(), "e1");
        assert_eq!(graph.num_edges(), 4);
        assert!(!graph.are_adjacent(vs[0], vs[1]).unwrap());
        assert_eq!(graph.degree(vs[0]).unwrap(), 1);
        assert_eq!(graph.degree(vs[1]).unwrap(), 1);
        assert_eq!(graph.remove_edge(es[0]), Err(GraphError::InvalidEdge));
    }

    #[test]
    fn edge_between_finds_the_connecting_edge() {
        let (graph, vs, es) = sample();
        assert_eq!(graph.edge_between(vs[0], vs[1]).unwrap(), Some(es[0]));
        assert_eq!(graph.edge_between(vs[1], vs[0]).unwrap(), Some(es[0]));
        assert_eq!(graph.edge_between(vs[0], vs[3]).unwrap(), None);
    }

    #[test]
    fn replace_payload_returns_previous() {
        let (mut graph, vs, es) = sample();
        assert_eq!(graph.replace_vertex_payload(vs[0], "A2").unwrap(), "A");
        assert_eq!(graph.vertex(vs[0]).unwrap(), &"A2");
        assert_eq!(graph.replace_edge_payload(es[0], "e1b").unwrap(), "e1");
        assert_eq!(graph.edge(es[0]).unwrap(), &"e1b");
    }

    #[test]
    fn find_by_payload_scans_in_order() {
        let (graph, vs, es) = sample();
        assert_eq!(graph.find_vertex_by(|name| *name == "D"), Some(vs[3]));
        assert_eq!(graph.find_vertex_by(|name| *name == "Z"), None);
        assert_eq!(graph.find_edge_by(|label| *label == "e5"), Some(es[4]));
    }

    #[test]
    fn top_k_by_degree_ranks_and_breaks_ties_by_insertion() {
        let (graph, _, _) = sample();
        // Degrees: A=2, B=2, C=3, D=1, E=2. Ties at 2 keep insertion order.
        assert_eq!(graph.top_k_by_degree(3), vec![&"C", &"A", &"B"]);
        assert_eq!(
            graph.top_k_by_degree(10),
            vec![&"C", &"A", &"B", &"E", &"D"]
        );
        assert!(graph.top_k_by_degree(0).is_empty());
    }

    #[test]
    fn stale_vertex_handle_survives_slot_reuse() {
        let (mut graph, vs, _) = sample();
        let b = vs[1];
        graph.remove_vertex(b).unwrap();
        let f = graph.insert_vertex("F").unwrap();

        // F reuses B's slot but B's handle stays dead.
        assert_eq!(graph.vertex(b), Err(GraphError::InvalidVertex));
        assert_eq!(graph.vertex(f).unwrap(), &"F");
        assert_eq!(graph.degree(b), Err(GraphError::InvalidVertex));
    }

    #[test]
    fn clear_stales_all_handles() {
        let (mut graph, vs, es) = sample();
        graph.clear();
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.vertex(vs[0]), Err(GraphError::InvalidVertex));
        assert_eq!(graph.edge(es[0]), Err(GraphError::InvalidEdge));

        let a = graph.insert_vertex("A").unwrap();
        assert_eq!(graph.vertex(a).unwrap(), &"A");
        assert_ne!(a, vs[0]);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn invariants_hold_across_mutations() {
        let (mut graph, vs, es) = sample();
        assert!(graph.validate_invariants());
        graph.remove_edge(es[0]).unwrap();
        assert!(graph.validate_invariants());
        graph.remove_vertex(vs[2]).unwrap();
        assert!(graph.validate_invariants());
        let f = graph.insert_vertex("F").unwrap();
        graph.insert_edge(f, vs[3], "e6").unwrap();
        assert!(graph.validate_invariants());
        graph.clear();
        assert!(graph.validate_invariants());
    }
}
