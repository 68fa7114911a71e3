use airlane::{depth_first_reachable, Graph, GraphError, VertexId};

/// Star around `hub` plus one spoke-to-spoke edge and one lone vertex.
fn build_sample() -> (Graph<&'static str, u32>, Vec<VertexId>) {
    let mut graph = Graph::new();
    let hub = graph.insert_vertex("hub").unwrap();
    let north = graph.insert_vertex("north").unwrap();
    let south = graph.insert_vertex("south").unwrap();
    let east = graph.insert_vertex("east").unwrap();
    let lone = graph.insert_vertex("lone").unwrap();
    graph.insert_edge(hub, north, 10).unwrap();
    graph.insert_edge(hub, south, 20).unwrap();
    graph.insert_edge(hub, east, 30).unwrap();
    graph.insert_edge(north, south, 40).unwrap();
    (graph, vec![hub, north, south, east, lone])
}

#[test]
fn test_edges_register_symmetrically() {
    let (graph, vs) = build_sample();
    let (hub, north) = (vs[0], vs[1]);

    assert!(graph.are_adjacent(hub, north).unwrap());
    assert!(graph.are_adjacent(north, hub).unwrap());

    let edge = graph.edge_between(hub, north).unwrap().unwrap();
    assert!(graph.incident_edges(hub).unwrap().any(|e| e == edge));
    assert!(graph.incident_edges(north).unwrap().any(|e| e == edge));
    assert_eq!(graph.opposite(hub, edge).unwrap(), north);
    assert_eq!(graph.opposite(north, edge).unwrap(), hub);
}

#[test]
fn test_vertex_removal_drops_exactly_its_degree() {
    let (mut graph, vs) = build_sample();
    let hub = vs[0];
    let degree = graph.degree(hub).unwrap();
    let edges_before = graph.num_edges();

    let payload = graph.remove_vertex(hub).unwrap();
    assert_eq!(payload, "hub");
    assert_eq!(graph.num_edges(), edges_before - degree);
    assert!(!graph.contains_vertex(hub));

    // No surviving vertex still references the removed one.
    for v in graph.vertices() {
        for (neighbor, _) in graph.neighbors(v).unwrap() {
            assert_ne!(neighbor, hub);
        }
    }
    #[cfg(debug_assertions)]
    assert!(graph.validate_invariants());
}

#[test]
fn test_duplicate_payloads_are_rejected() {
    let (mut graph, vs) = build_sample();
    assert_eq!(
        graph.insert_vertex("hub").unwrap_err(),
        GraphError::DuplicateVertex
    );
    // Same pair again, either orientation.
    assert_eq!(
        graph.insert_edge(vs[0], vs[1], 99).unwrap_err(),
        GraphError::DuplicateEdge
    );
    assert_eq!(
        graph.insert_edge(vs[1], vs[0], 99).unwrap_err(),
        GraphError::DuplicateEdge
    );
    // Same payload on a fresh pair.
    assert_eq!(
        graph.insert_edge(vs[3], vs[4], 10).unwrap_err(),
        GraphError::DuplicateEdge
    );
}

#[test]
fn test_stale_handles_are_detected_after_reuse() {
    let (mut graph, vs) = build_sample();
    let lone = vs[4];
    graph.remove_vertex(lone).unwrap();

    // The freed slot is recycled with a new generation.
    let fresh = graph.insert_vertex("fresh").unwrap();
    assert_ne!(lone, fresh);
    assert_eq!(graph.vertex(lone).unwrap_err(), GraphError::InvalidVertex);
    assert_eq!(graph.vertex(fresh).unwrap(), &"fresh");
    assert_eq!(graph.degree(lone).unwrap_err(), GraphError::InvalidVertex);
}

#[test]
fn test_replace_payload_keeps_identity() {
    let (mut graph, vs) = build_sample();
    let east = vs[3];
    let edge = graph.edge_between(vs[0], east).unwrap().unwrap();

    assert_eq!(graph.replace_vertex_payload(east, "west").unwrap(), "east");
    assert_eq!(graph.replace_edge_payload(edge, 35).unwrap(), 30);
    assert_eq!(graph.vertex(east).unwrap(), &"west");
    assert_eq!(graph.edge(edge).unwrap(), &35);
    assert!(graph.are_adjacent(vs[0], east).unwrap());
}

#[test]
fn test_top_k_ranks_by_degree_with_insertion_ties() {
    let (graph, _) = build_sample();
    // Degrees: hub 3, north 2, south 2, east 1, lone 0. north precedes
    // south by insertion.
    assert_eq!(
        graph.top_k_by_degree(3),
        vec![&"hub", &"north", &"south"]
    );
    assert_eq!(graph.top_k_by_degree(0), Vec::<&&str>::new());
    assert_eq!(graph.top_k_by_degree(99).len(), 5);
}

#[test]
fn test_depth_first_covers_exactly_one_component() {
    let (graph, vs) = build_sample();
    let reached = depth_first_reachable(&graph, vs[0]).unwrap();
    assert_eq!(reached.len(), 4);
    assert!(!reached.contains(&vs[4]));

    let from_lone = depth_first_reachable(&graph, vs[4]).unwrap();
    assert_eq!(from_lone, vec![vs[4]]);
}

#[test]
fn test_self_loop_registers_once() {
    let mut graph: Graph<&str, u32> = Graph::new();
    let v = graph.insert_vertex("v").unwrap();
    let loop_edge = graph.insert_edge(v, v, 7).unwrap();

    assert_eq!(graph.degree(v).unwrap(), 1);
    assert_eq!(graph.num_edges(), 1);
    assert_eq!(graph.opposite(v, loop_edge).unwrap(), v);
    assert!(graph.are_adjacent(v, v).unwrap());

    let mut graph2 = graph.clone();
    assert_eq!(graph2.remove_edge(loop_edge).unwrap(), 7);
    assert_eq!(graph2.degree(v).unwrap(), 0);
    assert_eq!(graph2.num_edges(), 0);
}

#[test]
fn test_edges_are_deduplicated_across_the_index() {
    let (graph, _) = build_sample();
    // Four insertions, four edges, despite double registration in the
    // adjacency index.
    assert_eq!(graph.edges().count(), 4);
    assert_eq!(graph.num_edges(), 4);
}

#[test]
fn test_clear_invalidates_outstanding_handles() {
    let (mut graph, vs) = build_sample();
    graph.clear();
    assert_eq!(graph.num_vertices(), 0);
    assert_eq!(graph.num_edges(), 0);
    for &v in &vs {
        assert!(!graph.contains_vertex(v));
    }

    // Fresh inserts reuse slots under new generations.
    let reborn = graph.insert_vertex("reborn").unwrap();
    assert!(graph.contains_vertex(reborn));
    assert!(!vs.contains(&reborn));
}
