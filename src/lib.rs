//! # `airlane` - Undirected Graph Routing with Undo
//!
//! A labeled undirected graph container with Dijkstra shortest-path
//! routing, wholesale snapshot undo, and an airport-network layer with a
//! tab-delimited dataset format. Built for interactive route planning at
//! the scale of hundreds of vertices.
//!
//! ## Design Guarantees
//!
//! ### Handle Safety
//! - **Generational handles**: vertex and edge handles are slot + generation
//!   pairs; a handle to a removed record is detected as stale instead of
//!   silently addressing whatever reused its slot.
//! - **Validate before mutate**: every mutation checks its handles first and
//!   either applies completely or fails with a named error, never leaving
//!   the adjacency index half-updated.
//! - **Symmetric adjacency**: an edge joining `u` and `v` is always indexed
//!   under both endpoints (once for a self-loop); debug builds can verify
//!   this with the invariant validator on [`Graph`].
//!
//! ### Deterministic Queries
//! - **Insertion-order iteration**: vertices and edges iterate in insertion
//!   order on a freshly loaded graph, and degree rankings break ties by
//!   insertion stamp, so reports are reproducible run to run.
//! - **Pinned tie-breaks**: the path engine scans its candidate pool
//!   linearly and takes the first minimum, so equal-cost choices resolve
//!   the same way every time.
//!
//! ### Reversible Mutation
//! - **Snapshot undo**: the facade captures a full structural copy before
//!   every mutation and restores it wholesale on undo; no operation needs
//!   an inverse, and a failed mutation records nothing.
//! - **Handles survive restore**: snapshots preserve slot layout, so a
//!   handle taken before a capture still resolves after the undo.
//!
//! ## Architecture
//!
//! Layered bottom-up, with the lower layers ignorant of the upper ones:
//!
//! 1. **Container** ([`graph`]): generational arenas for vertices and
//!    edges, a per-vertex neighbor-to-edge index, traversal, and read-only
//!    analytics folds.
//! 2. **Engine** ([`path`]): label-setting shortest paths and the
//!    all-pairs farthest-reachable-pair scan over any [`Weighted`] edge
//!    payload.
//! 3. **History** ([`history`]): a linear most-recent-first snapshot
//!    stack. No redo.
//! 4. **Facade** ([`network`]): airport-domain payloads, named business
//!    operations enforcing capture-before-mutate, and change events.
//! 5. **Dataset** ([`dataset`]): the tab-delimited loader and route
//!    exporter.
//!
//! ## Example
//!
//! ```rust
//! use airlane::{Airport, Network};
//!
//! let mut network = Network::new();
//! network.add_airport(Airport::new("LIS", "Lisboa"))?;
//! network.add_airport(Airport::new("POR", "Porto"))?;
//! network.add_airport(Airport::new("MIL", "Milao"))?;
//! network.add_route("Lisboa", "Porto", 400)?;
//! network.add_route("Lisboa", "Milao", 1500)?;
//!
//! let path = network.shortest_path("Porto", "Milao")?;
//! assert_eq!(path.cost(), Some(1900));
//! assert_eq!(network.path_codes(&path), ["POR", "LIS", "MIL"]);
//!
//! network.undo()?;
//! assert_eq!(network.route_count(), 1);
//! # Ok::<(), airlane::NetworkError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod dataset;
pub mod graph;
pub mod history;
pub mod network;
pub mod path;
pub mod weight;

pub use dataset::{export_routes, AirportRecord, Dataset, DatasetError, RouteRecord};
pub use graph::{depth_first_reachable, Dfs, EdgeId, Graph, GraphError, VertexId};
pub use history::{History, HistoryError, Snapshot};
pub use network::{Airport, GeoPoint, LoadReport, Network, NetworkError, NetworkEvent, Route};
pub use path::{farthest_pair, shortest_path, PathResult};
pub use weight::Weighted;

// Compile-time assertions for handle and error layout
const _: () = {
    use core::mem;

    // Handles are a u32 slot index plus a u32 generation, passed in
    // registers.
    assert!(mem::size_of::<VertexId>() == 8);
    assert!(mem::size_of::<EdgeId>() == 8);

    // Error kinds stay trivially copyable.
    assert!(mem::size_of::<GraphError>() == 1);
    assert!(mem::size_of::<HistoryError>() == 0);

    // A path result is a cost plus one vector; loose upper bound to avoid
    // platform brittleness while catching accidental growth.
    assert!(mem::size_of::<PathResult<u32>>() <= mem::size_of::<usize>() * 5);
};
