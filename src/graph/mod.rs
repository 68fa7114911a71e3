//! Graph storage, traversal, and read-only analytics.
//!
//! The module is organized into layers:
//! - `adjacency`: the labeled undirected container and its handles
//! - `traversal`: iterative walkers over the adjacency index
//! - `analytics`: pure structural folds (degrees, weights, summaries)
//!
//! The slot arena backing vertex and edge storage stays private; callers
//! only ever see [`VertexId`] and [`EdgeId`] handles.

mod arena;

pub mod adjacency;
pub mod analytics;
pub mod traversal;

// Re-export the types nearly every caller needs.
pub use adjacency::{EdgeId, Graph, GraphError, VertexId};
pub use traversal::{depth_first_reachable, Dfs};
