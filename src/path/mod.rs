//! Least-cost routing over weighted graphs.
//!
//! The engine consumes a [`Graph`](crate::graph::Graph) whose edge payload
//! implements [`Weighted`](crate::weight::Weighted) and produces
//! [`PathResult`] values. "No path exists" is an expected outcome and comes
//! back as a sentinel result, never as an error; errors are reserved for
//! stale or foreign handles.

mod dijkstra;
mod result;

pub use dijkstra::{farthest_pair, shortest_path};
pub use result::PathResult;
