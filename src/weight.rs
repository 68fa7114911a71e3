//! Edge-weight capability for path queries and weight analytics.

use core::ops::Add;

use num_traits::Zero;

/// An edge payload carrying a non-negative additive cost.
///
/// The shortest-path engine and the weight folds in
/// [`graph::analytics`](crate::graph::analytics) accept any edge payload
/// implementing this trait. `Cost::zero()` labels the source vertex, and
/// costs accumulate with `+` along a path; Dijkstra's correctness requires
/// that `weight()` never returns a value below zero, which the unsigned
/// implementations guarantee by construction.
pub trait Weighted {
    /// Additive cost type.
    type Cost: Copy + Ord + Add<Output = Self::Cost> + Zero;

    /// Cost of traversing this edge.
    fn weight(&self) -> Self::Cost;
}

impl Weighted for u32 {
    type Cost = u32;

    fn weight(&self) -> u32 {
        *self
    }
}

impl Weighted for u64 {
    type Cost = u64;

    fn weight(&self) -> u64 {
        *self
    }
}

impl Weighted for usize {
    type Cost = usize;

    fn weight(&self) -> usize {
        *self
    }
}
