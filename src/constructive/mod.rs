//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor construction, O(n²)
//! - [`NearestNeighborTwoOpt`] — Construction followed by 2-opt refinement

mod nearest_neighbor;

pub use nearest_neighbor::{nearest_neighbor, NearestNeighborTwoOpt};
