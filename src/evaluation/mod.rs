//! Tour metrics: total length, loop closure, and permutation checks.

mod metrics;

pub use metrics::{close_loop, is_permutation, order_distance, total_distance};
