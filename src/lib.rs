//! # geotour
//!
//! Travelling-salesman tours over geographic points, with exact, heuristic
//! and evolutionary strategies behind a single asynchronous dispatcher.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Point, Tour, SolveRequest, SolveResult)
//! - [`distance`] — Haversine metric, distance matrix and distance model
//! - [`evaluation`] — Tour length and permutation checks
//! - [`exact`] — Brute force and Held–Karp
//! - [`constructive`] — Nearest neighbor tour construction
//! - [`local_search`] — 2-opt improvement
//! - [`ga`] — Genetic search with ordered crossover
//! - [`solver`] — Strategy selection and the request dispatcher
//! - [`geometry`] — Upstream road geometry and distance sources
//! - [`error`] — Error type shared by every module

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod ga;
pub mod geometry;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{Result, SolveError};
