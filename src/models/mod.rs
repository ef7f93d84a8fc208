//! Domain model types for geographic tours.
//!
//! Provides named points, tours with explicit closure, and the request and
//! result types the host exchanges with the solver service.

mod point;
mod request;
mod tour;

pub use point::Point;
pub use request::{SolveRequest, SolveResult, SolveStats, StrategyParams};
pub use tour::Tour;
