//! Strategy selection and request dispatch.
//!
//! - [`Strategy`] — The four strategy identifiers and their city bounds
//! - [`TourSolver`] — Common capability every strategy implements
//! - [`SolverConfig`] — Session-level ceilings and genetic defaults
//! - [`SolverService`] — Validates requests and solves each on its own task

mod config;
mod service;
mod strategy;

pub use config::SolverConfig;
pub use service::{sample_cities, strip_closing_point, SolveHandle, SolverService};
pub use strategy::{SolverRun, Strategy, TourSolver};
