//! Genetic algorithm components for tour search.
//!
//! - [`Chromosome`] — Permutation of city indices with cached loop length
//! - [`GeneticConfig`] — Population, generation, mutation and stopping parameters
//! - [`operators`] — Ordered crossover and segment-reversal mutation
//! - [`GeneticSearch`] — [`TourSolver`](crate::solver::TourSolver) running the evolutionary loop

mod chromosome;
mod config;
pub mod operators;
mod runner;

pub use chromosome::Chromosome;
pub use config::GeneticConfig;
pub use runner::{GeneticSearch, GENETIC_MIN_CITIES};
