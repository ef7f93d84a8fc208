//! Strategy identifiers and the common solver capability.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SolverConfig;
use crate::constructive::NearestNeighborTwoOpt;
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::exact::{BruteForce, HeldKarp};
use crate::ga::{GeneticSearch, GENETIC_MIN_CITIES};
use crate::models::StrategyParams;

/// Raw output of a solver: an open order over matrix indices plus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverRun {
    /// Visiting order, a permutation of `0..n`.
    pub order: Vec<usize>,
    /// Generations executed (genetic search only).
    pub generations: Option<usize>,
    /// Whether the run ended on stagnation (genetic search only).
    pub stagnated: Option<bool>,
    /// Accepted local-search moves (approximation only).
    pub improvements: Option<usize>,
}

impl SolverRun {
    /// Creates a run result carrying only an order.
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }
}

/// A tour-construction algorithm over an index-keyed distance matrix.
///
/// Implementations own no state across calls: every `solve` allocates and
/// drops its own search structures.
pub trait TourSolver: Send + Sync {
    /// Computes an open visiting order over all `distances.size()` cities.
    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverRun>;
}

/// The four supported solving strategies.
///
/// Identifiers are exactly `genetic`, `bruteforce`, `dynamic` and
/// `approximation`.
///
/// # Examples
///
/// ```
/// use geotour::solver::Strategy;
///
/// let s: Strategy = "dynamic".parse().unwrap();
/// assert_eq!(s, Strategy::Dynamic);
/// assert_eq!(s.to_string(), "dynamic");
/// assert!("annealing".parse::<Strategy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Population-based search with early stopping.
    Genetic,
    /// Exhaustive permutation enumeration.
    BruteForce,
    /// Held–Karp dynamic programming.
    Dynamic,
    /// Nearest neighbor followed by 2-opt.
    Approximation,
}

impl Strategy {
    /// All strategies, in identifier order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Genetic,
        Strategy::BruteForce,
        Strategy::Dynamic,
        Strategy::Approximation,
    ];

    /// The wire identifier of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Genetic => "genetic",
            Strategy::BruteForce => "bruteforce",
            Strategy::Dynamic => "dynamic",
            Strategy::Approximation => "approximation",
        }
    }

    /// Returns `true` for strategies guaranteed to find the optimum.
    pub fn is_exact(&self) -> bool {
        matches!(self, Strategy::BruteForce | Strategy::Dynamic)
    }

    /// Fewest cities the strategy accepts.
    pub fn min_cities(&self) -> usize {
        match self {
            Strategy::Genetic => GENETIC_MIN_CITIES,
            Strategy::BruteForce | Strategy::Dynamic | Strategy::Approximation => 2,
        }
    }

    /// Largest city count the strategy accepts under `config`, if bounded.
    pub fn max_cities(&self, config: &SolverConfig) -> Option<usize> {
        match self {
            Strategy::BruteForce => Some(config.brute_force_max_cities),
            Strategy::Dynamic => Some(config.held_karp_max_cities),
            Strategy::Genetic | Strategy::Approximation => None,
        }
    }

    /// Builds the solver for this strategy.
    ///
    /// Request-level `params` take precedence over the session `config`.
    pub fn solver(&self, config: &SolverConfig, params: &StrategyParams) -> Box<dyn TourSolver> {
        match self {
            Strategy::Genetic => {
                let genetic = params.genetic.clone().unwrap_or_else(|| config.genetic.clone());
                Box::new(GeneticSearch::new(genetic))
            }
            Strategy::BruteForce => Box::new(BruteForce::new(config.brute_force_max_cities)),
            Strategy::Dynamic => Box::new(HeldKarp::new(config.held_karp_max_cities)),
            Strategy::Approximation => Box::new(NearestNeighborTwoOpt),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| SolveError::UnknownStrategy(s.to_string()))
    }
}
