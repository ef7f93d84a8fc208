//! Solve request and result types exchanged with the host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Point, Tour};
use crate::distance::DistanceModel;
use crate::ga::GeneticConfig;
use crate::solver::Strategy;

/// Per-request strategy parameters.
///
/// Fields left as `None` fall back to the session's
/// [`SolverConfig`](crate::solver::SolverConfig).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Overrides for the genetic search.
    pub genetic: Option<GeneticConfig>,
}

/// A request to compute a tour over `cities` with the given strategy.
///
/// # Examples
///
/// ```
/// use geotour::models::{Point, SolveRequest};
/// use geotour::solver::Strategy;
///
/// let req = SolveRequest::new(
///     vec![Point::new("a", 0.0, 0.0), Point::new("b", 0.0, 1.0)],
///     Strategy::Dynamic,
/// );
/// assert_eq!(req.cities.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Cities to visit; a repeated closing point is tolerated and stripped.
    pub cities: Vec<Point>,
    pub strategy: Strategy,
    #[serde(default)]
    pub params: StrategyParams,
    /// Where edge lengths come from. Geodesic unless the host supplies a matrix.
    #[serde(default)]
    pub distance_model: DistanceModel,
}

impl SolveRequest {
    /// Creates a request using the geodesic metric and default parameters.
    pub fn new(cities: Vec<Point>, strategy: Strategy) -> Self {
        Self {
            cities,
            strategy,
            params: StrategyParams::default(),
            distance_model: DistanceModel::Geodesic,
        }
    }

    /// Sets the strategy parameters.
    pub fn with_params(mut self, params: StrategyParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the distance model.
    pub fn with_distance_model(mut self, model: DistanceModel) -> Self {
        self.distance_model = model;
        self
    }
}

/// Counters describing how a solve went.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolveStats {
    /// Wall-clock time spent in the solver.
    pub elapsed: Duration,
    /// Generations run by the genetic search.
    pub generations: Option<usize>,
    /// Whether the genetic search stopped on stagnation.
    pub stagnated: Option<bool>,
    /// Accepted 2-opt reversals.
    pub improvements: Option<usize>,
}

/// The outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    pub strategy: Strategy,
    /// Closed tour starting and ending at the same city.
    pub tour: Tour,
    /// Open visiting order as indices into the request's city list.
    pub order: Vec<usize>,
    /// Loop length under the request's distance model.
    pub total_distance: f64,
    pub stats: SolveStats,
}
