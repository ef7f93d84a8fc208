//! Error taxonomy for tour solving.

use thiserror::Error;

use crate::solver::Strategy;

/// Errors raised while validating or executing a solve request.
///
/// None of these are used for control flow inside the solvers: "no improving
/// move" or "population stagnated" are ordinary loop exits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Too few cities for the chosen strategy to produce a meaningful tour.
    #[error("{strategy} needs at least {required} cities, got {actual}")]
    InsufficientCities {
        strategy: Strategy,
        required: usize,
        actual: usize,
    },

    /// An exact strategy was given more cities than its tractability ceiling.
    #[error("{strategy} is limited to {max} cities, got {count}")]
    TooManyCities {
        strategy: Strategy,
        count: usize,
        max: usize,
    },

    /// An external distance or geometry source failed.
    #[error("upstream distance source unavailable: {0}")]
    UpstreamDistanceUnavailable(String),

    /// A strategy identifier outside the supported set.
    #[error("unknown strategy '{0}' (expected genetic, bruteforce, dynamic or approximation)")]
    UnknownStrategy(String),

    #[error("invalid distance matrix: {0}")]
    InvalidDistanceMatrix(String),

    /// The matrix was built for a different city list.
    #[error("distance matrix has {matrix} rows but {cities} cities were given")]
    MatrixSizeMismatch { matrix: usize, cities: usize },

    #[error("malformed tour: {0}")]
    MalformedTour(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The background solve task panicked or was aborted.
    #[error("solve task failed: {0}")]
    TaskFailed(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolveError>;
