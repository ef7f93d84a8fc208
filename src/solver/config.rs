//! Session-level solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};
use crate::exact::{BRUTE_FORCE_MAX_CITIES, HELD_KARP_MAX_CITIES};
use crate::ga::GeneticConfig;

/// Highest brute-force ceiling a session may configure.
const BRUTE_FORCE_CEILING_LIMIT: usize = 12;

/// Highest Held–Karp ceiling a session may configure.
const HELD_KARP_CEILING_LIMIT: usize = 16;

/// Configuration shared by every request of a [`SolverService`](super::SolverService).
///
/// # Examples
///
/// ```
/// use geotour::solver::SolverConfig;
///
/// let config: SolverConfig = serde_json::from_str(r#"{"held_karp_max_cities": 12}"#).unwrap();
/// assert_eq!(config.held_karp_max_cities, 12);
/// assert_eq!(config.brute_force_max_cities, 9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tractability ceiling for brute force.
    pub brute_force_max_cities: usize,
    /// Tractability ceiling for Held–Karp.
    pub held_karp_max_cities: usize,
    /// Genetic parameters used when a request does not supply its own.
    pub genetic: GeneticConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            brute_force_max_cities: BRUTE_FORCE_MAX_CITIES,
            held_karp_max_cities: HELD_KARP_MAX_CITIES,
            genetic: GeneticConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Sets the brute-force ceiling.
    pub fn with_brute_force_max_cities(mut self, n: usize) -> Self {
        self.brute_force_max_cities = n;
        self
    }

    /// Sets the Held–Karp ceiling.
    pub fn with_held_karp_max_cities(mut self, n: usize) -> Self {
        self.held_karp_max_cities = n;
        self
    }

    /// Sets the default genetic parameters.
    pub fn with_genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = genetic;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.brute_force_max_cities > BRUTE_FORCE_CEILING_LIMIT {
            return Err(SolveError::InvalidConfig(format!(
                "brute_force_max_cities must be at most {BRUTE_FORCE_CEILING_LIMIT}"
            )));
        }
        if self.held_karp_max_cities > HELD_KARP_CEILING_LIMIT {
            return Err(SolveError::InvalidConfig(format!(
                "held_karp_max_cities must be at most {HELD_KARP_CEILING_LIMIT}"
            )));
        }
        self.genetic.validate()
    }
}
