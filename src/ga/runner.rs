//! Genetic search evolutionary loop.
//!
//! [`GeneticSearch`] runs: distinct random initial population → sort →
//! keep best half → refill with crossover/mutation children → repeat, until
//! the generation budget is spent or the best distance stagnates.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::chromosome::Chromosome;
use super::config::GeneticConfig;
use super::operators::{ordered_crossover, random_permutation, reverse_segment};
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::evaluation::is_permutation;
use crate::solver::{SolverRun, Strategy, TourSolver};

/// Fewest cities for which crossover is meaningful.
pub const GENETIC_MIN_CITIES: usize = 3;

/// Population-based stochastic solver with early stopping.
///
/// With a fixed [`seed`](GeneticConfig::seed), repeated runs on the same
/// input return the same tour.
///
/// # Examples
///
/// ```
/// use geotour::distance::DistanceMatrix;
/// use geotour::ga::{GeneticConfig, GeneticSearch};
/// use geotour::solver::TourSolver;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 5.0, 1.0],
///     vec![1.0, 0.0, 1.0, 5.0],
///     vec![5.0, 1.0, 0.0, 1.0],
///     vec![1.0, 5.0, 1.0, 0.0],
/// ]).unwrap();
/// let search = GeneticSearch::new(GeneticConfig::default().with_seed(42));
/// let run = search.solve(&dm).unwrap();
/// assert_eq!(run.order.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneticSearch {
    config: GeneticConfig,
}

impl GeneticSearch {
    /// Creates a genetic search with the given configuration.
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }
}

impl TourSolver for GeneticSearch {
    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverRun> {
        let config = &self.config;
        config.validate()?;

        let n = distances.size();
        if n < GENETIC_MIN_CITIES {
            return Err(SolveError::InsufficientCities {
                strategy: Strategy::Genetic,
                required: GENETIC_MIN_CITIES,
                actual: n,
            });
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let pop_size = config.population_size;
        let survivor_count = (pop_size / 2).max(1);
        let max_attempts = pop_size * 2;

        let mut population: Vec<Chromosome> = initial_population(n, pop_size, &mut rng)
            .into_iter()
            .map(|order| Chromosome::evaluated(order, distances))
            .collect();

        let mut best: Option<Chromosome> = None;
        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;

        for gen in 0..config.generations {
            generations = gen + 1;

            population.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
            population.truncate(survivor_count);

            let leader = &population[0];
            match &best {
                Some(b) if leader.distance() >= b.distance() => stagnation_counter += 1,
                _ => {
                    best = Some(leader.clone());
                    stagnation_counter = 0;
                }
            }

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                debug!(
                    generation = gen,
                    best = best.as_ref().map(Chromosome::distance),
                    "genetic search stopped early"
                );
                stagnated = true;
                break;
            }

            let survivors = population.len();
            let mut attempts = 0;
            while population.len() < pop_size && attempts < max_attempts {
                attempts += 1;
                let p1 = rng.random_range(0..survivors);
                let p2 = rng.random_range(0..survivors);
                let mut child =
                    ordered_crossover(population[p1].order(), population[p2].order(), &mut rng);

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    reverse_segment(&mut child, &mut rng);
                }

                if !is_permutation(&child, n) {
                    continue;
                }
                population.push(Chromosome::evaluated(child, distances));
            }

            // top up with fresh random tours if children fell short
            while population.len() < pop_size {
                let order = random_permutation(n, &mut rng);
                population.push(Chromosome::evaluated(order, distances));
            }
        }

        let final_best = population
            .iter()
            .min_by(|a, b| a.distance().total_cmp(&b.distance()))
            .cloned();
        let best = match (best, final_best) {
            (Some(b), Some(f)) if f.distance() < b.distance() => f,
            (Some(b), _) => b,
            (None, Some(f)) => f,
            (None, None) => Chromosome::evaluated((0..n).collect(), distances),
        };

        let mut run = SolverRun::new(best.into_order());
        run.generations = Some(generations);
        run.stagnated = Some(stagnated);
        Ok(run)
    }
}

/// Builds the initial population of distinct random permutations.
///
/// At most `n!` distinct orderings exist; when that is below `size` the
/// remaining slots are filled with (repeated) random orderings.
fn initial_population<R: Rng>(n: usize, size: usize, rng: &mut R) -> Vec<Vec<usize>> {
    let distinct_target = size.min(factorial(n));
    let mut seen: HashSet<Vec<usize>> = HashSet::with_capacity(distinct_target);
    let mut population = Vec::with_capacity(size);

    while population.len() < distinct_target {
        let perm = random_permutation(n, rng);
        if seen.insert(perm.clone()) {
            population.push(perm);
        }
    }
    while population.len() < size {
        population.push(random_permutation(n, rng));
    }
    population
}

/// `n!`, saturating at `usize::MAX`.
fn factorial(n: usize) -> usize {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k)).unwrap_or(usize::MAX)
}
