//! Request dispatch: validation, solving off the caller's task, and results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::seq::index;
use rand::Rng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{SolverConfig, Strategy};
use crate::distance::DistanceModel;
use crate::error::{Result, SolveError};
use crate::evaluation::{is_permutation, order_distance};
use crate::geometry::MatrixSource;
use crate::models::{Point, SolveRequest, SolveResult, SolveStats, Tour};

/// Solves tour requests for one host session.
///
/// Each call to [`solve`](SolverService::solve) spawns its own blocking task
/// and returns its own [`SolveHandle`]; overlapping requests never share
/// completion state. Nothing is cached between requests.
///
/// # Examples
///
/// ```
/// use geotour::models::{Point, SolveRequest};
/// use geotour::solver::{SolverConfig, SolverService, Strategy};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = SolverService::new(SolverConfig::default()).unwrap();
/// let cities = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 0.01),
///     Point::new("c", 0.01, 0.01),
///     Point::new("d", 0.01, 0.0),
/// ];
/// let handle = service.solve(SolveRequest::new(cities, Strategy::Dynamic)).unwrap();
/// let result = handle.join().await.unwrap();
/// assert!(result.tour.is_closed());
/// assert_eq!(result.tour.len(), 4);
/// # }
/// ```
#[derive(Debug)]
pub struct SolverService {
    config: Arc<SolverConfig>,
    next_id: AtomicU64,
}

impl SolverService {
    /// Creates a service after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            next_id: AtomicU64::new(1),
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Starts solving `request` on the blocking thread pool.
    ///
    /// Fails with [`SolveError::TaskFailed`] when no Tokio runtime is running
    /// on the calling thread.
    pub fn solve(&self, request: SolveRequest) -> Result<SolveHandle> {
        let runtime = Handle::try_current()
            .map_err(|e| SolveError::TaskFailed(format!("no runtime to dispatch on: {e}")))?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let config = Arc::clone(&self.config);
        debug!("Dispatching solve request {} ({})", id, request.strategy);
        let handle = runtime.spawn_blocking(move || run_request(&config, &request));
        Ok(SolveHandle { id, handle })
    }

    /// Solves `request` on the current thread.
    pub fn solve_blocking(&self, request: &SolveRequest) -> Result<SolveResult> {
        run_request(&self.config, request)
    }

    /// Fetches a distance matrix from `source`, then solves with it.
    ///
    /// Requests the strategy refuses are rejected before `source` is asked.
    /// A failing source surfaces as [`SolveError::UpstreamDistanceUnavailable`].
    pub async fn solve_with_source<S>(&self, mut request: SolveRequest, source: &S) -> Result<SolveResult>
    where
        S: MatrixSource + ?Sized,
    {
        let cities = strip_closing_point(&request.cities).to_vec();
        check_city_count(&self.config, request.strategy, cities.len())?;
        let matrix = source.distance_matrix(&cities).await.map_err(|e| {
            warn!("Distance matrix unavailable for {} cities: {}", cities.len(), e);
            match e {
                SolveError::UpstreamDistanceUnavailable(_) => e,
                other => SolveError::UpstreamDistanceUnavailable(other.to_string()),
            }
        })?;
        request.cities = cities;
        request.distance_model = DistanceModel::Matrix(matrix);
        self.solve(request)?.join().await
    }
}

/// Handle to one in-flight solve.
#[derive(Debug)]
pub struct SolveHandle {
    id: u64,
    handle: JoinHandle<Result<SolveResult>>,
}

impl SolveHandle {
    /// Identifier unique within the issuing service.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` once the computation has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the result.
    ///
    /// Dropping the handle instead does not stop the computation.
    pub async fn join(self) -> Result<SolveResult> {
        self.handle
            .await
            .map_err(|e| SolveError::TaskFailed(format!("request {}: {}", self.id, e)))?
    }
}

/// Drops a trailing point that repeats the first one.
pub fn strip_closing_point(cities: &[Point]) -> &[Point] {
    match (cities.first(), cities.last()) {
        (Some(first), Some(last)) if cities.len() > 1 && first.same_location(last) => {
            &cities[..cities.len() - 1]
        }
        _ => cities,
    }
}

/// Picks `k` cities at random, keeping their input order.
///
/// This is the explicit downsampling step a host may take after an exact
/// strategy refused a request; the service itself never downsamples.
pub fn sample_cities<R: Rng + ?Sized>(cities: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    if k >= cities.len() {
        return cities.to_vec();
    }
    let mut picked = index::sample(rng, cities.len(), k).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| cities[i].clone()).collect()
}

/// Refuses city counts outside the strategy's bounds under `config`.
fn check_city_count(config: &SolverConfig, strategy: Strategy, count: usize) -> Result<()> {
    if count < strategy.min_cities() {
        warn!(
            "Refusing {} request: {} cities, need at least {}",
            strategy,
            count,
            strategy.min_cities()
        );
        return Err(SolveError::InsufficientCities {
            strategy,
            required: strategy.min_cities(),
            actual: count,
        });
    }
    if let Some(max) = strategy.max_cities(config) {
        if count > max {
            warn!("Refusing {} request: {} cities exceeds {}", strategy, count, max);
            return Err(SolveError::TooManyCities { strategy, count, max });
        }
    }
    Ok(())
}

fn run_request(config: &SolverConfig, request: &SolveRequest) -> Result<SolveResult> {
    let started = Instant::now();
    let strategy = request.strategy;
    let cities = strip_closing_point(&request.cities);
    check_city_count(config, strategy, cities.len())?;

    let distances = request.distance_model.resolve(cities)?;
    let run = strategy.solver(config, &request.params).solve(&distances)?;

    if !is_permutation(&run.order, cities.len()) {
        return Err(SolveError::MalformedTour(format!(
            "{} returned an order that is not a permutation of {} cities",
            strategy,
            cities.len()
        )));
    }

    let total_distance = order_distance(&run.order, &distances);
    let tour = Tour::from_order(cities, &run.order).close();
    let elapsed = started.elapsed();

    info!(
        "Solved {} cities with {} in {:?}: {:.3}",
        cities.len(),
        strategy,
        elapsed,
        total_distance
    );

    Ok(SolveResult {
        strategy,
        tour,
        order: run.order,
        total_distance,
        stats: SolveStats {
            elapsed,
            generations: run.generations,
            stagnated: run.stagnated,
            improvements: run.improvements,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::ga::GeneticConfig;
    use crate::models::StrategyParams;
    use std::sync::atomic::AtomicUsize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cities(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(format!("c{i}"), 42.5 + 0.3 * angle.sin(), 20.9 + 0.4 * angle.cos())
            })
            .collect()
    }

    fn service() -> SolverService {
        SolverService::new(SolverConfig::default()).expect("valid config")
    }

    #[test]
    fn test_rejects_single_city() {
        for strategy in Strategy::ALL {
            let err = service()
                .solve_blocking(&SolveRequest::new(cities(1), strategy))
                .expect_err("too few cities");
            assert!(matches!(err, SolveError::InsufficientCities { .. }));
        }
    }

    #[test]
    fn test_genetic_needs_three() {
        let err = service()
            .solve_blocking(&SolveRequest::new(cities(2), Strategy::Genetic))
            .expect_err("too few cities");
        assert_eq!(
            err,
            SolveError::InsufficientCities {
                strategy: Strategy::Genetic,
                required: 3,
                actual: 2
            }
        );
        assert!(service()
            .solve_blocking(&SolveRequest::new(cities(2), Strategy::Approximation))
            .is_ok());
    }

    #[test]
    fn test_ceiling_enforced_for_exact_strategies() {
        for strategy in [Strategy::BruteForce, Strategy::Dynamic] {
            let err = service()
                .solve_blocking(&SolveRequest::new(cities(11), strategy))
                .expect_err("over ceiling");
            assert_eq!(
                err,
                SolveError::TooManyCities {
                    strategy,
                    count: 11,
                    max: 9
                }
            );
            assert!(service()
                .solve_blocking(&SolveRequest::new(cities(9), strategy))
                .is_ok());
        }
    }

    #[test]
    fn test_closing_point_is_stripped() {
        let mut closed = cities(9);
        closed.push(closed[0].clone());
        let result = service()
            .solve_blocking(&SolveRequest::new(closed, Strategy::BruteForce))
            .expect("nine distinct cities");
        assert_eq!(result.tour.len(), 9);
        assert_eq!(result.tour.points().len(), 10);
    }

    #[test]
    fn test_result_tour_matches_order() {
        let input = cities(6);
        let result = service()
            .solve_blocking(&SolveRequest::new(input.clone(), Strategy::Dynamic))
            .expect("solvable");
        assert!(result.tour.is_closed());
        for (stop, &idx) in result.tour.stops().iter().zip(&result.order) {
            assert_eq!(stop, &input[idx]);
        }
        assert!((result.total_distance - result.tour.total_distance()).abs() < 1e-6);
    }

    #[test]
    fn test_matrix_model_used_for_total() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 1.0],
            vec![1.0, 0.0, 10.0],
            vec![10.0, 1.0, 0.0],
        ])
        .expect("valid");
        let request = SolveRequest::new(cities(3), Strategy::BruteForce)
            .with_distance_model(DistanceModel::Matrix(matrix));
        let result = service().solve_blocking(&request).expect("solvable");
        assert_eq!(result.order, vec![0, 2, 1]);
        assert_eq!(result.total_distance, 3.0);
    }

    #[test]
    fn test_matrix_for_other_list_rejected() {
        let request = SolveRequest::new(cities(4), Strategy::Approximation)
            .with_distance_model(DistanceModel::Matrix(DistanceMatrix::new(5)));
        assert_eq!(
            service().solve_blocking(&request),
            Err(SolveError::MatrixSizeMismatch {
                matrix: 5,
                cities: 4
            })
        );
    }

    #[test]
    fn test_genetic_stats_reported() {
        let request = SolveRequest::new(cities(6), Strategy::Genetic).with_params(StrategyParams {
            genetic: Some(GeneticConfig::default().with_seed(11).with_population_size(20)),
        });
        let result = service().solve_blocking(&request).expect("solvable");
        assert!(result.stats.generations.is_some());
        assert!(result.stats.stagnated.is_some());
        assert!(result.stats.improvements.is_none());
    }

    #[test]
    fn test_strip_closing_point() {
        let mut pts = cities(3);
        assert_eq!(strip_closing_point(&pts).len(), 3);
        pts.push(pts[0].clone());
        assert_eq!(strip_closing_point(&pts).len(), 3);
        let single = vec![Point::new("a", 1.0, 1.0)];
        assert_eq!(strip_closing_point(&single).len(), 1);
        assert!(strip_closing_point(&[]).is_empty());
    }

    #[test]
    fn test_sample_cities() {
        let mut rng = StdRng::seed_from_u64(4);
        let all = cities(15);
        let sample = sample_cities(&all, 9, &mut rng);
        assert_eq!(sample.len(), 9);
        let positions: Vec<usize> = sample
            .iter()
            .map(|p| all.iter().position(|c| c == p).expect("from input"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sample_cities(&all[..5], 9, &mut rng).len(), 5);
    }

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new("sw", 0.0, 0.0),
            Point::new("nw", 0.0, 1.0),
            Point::new("ne", 1.0, 1.0),
            Point::new("se", 1.0, 0.0),
        ]
    }

    #[test]
    fn test_unit_square_all_strategies_agree() {
        let service = service();
        let distances: Vec<f64> = Strategy::ALL
            .into_iter()
            .map(|strategy| {
                let request = SolveRequest::new(unit_square(), strategy).with_params(StrategyParams {
                    genetic: Some(GeneticConfig::default().with_seed(2)),
                });
                service.solve_blocking(&request).expect("solvable").total_distance
            })
            .collect();
        let perimeter = DistanceMatrix::from_points(&unit_square());
        let expected = order_distance(&[0, 1, 2, 3], &perimeter);
        for d in distances {
            assert!((d - expected).abs() < 1e-9, "{d} != {expected}");
        }
    }

    #[test]
    fn test_exact_strategies_agree_and_bound_heuristics() {
        let service = service();
        for n in 3..=8 {
            let input = cities(n);
            let solve = |strategy| {
                let request = SolveRequest::new(input.clone(), strategy).with_params(StrategyParams {
                    genetic: Some(GeneticConfig::default().with_seed(n as u64)),
                });
                service.solve_blocking(&request).expect("solvable").total_distance
            };
            let brute = solve(Strategy::BruteForce);
            assert!((solve(Strategy::Dynamic) - brute).abs() < 1e-9);
            assert!(brute <= solve(Strategy::Approximation) + 1e-9);
            assert!(brute <= solve(Strategy::Genetic) + 1e-9);
        }
    }

    #[test]
    fn test_genetic_deterministic_through_service() {
        let request = SolveRequest::new(cities(8), Strategy::Genetic).with_params(StrategyParams {
            genetic: Some(GeneticConfig::default().with_seed(77).with_generations(60)),
        });
        let a = service().solve_blocking(&request).expect("solvable");
        let b = service().solve_blocking(&request).expect("solvable");
        assert_eq!(a.order, b.order);
        assert_eq!(a.total_distance, b.total_distance);
    }

    struct FixedMatrix(Option<DistanceMatrix>);

    #[async_trait::async_trait]
    impl MatrixSource for FixedMatrix {
        async fn distance_matrix(&self, _cities: &[Point]) -> Result<DistanceMatrix> {
            self.0
                .clone()
                .ok_or_else(|| SolveError::InvalidDistanceMatrix("upstream returned nothing".into()))
        }
    }

    // Counts fetches and answers with a zero matrix of the requested size.
    #[derive(Default)]
    struct CountingMatrix {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl MatrixSource for CountingMatrix {
        async fn distance_matrix(&self, cities: &[Point]) -> Result<DistanceMatrix> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DistanceMatrix::new(cities.len()))
        }
    }

    #[tokio::test]
    async fn test_refused_requests_never_reach_source() {
        let source = CountingMatrix::default();
        let err = service()
            .solve_with_source(SolveRequest::new(cities(30), Strategy::BruteForce), &source)
            .await
            .expect_err("over ceiling");
        assert_eq!(
            err,
            SolveError::TooManyCities {
                strategy: Strategy::BruteForce,
                count: 30,
                max: 9
            }
        );
        let err = service()
            .solve_with_source(SolveRequest::new(cities(1), Strategy::Approximation), &source)
            .await
            .expect_err("too few cities");
        assert!(matches!(err, SolveError::InsufficientCities { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        service()
            .solve_with_source(SolveRequest::new(cities(4), Strategy::BruteForce), &source)
            .await
            .expect("solvable");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exact_strategies_agree_on_saturating_matrix() {
        let big = 1e308;
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, big, big],
            vec![big, 0.0, big],
            vec![big, big, 0.0],
        ])
        .expect("finite entries");
        let solve = |strategy| {
            let request = SolveRequest::new(cities(3), strategy)
                .with_distance_model(DistanceModel::Matrix(matrix.clone()));
            service().solve_blocking(&request).expect("solvable")
        };
        let brute = solve(Strategy::BruteForce);
        let dynamic = solve(Strategy::Dynamic);
        assert!(is_permutation(&dynamic.order, 3));
        assert_eq!(dynamic.total_distance, brute.total_distance);
    }

    #[test]
    fn test_solve_without_runtime_fails() {
        let err = service()
            .solve(SolveRequest::new(cities(4), Strategy::Approximation))
            .expect_err("no runtime");
        assert!(matches!(err, SolveError::TaskFailed(_)));
    }

    #[tokio::test]
    async fn test_solve_with_source() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 1.0],
            vec![1.0, 0.0, 10.0],
            vec![10.0, 1.0, 0.0],
        ])
        .expect("valid");
        let mut closed = cities(3);
        closed.push(closed[0].clone());
        let result = service()
            .solve_with_source(
                SolveRequest::new(closed, Strategy::Dynamic),
                &FixedMatrix(Some(matrix)),
            )
            .await
            .expect("solvable");
        assert_eq!(result.total_distance, 3.0);

        let err = service()
            .solve_with_source(SolveRequest::new(cities(3), Strategy::Dynamic), &FixedMatrix(None))
            .await
            .expect_err("no matrix");
        assert!(matches!(err, SolveError::UpstreamDistanceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_overlapping_requests_get_own_results() {
        let service = service();
        let first = service
            .solve(SolveRequest::new(cities(8), Strategy::BruteForce))
            .expect("runtime present");
        let second = service
            .solve(SolveRequest::new(cities(5), Strategy::Approximation))
            .expect("runtime present");
        assert_ne!(first.id(), second.id());

        let second = second.join().await.expect("solvable");
        let first = first.join().await.expect("solvable");
        assert_eq!(first.strategy, Strategy::BruteForce);
        assert_eq!(first.tour.len(), 8);
        assert_eq!(second.strategy, Strategy::Approximation);
        assert_eq!(second.tour.len(), 5);
    }

    #[tokio::test]
    async fn test_async_error_is_delivered() {
        let handle = service()
            .solve(SolveRequest::new(cities(12), Strategy::Dynamic))
            .expect("runtime present");
        assert!(matches!(
            handle.join().await,
            Err(SolveError::TooManyCities { count: 12, .. })
        ));
    }
}
