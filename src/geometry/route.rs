use serde::Serialize;
use tracing::{debug, warn};

use super::SegmentSource;
use crate::error::SolveError;
use crate::models::{Point, Tour};

/// Road geometry for one edge of a tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Edge position in visiting order.
    pub index: usize,
    pub from: Point,
    pub to: Point,
    /// `(lat, lon)` polyline as returned by the source.
    pub path: Vec<(f64, f64)>,
}

/// Assembled geometry of a tour, with the edges that could not be fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteGeometry {
    pub segments: Vec<Segment>,
    /// Edge index and error for every failed fetch.
    pub failures: Vec<(usize, SolveError)>,
}

impl RouteGeometry {
    /// Returns `true` if every edge was fetched.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Concatenated polyline of all fetched segments, in visiting order.
    pub fn path(&self) -> Vec<(f64, f64)> {
        self.segments
            .iter()
            .flat_map(|s| s.path.iter().copied())
            .collect()
    }
}

/// Fetches the geometry of every edge of `tour`, closing edge included.
///
/// Edges are fetched one after another. A failed edge is logged and recorded
/// in [`RouteGeometry::failures`]; the remaining edges are still fetched.
pub async fn assemble_route<S>(tour: &Tour, source: &S) -> RouteGeometry
where
    S: SegmentSource + ?Sized,
{
    let closed = tour.clone().close();
    let points = if tour.len() < 2 { &[][..] } else { closed.points() };
    let mut geometry = RouteGeometry::default();

    for (index, pair) in points.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        match source.segment(from, to).await {
            Ok(path) => geometry.segments.push(Segment {
                index,
                from: from.clone(),
                to: to.clone(),
                path,
            }),
            Err(e) => {
                warn!("Segment {} ({} -> {}) unavailable: {}", index, from.name(), to.name(), e);
                geometry.failures.push((index, e));
            }
        }
    }

    debug!(
        segments = geometry.segments.len(),
        failures = geometry.failures.len(),
        "route geometry assembled"
    );
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::Result;

    // Returns a straight two-point line, failing for one named destination.
    struct MockSource {
        fail_to: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SegmentSource for MockSource {
        async fn segment(&self, from: &Point, to: &Point) -> Result<Vec<(f64, f64)>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_to == Some(to.name()) {
                return Err(SolveError::UpstreamDistanceUnavailable("timeout".into()));
            }
            Ok(vec![(from.lat(), from.lon()), (to.lat(), to.lon())])
        }
    }

    fn square() -> Tour {
        Tour::open(vec![
            Point::new("a", 0.0, 0.0),
            Point::new("b", 0.0, 1.0),
            Point::new("c", 1.0, 1.0),
            Point::new("d", 1.0, 0.0),
        ])
    }

    #[tokio::test]
    async fn test_assembles_every_edge() {
        let source = MockSource {
            fail_to: None,
            calls: AtomicUsize::new(0),
        };
        let geometry = assemble_route(&square(), &source).await;
        assert!(geometry.is_complete());
        assert_eq!(geometry.segments.len(), 4);
        assert_eq!(geometry.segments[3].to.name(), "a");
        assert_eq!(geometry.path().len(), 8);
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_closed_tour_not_double_closed() {
        let source = MockSource {
            fail_to: None,
            calls: AtomicUsize::new(0),
        };
        let geometry = assemble_route(&square().close(), &source).await;
        assert_eq!(geometry.segments.len(), 4);
    }

    #[tokio::test]
    async fn test_failed_segment_isolated() {
        let source = MockSource {
            fail_to: Some("c"),
            calls: AtomicUsize::new(0),
        };
        let geometry = assemble_route(&square(), &source).await;
        assert!(!geometry.is_complete());
        assert_eq!(geometry.failures.len(), 1);
        assert_eq!(geometry.failures[0].0, 1);
        let indices: Vec<usize> = geometry.segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }

    #[tokio::test]
    async fn test_single_stop_has_no_edges() {
        let source = MockSource {
            fail_to: None,
            calls: AtomicUsize::new(0),
        };
        let tour = Tour::open(vec![Point::new("a", 0.0, 0.0)]);
        let geometry = assemble_route(&tour, &source).await;
        assert!(geometry.segments.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
