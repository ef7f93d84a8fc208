//! Tour type with explicit closure.

use serde::Serialize;

use super::Point;
use crate::error::{Result, SolveError};

/// An ordered visiting sequence over a set of points.
///
/// Closure is a typed property rather than something inferred from
/// coordinates: an open tour stores each stop once and has an implicit
/// return edge, a closed tour stores `n + 1` points with the start repeated
/// at the end.
///
/// # Examples
///
/// ```
/// use geotour::models::{Point, Tour};
///
/// let open = Tour::open(vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 1.0),
///     Point::new("c", 1.0, 1.0),
/// ]);
/// let closed = open.clone().close();
/// assert!(closed.is_closed());
/// assert_eq!(closed.points().len(), 4);
/// assert_eq!(closed.len(), 3);
/// assert!((open.total_distance() - closed.total_distance()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    points: Vec<Point>,
    closed: bool,
}

impl Tour {
    /// Creates an open tour. The return edge to the first point is implicit.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Creates a closed tour from a sequence whose last point repeats the first.
    ///
    /// Returns [`SolveError::MalformedTour`] if the sequence has fewer than two
    /// points or its ends differ.
    pub fn closed(points: Vec<Point>) -> Result<Self> {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 && first.same_location(last) => {
                Ok(Self {
                    points,
                    closed: true,
                })
            }
            _ => Err(SolveError::MalformedTour(format!(
                "closed tour of {} points must start and end at the same location",
                points.len()
            ))),
        }
    }

    /// Builds an open tour from indices into `cities`.
    pub(crate) fn from_order(cities: &[Point], order: &[usize]) -> Self {
        Self::open(order.iter().map(|&i| cities[i].clone()).collect())
    }

    /// Returns the closed form of this tour (appends the start if open).
    pub fn close(mut self) -> Self {
        if !self.closed {
            if let Some(first) = self.points.first().cloned() {
                self.points.push(first);
            }
            self.closed = true;
        }
        self
    }

    /// Returns the open form of this tour (drops the repeated start if closed).
    pub fn open_up(mut self) -> Self {
        if self.closed {
            self.points.pop();
            self.closed = false;
        }
        self
    }

    /// Returns `true` if the stored sequence repeats the start at the end.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The stored sequence, including the closing point for closed tours.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The distinct stops in visiting order.
    pub fn stops(&self) -> &[Point] {
        if self.closed && !self.points.is_empty() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Number of distinct stops.
    pub fn len(&self) -> usize {
        self.stops().len()
    }

    /// Returns `true` if the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rotates the tour so that it starts at `start`, keeping its closure.
    ///
    /// The tour is returned unchanged if no stop has `start`'s coordinates.
    pub fn rotate_to(self, start: &Point) -> Self {
        let closed = self.closed;
        let mut stops = self.open_up().points;
        if let Some(pos) = stops.iter().position(|p| p.same_location(start)) {
            stops.rotate_left(pos);
        }
        let tour = Self::open(stops);
        if closed {
            tour.close()
        } else {
            tour
        }
    }

    /// Great-circle length of the full loop, in kilometres.
    pub fn total_distance(&self) -> f64 {
        let edges = self.points.windows(2).map(|w| w[0].distance_to(&w[1]));
        let inner: f64 = edges.sum();
        if self.closed || self.points.len() < 2 {
            return inner;
        }
        inner + self.points[self.points.len() - 1].distance_to(&self.points[0])
    }
}
