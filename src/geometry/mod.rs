//! Road geometry and distances fetched from an upstream routing service.
//!
//! The transport itself lives in the host; this module only defines the
//! [`SegmentSource`] and [`MatrixSource`] seams and assembles the per-edge
//! geometry of a solved [`Tour`](crate::models::Tour).

mod route;
mod source;

pub use route::{assemble_route, RouteGeometry, Segment};
pub use source::{MatrixSource, SegmentSource};
