//! Chart geometry: the affinity hexagon and the attribute radar.
//!
//! Projections are pure functions from document values to points in a
//! square drawing area whose origin is the top-left corner. Rendering is
//! left to the caller.

pub mod affinity;
pub mod radar;

pub use affinity::{AxisEfficiency, CYCLE, efficiencies, efficiency, hexagon, outline};
pub use radar::{RadarAxis, RadarLayout, normalize, project};

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// A point in drawing coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Render points as an SVG `points` attribute: `"x,y x,y ..."`.
pub fn svg_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The point at `distance` from `center` along axis `index` of `count`.
/// Axis 0 points straight up and indices advance clockwise.
pub(crate) fn polar(center: Point, distance: f64, index: usize, count: usize) -> Point {
    let angle = 2.0 * PI * index as f64 / count as f64 - PI / 2.0;
    Point {
        x: center.x + distance * angle.cos(),
        y: center.y + distance * angle.sin(),
    }
}
