//! Radar chart of attribute values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Point, polar};

/// Lowest attribute value on the radar scale.
pub const SCALE_MIN: i32 = -2;
/// Highest attribute value on the radar scale.
pub const SCALE_MAX: i32 = 10;
/// Fewest attributes a radar can be drawn with.
pub const MIN_AXES: usize = 3;

/// Dimensions of the radar drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarLayout {
    /// Width and height of the square area.
    pub size: f64,
    /// Distance from the center to a full-scale vertex.
    pub radius: f64,
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self::new(200.0)
    }
}

impl RadarLayout {
    /// A layout for a `size` square with the radius at 35% of the size.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            radius: 0.35 * size,
        }
    }

    /// Override the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Center of the drawing area.
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

/// Map a value from `[SCALE_MIN, SCALE_MAX]` to `[0, 1]`, clamping values
/// outside the scale.
pub fn normalize(value: i32) -> f64 {
    let span = f64::from(SCALE_MAX - SCALE_MIN);
    ((f64::from(value) - f64::from(SCALE_MIN)) / span).clamp(0.0, 1.0)
}

/// One attribute placed on the radar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    /// Attribute key.
    pub key: String,
    /// Raw attribute value.
    pub value: i32,
    /// Value mapped to `[0, 1]`.
    pub normalized: f64,
    /// Polygon vertex for this attribute.
    pub point: Point,
}

/// Place every attribute on its own axis, in map order. Returns `None` when
/// there are fewer than three attributes.
pub fn project(attributes: &IndexMap<String, i32>, layout: &RadarLayout) -> Option<Vec<RadarAxis>> {
    let count = attributes.len();
    if count < MIN_AXES {
        return None;
    }
    let center = layout.center();
    let axes = attributes
        .iter()
        .enumerate()
        .map(|(i, (key, &value))| {
            let normalized = normalize(value);
            RadarAxis {
                key: key.clone(),
                value,
                normalized,
                point: polar(center, layout.radius * normalized, i, count),
            }
        })
        .collect();
    Some(axes)
}

/// A background ring at `scale` of the full radius, for `count` axes.
pub fn web(layout: &RadarLayout, count: usize, scale: f64) -> Vec<Point> {
    let center = layout.center();
    (0..count)
        .map(|i| polar(center, layout.radius * scale, i, count))
        .collect()
}

/// The data polygon of projected axes.
pub fn polygon(axes: &[RadarAxis]) -> Vec<Point> {
    axes.iter().map(|axis| axis.point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn attrs(values: &[(&str, i32)]) -> IndexMap<String, i32> {
        values.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn default_layout() {
        let layout = RadarLayout::default();
        assert_eq!(layout.size, 200.0);
        assert!((layout.radius - 70.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_endpoints() {
        assert_eq!(normalize(-2), 0.0);
        assert_eq!(normalize(10), 1.0);
        assert_eq!(normalize(4), 0.5);
        assert_eq!(normalize(-7), 0.0);
        assert_eq!(normalize(25), 1.0);
    }

    #[test]
    fn too_few_axes() {
        let layout = RadarLayout::default();
        assert!(project(&attrs(&[("a", 1), ("b", 2)]), &layout).is_none());
        assert!(project(&IndexMap::new(), &layout).is_none());
    }

    #[test]
    fn first_axis_points_up() {
        let layout = RadarLayout::default();
        let axes = project(&attrs(&[("a", 10), ("b", -2), ("c", 4)]), &layout).unwrap();
        assert_eq!(axes.len(), 3);
        assert!((axes[0].point.x - 100.0).abs() < 1e-9);
        assert!((axes[0].point.y - 30.0).abs() < 1e-9);
        assert_eq!(axes[1].point, layout.center());
        assert!((axes[2].point.distance(layout.center()) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn web_ring_radius() {
        let layout = RadarLayout::new(100.0);
        let ring = web(&layout, 6, 0.5);
        assert_eq!(ring.len(), 6);
        for p in ring {
            assert!((p.distance(layout.center()) - 17.5).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn normalized_in_unit_range(v in any::<i32>()) {
            let n = normalize(v);
            prop_assert!((0.0..=1.0).contains(&n));
        }

        #[test]
        fn vertices_within_radius(values in proptest::collection::vec(-50i32..50, 3..12)) {
            let map: IndexMap<String, i32> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{i}"), *v))
                .collect();
            let layout = RadarLayout::default();
            let axes = project(&map, &layout).unwrap();
            prop_assert_eq!(axes.len(), values.len());
            for axis in &axes {
                prop_assert!(axis.point.distance(layout.center()) <= layout.radius + 1e-9);
            }
        }
    }
}
