//! Nen affinity efficiencies and the hexagon they are drawn on.

use hs_core::AffinityType;
use serde::{Deserialize, Serialize};

use super::{Point, polar};

/// The six affinities in the order they sit around the hexagon.
pub const CYCLE: [AffinityType; 6] = [
    AffinityType::Enhancer,
    AffinityType::Transmuter,
    AffinityType::Conjurer,
    AffinityType::Specialist,
    AffinityType::Manipulator,
    AffinityType::Emitter,
];

/// Smallest scale a hexagon vertex is drawn at, so no axis collapses.
pub const DISPLAY_FLOOR: f64 = 0.1;

/// Hexagon radius as a fraction of the drawing size.
pub const RADIUS_RATIO: f64 = 0.4;

/// Efficiency of one axis for a given active affinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisEfficiency {
    /// The axis.
    pub affinity: AffinityType,
    /// Efficiency in `[0, 1]`.
    pub efficiency: f64,
}

impl AxisEfficiency {
    /// Efficiency as a whole percentage.
    pub fn percent(&self) -> u32 {
        (self.efficiency * 100.0).round() as u32
    }

    /// Scale used when drawing the vertex.
    pub fn display_scale(&self) -> f64 {
        self.efficiency.max(DISPLAY_FLOOR)
    }
}

fn position(affinity: AffinityType) -> usize {
    match affinity {
        AffinityType::Enhancer => 0,
        AffinityType::Transmuter => 1,
        AffinityType::Conjurer => 2,
        AffinityType::Specialist => 3,
        AffinityType::Manipulator => 4,
        AffinityType::Emitter => 5,
    }
}

/// Steps between two affinities around the cycle, 0 to 3.
pub fn distance(a: AffinityType, b: AffinityType) -> usize {
    let d = position(a).abs_diff(position(b));
    d.min(CYCLE.len() - d)
}

/// Efficiency of `axis` for a user whose affinity is `active`: 100% on the
/// own axis, minus 20% per step around the cycle.
pub fn efficiency(active: AffinityType, axis: AffinityType) -> f64 {
    let steps = u32::try_from(distance(active, axis)).unwrap_or(5).min(5);
    f64::from(5 - steps) / 5.0
}

/// Efficiencies of all six axes, in cycle order.
pub fn efficiencies(active: AffinityType) -> [AxisEfficiency; 6] {
    CYCLE.map(|affinity| AxisEfficiency {
        affinity,
        efficiency: efficiency(active, affinity),
    })
}

/// The efficiency polygon for `active` in a `size` by `size` area.
pub fn hexagon(active: AffinityType, size: f64) -> [Point; 6] {
    let center = Point::new(size / 2.0, size / 2.0);
    let radius = RADIUS_RATIO * size;
    let axes = efficiencies(active);
    std::array::from_fn(|i| polar(center, radius * axes[i].display_scale(), i, CYCLE.len()))
}

/// The full-size hexagon behind the efficiency polygon.
pub fn outline(size: f64) -> [Point; 6] {
    let center = Point::new(size / 2.0, size / 2.0);
    let radius = RADIUS_RATIO * size;
    std::array::from_fn(|i| polar(center, radius, i, CYCLE.len()))
}
