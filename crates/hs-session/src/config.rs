//! Configuration for a sheet session.

use std::path::PathBuf;

use hs_mechanics::projection::RadarLayout;

use crate::image::DEFAULT_MAX_WIDTH;

/// Configuration for a sheet session.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// RNG seed for reproducible rolls. `None` uses thread randomness.
    pub seed: Option<u64>,
    /// Directory holding stored characters. `None` runs offline.
    pub data_dir: Option<PathBuf>,
    /// Widest portrait kept before downscaling, in pixels.
    pub max_image_width: u32,
    /// Radar chart layout.
    pub radar: RadarLayout,
    /// Side length of the affinity hexagon drawing.
    pub hexagon_size: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            max_image_width: DEFAULT_MAX_WIDTH,
            radar: RadarLayout::default(),
            hexagon_size: 160.0,
        }
    }
}

impl SheetConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the widest portrait width (at least 1).
    pub fn with_max_image_width(mut self, width: u32) -> Self {
        self.max_image_width = width.max(1);
        self
    }

    /// Set the radar layout.
    pub fn with_radar(mut self, radar: RadarLayout) -> Self {
        self.radar = radar;
        self
    }
}
