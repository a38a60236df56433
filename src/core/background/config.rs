//! Background options
//!
//! Defaults reproduce the shipped hero background: a 50 x 30 grid thinned on
//! odd/odd cells, a plus glyph every fourth cell, nine pastel colors and an
//! 800 ms lingering trail.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::BackgroundError;
use super::grid::{DEFAULT_GLYPH_STRIDE, Grid, ThinningPolicy};
use super::palette::Palette;
use super::projector::GridTransform;
use super::tracker::{DEFAULT_LINGER_MS, TrackerSettings};

/// Tailwind 300-tone pastels: sky, pink, green, yellow, red, purple, blue, indigo, violet
pub const DEFAULT_PALETTE: [&str; 9] = [
    "rgb(125 211 252)",
    "rgb(249 168 212)",
    "rgb(134 239 172)",
    "rgb(253 224 71)",
    "rgb(252 165 165)",
    "rgb(216 180 254)",
    "rgb(147 197 253)",
    "rgb(165 180 252)",
    "rgb(196 181 253)",
];

/// Options object for the interactive background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundConfig {
    pub row_count: i64,
    pub col_count: i64,
    pub palette: Vec<String>,
    pub linger_duration_ms: u64,
    pub max_active_cells: Option<usize>,
    /// Horizontal skew in degrees
    pub skew_deg: f64,
    pub skew_y_deg: f64,
    pub scale_factor: f64,
    pub thinning: ThinningPolicy,
    /// 0 disables the decorative glyphs
    pub glyph_stride: u32,
}

/// Validated pieces ready for the tracker and projector
#[derive(Debug, Clone)]
pub struct BackgroundParts {
    pub grid: Grid,
    pub palette: Palette,
    pub settings: TrackerSettings,
    pub transform: GridTransform,
}

impl BackgroundConfig {
    /// Validate and split the options
    pub fn build(&self) -> Result<BackgroundParts, BackgroundError> {
        let grid = Grid::new(self.row_count, self.col_count)?
            .with_thinning(self.thinning)
            .with_glyph_stride(self.glyph_stride);
        let palette = Palette::new(self.palette.iter().map(String::as_str))?;

        Ok(BackgroundParts {
            grid,
            palette,
            settings: self.tracker_settings(),
            transform: self.transform(),
        })
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            linger: Duration::from_millis(self.linger_duration_ms),
            max_active_cells: self.max_active_cells,
        }
    }

    pub fn transform(&self) -> GridTransform {
        GridTransform {
            skew_x_deg: self.skew_deg,
            skew_y_deg: self.skew_y_deg,
            scale: self.scale_factor,
            ..GridTransform::default()
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let transform = GridTransform::default();
        Self {
            row_count: 50,
            col_count: 30,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            linger_duration_ms: DEFAULT_LINGER_MS,
            max_active_cells: None,
            skew_deg: transform.skew_x_deg,
            skew_y_deg: transform.skew_y_deg,
            scale_factor: transform.scale,
            thinning: ThinningPolicy::default(),
            glyph_stride: DEFAULT_GLYPH_STRIDE,
        }
    }
}
