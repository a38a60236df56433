//! Interactive background engine
//!
//! Framework-independent model behind the hero background: a fixed grid of
//! boxes that light up in a random palette color on hover and fade out after a
//! linger period.
//!
//! - [`grid`]: cell generation, render eligibility and decorative glyphs
//! - [`palette`]: colors and the color selection seam
//! - [`timers`]: expiry scheduling seam plus a deterministic driver
//! - [`tracker`]: per-cell active treatments with timer-driven expiry
//! - [`projector`]: maps grid + state into per-cell visuals
//! - [`config`]: the options object consumed by the UI component

pub mod config;
pub mod grid;
pub mod palette;
pub mod projector;
pub mod timers;
pub mod tracker;

pub use config::{BackgroundConfig, BackgroundParts};
pub use grid::{CellId, Grid, ThinningPolicy};
pub use palette::{Color, ColorPicker, Palette, RandomPicker, SequencePicker};
pub use projector::{CellVisual, GridTransform, project, project_cell};
pub use timers::{Expiry, ManualTimers, TimerDriver, Timestamp};
pub use tracker::{ActiveTreatment, InteractionState, InteractionTracker, TrackerSettings};

/// Errors raised while setting up the background
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackgroundError {
    #[error("Invalid grid dimension: {row_count} rows x {col_count} columns")]
    InvalidDimension { row_count: i64, col_count: i64 },

    #[error("Palette must contain at least one color")]
    EmptyPalette,
}
