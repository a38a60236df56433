//! Render projection
//!
//! Turns the grid and an [`InteractionState`] snapshot into per-cell visuals.
//! Pure functions; the projector only reads the snapshot.

use serde::{Deserialize, Serialize};

use super::grid::{CellId, Grid};
use super::palette::Color;
use super::tracker::InteractionState;

/// Visual description of one rendered cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellVisual {
    pub cell: CellId,
    /// `None` renders as transparent
    pub background: Option<Color>,
    /// Active cells glow
    pub emphasis: bool,
    /// Decorative plus glyph
    pub glyph: bool,
}

impl CellVisual {
    pub fn background_css(&self) -> &str {
        self.background
            .as_ref()
            .map(Color::as_str)
            .unwrap_or("transparent")
    }

    /// Inline style for the cell element
    pub fn style(&self) -> String {
        match &self.background {
            Some(color) if self.emphasis => format!(
                "background-color: {color}; box-shadow: 0 0 12px 2px {color}; transition: none;"
            ),
            _ => "background-color: transparent; transition: background-color 500ms ease-out;"
                .to_string(),
        }
    }
}

/// Visual for `cell`, or `None` when the cell is thinned out
pub fn project_cell(grid: &Grid, state: &InteractionState, cell: CellId) -> Option<CellVisual> {
    if !grid.is_rendered(cell) {
        return None;
    }

    let background = state.get(&cell).map(|t| t.color.clone());
    Some(CellVisual {
        cell,
        emphasis: background.is_some(),
        background,
        glyph: grid.has_glyph(cell),
    })
}

/// Visuals for every rendered cell in row-major order.
///
/// Lazy; call again to restart.
pub fn project<'a>(
    grid: &'a Grid,
    state: &'a InteractionState,
) -> impl Iterator<Item = CellVisual> + 'a {
    grid.cells()
        .filter_map(move |cell| project_cell(grid, state, cell))
}

/// Fixed affine transform applied to the whole grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridTransform {
    pub translate_x_pct: f64,
    pub translate_y_pct: f64,
    pub skew_x_deg: f64,
    pub skew_y_deg: f64,
    pub scale: f64,
}

impl GridTransform {
    pub fn css(&self) -> String {
        format!(
            "translate({}%,{}%) skewX({}deg) skewY({}deg) scale({}) rotate(0deg) translateZ(0)",
            self.translate_x_pct, self.translate_y_pct, self.skew_x_deg, self.skew_y_deg, self.scale
        )
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self {
            translate_x_pct: -20.0,
            translate_y_pct: -20.0,
            skew_x_deg: -48.0,
            skew_y_deg: 14.0,
            scale: 1.5,
        }
    }
}
