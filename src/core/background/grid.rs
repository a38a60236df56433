//! Grid generation
//!
//! The grid is generated once when the background mounts and never changes.
//! Cells are addressed by `(row, col)` and iterated in row-major order.

use serde::{Deserialize, Serialize};

use super::BackgroundError;

/// Identifier of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: u32,
    pub col: u32,
}

impl CellId {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellId {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Density reduction rule deciding which cells get an interactive element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThinningPolicy {
    /// Skip cells whose row and column are both odd
    #[default]
    BothOdd,
    /// Skip cells where `row + col` is odd
    Checkerboard,
    /// Render every cell
    None,
}

impl ThinningPolicy {
    /// Whether `cell` is kept under this policy
    pub fn keeps(&self, cell: CellId) -> bool {
        match self {
            ThinningPolicy::BothOdd => !(cell.row % 2 == 1 && cell.col % 2 == 1),
            ThinningPolicy::Checkerboard => (cell.row + cell.col) % 2 == 0,
            ThinningPolicy::None => true,
        }
    }
}

/// Fixed logical grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    thinning: ThinningPolicy,
    glyph_stride: u32,
}

impl Grid {
    /// Create a grid with the default thinning policy and glyph stride.
    ///
    /// Fails with [`BackgroundError::InvalidDimension`] when either dimension
    /// is not positive (or does not fit in `u32`).
    pub fn new(row_count: i64, col_count: i64) -> Result<Self, BackgroundError> {
        let invalid = || BackgroundError::InvalidDimension {
            row_count,
            col_count,
        };

        if row_count <= 0 || col_count <= 0 {
            return Err(invalid());
        }

        let rows = u32::try_from(row_count).map_err(|_| invalid())?;
        let cols = u32::try_from(col_count).map_err(|_| invalid())?;

        Ok(Self {
            rows,
            cols,
            thinning: ThinningPolicy::default(),
            glyph_stride: DEFAULT_GLYPH_STRIDE,
        })
    }

    /// Set the thinning policy
    pub fn with_thinning(mut self, thinning: ThinningPolicy) -> Self {
        self.thinning = thinning;
        self
    }

    /// Set the decorative glyph stride (0 disables glyphs)
    pub fn with_glyph_stride(mut self, stride: u32) -> Self {
        self.glyph_stride = stride;
        self
    }

    pub fn row_count(&self) -> u32 {
        self.rows
    }

    pub fn col_count(&self) -> u32 {
        self.cols
    }

    pub fn thinning(&self) -> ThinningPolicy {
        self.thinning
    }

    pub fn glyph_stride(&self) -> u32 {
        self.glyph_stride
    }

    /// Total number of cells, rendered or not
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Always false: a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, cell: CellId) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.rows).flat_map(move |row| self.row(row))
    }

    /// Cells of a single row, left to right
    pub fn row(&self, row: u32) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cols).map(move |col| CellId { row, col })
    }

    /// Whether the cell gets an interactive element.
    ///
    /// Skipped cells still occupy their slot in the layout.
    pub fn is_rendered(&self, cell: CellId) -> bool {
        self.contains(cell) && self.thinning.keeps(cell)
    }

    /// Whether the cell carries the decorative plus glyph
    pub fn has_glyph(&self, cell: CellId) -> bool {
        self.glyph_stride != 0
            && self.is_rendered(cell)
            && cell.row % self.glyph_stride == 0
            && cell.col % self.glyph_stride == 0
    }
}

/// Default stride between decorative glyphs
pub const DEFAULT_GLYPH_STRIDE: u32 = 4;
