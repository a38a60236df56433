//! Palette and color selection
//!
//! All randomness in the background goes through [`ColorPicker`], so tests can
//! swap in a deterministic sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::BackgroundError;

/// A CSS color value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Non-empty ordered list of colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new<I, C>(colors: I) -> Result<Self, BackgroundError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        let colors: Vec<Color> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(BackgroundError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

/// Chooses the color for a newly activated cell
pub trait ColorPicker {
    /// Return an index into `palette`. Must be `< palette.len()`.
    fn pick_index(&mut self, palette: &Palette) -> usize;

    fn pick(&mut self, palette: &Palette) -> Color {
        let index = self.pick_index(palette) % palette.len();
        palette.colors[index].clone()
    }
}

/// Uniform random selection
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeded from the OS (or `crypto.getRandomValues` in the browser)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ColorPicker for RandomPicker {
    fn pick_index(&mut self, palette: &Palette) -> usize {
        self.rng.gen_range(0..palette.len())
    }
}

/// Replays a fixed list of indices, wrapping around
#[derive(Debug, Clone)]
pub struct SequencePicker {
    indices: Vec<usize>,
    position: usize,
}

impl SequencePicker {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            position: 0,
        }
    }
}

impl ColorPicker for SequencePicker {
    fn pick_index(&mut self, _palette: &Palette) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.position % self.indices.len()];
        self.position += 1;
        index
    }
}
