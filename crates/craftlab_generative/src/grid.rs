//! # Grid Assembly
//!
//! Builds a [`ColorGrid`] of palette indices, one per (row, column) cell.
//!
//! ## Iteration Order
//!
//! Cells are always visited row-major: every column of row 0, then every
//! column of row 1, and so on. Strategies that draw from a shared
//! [`RandomStream`] consume exactly one value per cell in that order, so
//! the order is part of the determinism contract.
//!
//! ## Coordinates
//!
//! A cell's row index is its x coordinate and its column index its y
//! coordinate. Noise is sampled at `(row / smoothness.x, col / smoothness.y)`.

use crate::error::{GeneratorError, GeneratorResult};
use crate::noise::NoiseField;
use crate::palette::{noise_to_index, scale_to_index, ManualBuckets, Palette};
use crate::prng::{draw_int, RandomStream};

/// Grid dimensions. Each axis holds at least one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    /// Creates a shape. A requested length of 0 becomes 1.
    #[inline]
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: if rows == 0 { 1 } else { rows },
            cols: if cols == 0 { 1 } else { cols },
        }
    }

    /// Draws a row count then a column count from `stream`.
    ///
    /// Each is `floor(next * max)`, so a draw of 0 becomes 1 and the
    /// result never reaches the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidBound`] if either maximum is zero.
    pub fn from_draws(
        stream: &mut dyn RandomStream,
        max_rows: usize,
        max_cols: usize,
    ) -> GeneratorResult<Self> {
        if max_rows == 0 || max_cols == 0 {
            return Err(GeneratorError::InvalidBound);
        }
        let rows = draw_int(stream, max_rows)?;
        let cols = draw_int(stream, max_cols)?;
        Ok(Self::new(rows, cols))
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.cols
    }
}

/// Divisors applied to cell coordinates before sampling noise.
///
/// Larger values flatten spatial variation; 1 shows raw noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothness {
    x: f64,
    y: f64,
}

impl Smoothness {
    /// Creates smoothness divisors.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidSmoothness`] unless both are
    /// positive and finite.
    pub fn new(x: f64, y: f64) -> GeneratorResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(x) && valid(y) {
            Ok(Self { x, y })
        } else {
            Err(GeneratorError::InvalidSmoothness { x, y })
        }
    }

    /// Row divisor.
    #[inline]
    #[must_use]
    pub const fn x(self) -> f64 {
        self.x
    }

    /// Column divisor.
    #[inline]
    #[must_use]
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Noise-space coordinates for a cell.
    #[inline]
    #[must_use]
    pub fn apply(self, row: usize, col: usize) -> (f64, f64) {
        (row as f64 / self.x, col as f64 / self.y)
    }
}

impl Default for Smoothness {
    fn default() -> Self {
        Self { x: 20.0, y: 20.0 }
    }
}

/// Per-cell scalar, before mapping to a palette index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellValue {
    /// Uniform float in `[0, 1)`.
    Uniform(f64),
    /// Noise value in `[-1, 1]`.
    Noise(f64),
    /// Palette index chosen directly; clamped to the palette.
    Index(usize),
}

/// Built-in ways of computing a cell's value.
pub enum CellStrategy<'a> {
    /// One fresh draw per cell from a shared stream.
    Uniform(&'a mut dyn RandomStream),
    /// Pure lookup by normalized position.
    Buckets(&'a ManualBuckets),
    /// Merge the cell's x and y buckets, then pick one with a draw.
    BucketDraw {
        /// Bucket table.
        buckets: &'a ManualBuckets,
        /// Shared stream, one draw per cell.
        stream: &'a mut dyn RandomStream,
    },
    /// Sample a noise field at the smoothed cell coordinates.
    Noise {
        /// Field to sample.
        field: &'a NoiseField,
        /// Coordinate divisors.
        smoothness: Smoothness,
    },
}

impl CellStrategy<'_> {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform(_) => "uniform",
            Self::Buckets(_) => "buckets",
            Self::BucketDraw { .. } => "bucket_draw",
            Self::Noise { .. } => "noise",
        }
    }

    /// Computes the value of one cell.
    pub fn cell_value(&mut self, row: usize, col: usize, shape: GridShape) -> CellValue {
        match self {
            Self::Uniform(stream) => CellValue::Uniform(stream.next_f64()),
            Self::Buckets(buckets) => CellValue::Index(buckets.index_at(row, col, shape)),
            Self::BucketDraw { buckets, stream } => {
                let value = stream.next_f64();
                CellValue::Index(buckets.pick_candidate(row, col, shape, value))
            }
            Self::Noise { field, smoothness } => {
                let (x, y) = smoothness.apply(row, col);
                CellValue::Noise(field.sample(x, y))
            }
        }
    }
}

/// Row-major grid of palette indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorGrid {
    shape: GridShape,
    cells: Vec<usize>,
}

impl ColorGrid {
    /// Generates a grid from a per-cell function.
    ///
    /// `cell_fn` is called once per cell, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyPalette`] when `palette_len` is zero.
    pub fn generate<F>(shape: GridShape, palette_len: usize, cell_fn: F) -> GeneratorResult<Self>
    where
        F: FnMut(usize, usize) -> CellValue,
    {
        if palette_len == 0 {
            return Err(GeneratorError::EmptyPalette);
        }
        Ok(Self::fill(shape, palette_len, cell_fn))
    }

    /// Generates a grid with one of the built-in strategies.
    pub fn from_strategy<T>(
        shape: GridShape,
        palette: &Palette<T>,
        strategy: &mut CellStrategy<'_>,
    ) -> Self {
        tracing::debug!(
            rows = shape.rows(),
            cols = shape.cols(),
            strategy = strategy.name(),
            "generating color grid"
        );
        Self::fill(shape, palette.len(), |row, col| {
            strategy.cell_value(row, col, shape)
        })
    }

    /// `palette_len` must be non-zero.
    fn fill<F>(shape: GridShape, palette_len: usize, mut cell_fn: F) -> Self
    where
        F: FnMut(usize, usize) -> CellValue,
    {
        let mut cells = Vec::with_capacity(shape.cell_count());
        for row in 0..shape.rows() {
            for col in 0..shape.cols() {
                let index = match cell_fn(row, col) {
                    CellValue::Uniform(value) => scale_to_index(palette_len, value),
                    CellValue::Noise(value) => noise_to_index(palette_len, value),
                    CellValue::Index(index) => index.min(palette_len - 1),
                };
                cells.push(index);
            }
        }
        Self { shape, cells }
    }

    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.shape.rows()
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Palette index at a cell, if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.cells.get(row * self.cols() + col).copied()
    }

    /// All indices, row-major.
    #[must_use]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Iterates over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks(self.cols())
    }

    /// Resolves every cell to its color, row-major.
    ///
    /// Indices past the end of `palette` resolve to its last color.
    #[must_use]
    pub fn resolve<'p, T>(&self, palette: &'p Palette<T>) -> Vec<&'p T> {
        let colors = palette.colors();
        self.cells
            .iter()
            .map(|&index| &colors[index.min(colors.len() - 1)])
            .collect()
    }
}
