//! # Palette Index Mapping
//!
//! Turns scalars into indices into an ordered, non-empty palette.
//!
//! Three mappings are supported:
//! - **Uniform**: a float in `[0, 1)` scaled by the palette length
//! - **Noise**: a value in `[-1, 1]` rescaled to `[0, 1)` first
//! - **Manual buckets**: a 2D lookup table indexed by normalized grid
//!   position, with no randomness involved

use crate::error::{GeneratorError, GeneratorResult};
use crate::grid::GridShape;

/// The article's seven color tokens, coolest to warmest.
pub const SIMPLE_COLORS: [&str; 7] = ["purple", "blue", "green", "lime", "yellow", "pink", "orange"];

/// Manual bucket table over [`SIMPLE_COLORS`], as indices.
///
/// Rows run from cool (top left of a grid) to warm (bottom right).
const ARTICLE_BUCKETS: [&[usize]; 10] = [
    &[1, 0, 0],
    &[2, 1, 0],
    &[2, 1, 0],
    &[3, 2, 1],
    &[4, 3, 2, 1],
    &[4, 3, 2],
    &[5, 4, 3, 2],
    &[5, 4, 3],
    &[5, 6, 4],
    &[5, 6, 6],
];

/// Maps a uniform float to a palette index: `floor(value * len)`.
///
/// # Errors
///
/// Returns [`GeneratorError::EmptyPalette`] when `palette_len` is zero.
pub fn index_from_uniform(palette_len: usize, value: f64) -> GeneratorResult<usize> {
    if palette_len == 0 {
        return Err(GeneratorError::EmptyPalette);
    }
    Ok(scale_to_index(palette_len, value))
}

/// Maps a noise value to a palette index: `floor(((value + 1) / 2) * len)`.
///
/// `1.0` maps to `len - 1`, never `len`. Values outside `[-1, 1]` are
/// clamped first.
///
/// # Errors
///
/// Returns [`GeneratorError::EmptyPalette`] when `palette_len` is zero.
pub fn index_from_noise(palette_len: usize, value: f64) -> GeneratorResult<usize> {
    if palette_len == 0 {
        return Err(GeneratorError::EmptyPalette);
    }
    Ok(noise_to_index(palette_len, value))
}

/// `floor(unit * len)` clamped to `[0, len)`. `len` must be non-zero.
#[inline]
pub(crate) fn scale_to_index(len: usize, unit: f64) -> usize {
    let scaled = (unit.clamp(0.0, 1.0) * len as f64).floor() as usize;
    scaled.min(len - 1)
}

/// Rescales `[-1, 1]` to `[0, 1]` before [`scale_to_index`].
#[inline]
pub(crate) fn noise_to_index(len: usize, value: f64) -> usize {
    scale_to_index(len, (value.clamp(-1.0, 1.0) + 1.0) / 2.0)
}

/// Ordered, non-empty sequence of color tokens.
///
/// The token type is opaque to the generator; the article uses CSS class
/// names, tests use `&str` or integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette<T> {
    colors: Vec<T>,
}

impl<T> Palette<T> {
    /// Creates a palette.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<T>) -> GeneratorResult<Self> {
        if colors.is_empty() {
            return Err(GeneratorError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Number of colors (always at least one).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All colors in order.
    #[must_use]
    pub fn colors(&self) -> &[T] {
        &self.colors
    }

    /// Color at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.colors.get(index)
    }

    /// Index for a uniform float in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn index_from_uniform(&self, value: f64) -> usize {
        scale_to_index(self.len(), value)
    }

    /// Index for a noise value in `[-1, 1]`.
    #[inline]
    #[must_use]
    pub fn index_from_noise(&self, value: f64) -> usize {
        noise_to_index(self.len(), value)
    }

    /// Color for a uniform float in `[0, 1)`.
    #[must_use]
    pub fn pick_uniform(&self, value: f64) -> &T {
        &self.colors[self.index_from_uniform(value)]
    }

    /// Color for a noise value in `[-1, 1]`.
    #[must_use]
    pub fn pick_noise(&self, value: f64) -> &T {
        &self.colors[self.index_from_noise(value)]
    }
}

impl<T: PartialEq> Palette<T> {
    /// Index of the first color equal to `token`.
    #[must_use]
    pub fn position(&self, token: &T) -> Option<usize> {
        self.colors.iter().position(|color| color == token)
    }
}

impl Palette<&'static str> {
    /// The article's seven-color palette ([`SIMPLE_COLORS`]).
    #[must_use]
    pub fn simple() -> Self {
        Self {
            colors: SIMPLE_COLORS.to_vec(),
        }
    }
}

/// 2D table of palette indices, selected by normalized grid position.
///
/// The row's position picks an "x bucket" and the column's position picks
/// a "y bucket", each by `floor(position / extent * buckets)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualBuckets {
    buckets: Vec<Vec<usize>>,
}

impl ManualBuckets {
    /// Creates a table of palette indices.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::InvalidConfig`] if the table or any bucket is empty
    /// - [`GeneratorError::EmptyPalette`] if `palette_len` is zero
    /// - [`GeneratorError::InvalidConfig`] if an index is out of range
    pub fn new(buckets: Vec<Vec<usize>>, palette_len: usize) -> GeneratorResult<Self> {
        if palette_len == 0 {
            return Err(GeneratorError::EmptyPalette);
        }
        if buckets.is_empty() {
            return Err(GeneratorError::InvalidConfig("bucket table is empty".into()));
        }
        for (row, bucket) in buckets.iter().enumerate() {
            if bucket.is_empty() {
                return Err(GeneratorError::InvalidConfig(format!("bucket {row} is empty")));
            }
            if let Some(index) = bucket.iter().find(|&&index| index >= palette_len) {
                return Err(GeneratorError::InvalidConfig(format!(
                    "bucket {row} references color {index}, palette has {palette_len}"
                )));
            }
        }
        Ok(Self { buckets })
    }

    /// Resolves a table of tokens against `palette`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] if a token is not in the
    /// palette or the table is malformed.
    pub fn from_tokens<T>(table: &[Vec<T>], palette: &Palette<T>) -> GeneratorResult<Self>
    where
        T: PartialEq + std::fmt::Debug,
    {
        let buckets = table
            .iter()
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|token| {
                        palette.position(token).ok_or_else(|| {
                            GeneratorError::InvalidConfig(format!("unknown color {token:?}"))
                        })
                    })
                    .collect::<GeneratorResult<Vec<_>>>()
            })
            .collect::<GeneratorResult<Vec<_>>>()?;
        Self::new(buckets, palette.len())
    }

    /// The article's ten-bucket table over [`Palette::simple`].
    #[must_use]
    pub fn article() -> Self {
        Self {
            buckets: ARTICLE_BUCKETS.iter().map(|bucket| bucket.to_vec()).collect(),
        }
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always `false`; a table has at least one bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over buckets in table order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    /// Bucket at `index`, if any.
    #[must_use]
    pub fn bucket(&self, index: usize) -> Option<&[usize]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Bucket number for `position` along an axis of length `extent`.
    #[inline]
    fn bucket_of(&self, position: usize, extent: usize) -> usize {
        let unit = position as f64 / extent.max(1) as f64;
        scale_to_index(self.buckets.len(), unit)
    }

    /// Pure position lookup: the row picks a bucket, the column picks an
    /// entry within it.
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize, shape: GridShape) -> usize {
        let bucket = &self.buckets[self.bucket_of(row, shape.rows())];
        let unit = col as f64 / shape.cols() as f64;
        bucket[scale_to_index(bucket.len(), unit)]
    }

    /// Candidate colors for a cell: the x bucket followed by the y bucket.
    pub fn candidates(
        &self,
        row: usize,
        col: usize,
        shape: GridShape,
    ) -> impl Iterator<Item = usize> + '_ {
        let x_bucket = &self.buckets[self.bucket_of(row, shape.rows())];
        let y_bucket = &self.buckets[self.bucket_of(col, shape.cols())];
        x_bucket.iter().chain(y_bucket.iter()).copied()
    }

    /// Picks one of [`ManualBuckets::candidates`] with a uniform float.
    #[must_use]
    pub fn pick_candidate(&self, row: usize, col: usize, shape: GridShape, value: f64) -> usize {
        let x_bucket = &self.buckets[self.bucket_of(row, shape.rows())];
        let y_bucket = &self.buckets[self.bucket_of(col, shape.cols())];
        let pick = scale_to_index(x_bucket.len() + y_bucket.len(), value);
        if pick < x_bucket.len() {
            x_bucket[pick]
        } else {
            y_bucket[pick - x_bucket.len()]
        }
    }
}
