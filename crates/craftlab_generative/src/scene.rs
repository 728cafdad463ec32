//! # Article Scenes
//!
//! The interactive figures of "The Generative Part of Generative Art",
//! expressed over the generator core. Each function is one figure; a
//! "Refresh" in the page is just another call with a new or equal stream.
//!
//! | Scene                 | Cell strategy | Stream consumption                   |
//! |-----------------------|---------------|--------------------------------------|
//! | [`single_color`]      | uniform       | 1 draw                               |
//! | [`random_grid`]       | uniform       | rows, cols, then 1 per cell          |
//! | [`bucketed_grid`]     | bucket draw   | rows, cols, then 1 per cell          |
//! | [`noise_grid`]        | noise         | none (field already built)           |
//! | [`static_preview`]    | noise         | none (constant field)                |
//! | [`preview_grid`]      | noise         | rows, cols, then 255 for the field   |
//! | [`seed_comparison`]   | -             | `count` draws from each seed         |
//! | [`seeded_noise_grid`] | noise         | 255 for the field, then rows, cols   |
//! | [`logo`]              | noise         | none (field already built)           |

use crate::error::GeneratorResult;
use crate::grid::{CellStrategy, ColorGrid, GridShape, Smoothness};
use crate::noise::NoiseField;
use crate::palette::{ManualBuckets, Palette};
use crate::prng::{Alea, ConstantStream, RandomStream, Seed};

/// Constant stream value behind the logo's first render.
pub const LOGO_PLACEHOLDER: f64 = 0.26;

/// Constant stream value behind the preview's first render.
pub const PREVIEW_PLACEHOLDER: f64 = 0.1176;

/// Shape of the preview's first render.
pub const PREVIEW_SHAPE: GridShape = GridShape::new(73, 9);

/// Smoothness of the logo on both axes.
pub const LOGO_SMOOTHNESS: f64 = 10.0;

/// Logo canvas width in cells.
pub const LOGO_WIDTH: usize = 17;

/// Logo canvas height in cells.
pub const LOGO_HEIGHT: usize = 8;

/// Lit cells of the logo, as `(y, x)`.
#[rustfmt::skip]
const LOGO_MASK: [(u8, u8); 66] = [
    (0, 3), (0, 4), (0, 15),
    (1, 2), (1, 3), (1, 4), (1, 5), (1, 14), (1, 15),
    (2, 1), (2, 2), (2, 4), (2, 5), (2, 8), (2, 13), (2, 14), (2, 15), (2, 16),
    (3, 0), (3, 1), (3, 4), (3, 5), (3, 7), (3, 8), (3, 10), (3, 11), (3, 12), (3, 14), (3, 15),
    (4, 0), (4, 1), (4, 4), (4, 5), (4, 7), (4, 8), (4, 9), (4, 11), (4, 12), (4, 14), (4, 15),
    (5, 0), (5, 1), (5, 2), (5, 3), (5, 4), (5, 5), (5, 7), (5, 8), (5, 14), (5, 15),
    (6, 0), (6, 1), (6, 4), (6, 5), (6, 7), (6, 8), (6, 14), (6, 15),
    (7, 0), (7, 1), (7, 4), (7, 5), (7, 7), (7, 8), (7, 13), (7, 14),
];

/// Upper bounds for randomly sized grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBounds {
    /// Exclusive maximum row count.
    pub max_rows: usize,
    /// Exclusive maximum column count.
    pub max_cols: usize,
}

impl GridBounds {
    /// Bounds used by the compact preview.
    pub const PREVIEW: Self = Self {
        max_rows: 100,
        max_cols: 25,
    };
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            max_rows: 100,
            max_cols: 40,
        }
    }
}

/// Picks one color index with a single draw.
pub fn single_color<T>(stream: &mut dyn RandomStream, palette: &Palette<T>) -> usize {
    palette.index_from_uniform(stream.next_f64())
}

/// Randomly sized grid of independent uniform picks.
///
/// # Errors
///
/// Returns an error if either bound is zero.
pub fn random_grid<T>(
    stream: &mut dyn RandomStream,
    bounds: GridBounds,
    palette: &Palette<T>,
) -> GeneratorResult<ColorGrid> {
    let shape = GridShape::from_draws(stream, bounds.max_rows, bounds.max_cols)?;
    Ok(ColorGrid::from_strategy(
        shape,
        palette,
        &mut CellStrategy::Uniform(stream),
    ))
}

/// Randomly sized grid where each cell picks from its merged x/y buckets.
///
/// # Errors
///
/// Returns an error if either bound is zero.
pub fn bucketed_grid<T>(
    stream: &mut dyn RandomStream,
    bounds: GridBounds,
    palette: &Palette<T>,
    buckets: &ManualBuckets,
) -> GeneratorResult<ColorGrid> {
    let shape = GridShape::from_draws(stream, bounds.max_rows, bounds.max_cols)?;
    Ok(ColorGrid::from_strategy(
        shape,
        palette,
        &mut CellStrategy::BucketDraw { buckets, stream },
    ))
}

/// Grid colored by sampling `field` at the smoothed cell coordinates.
#[must_use]
pub fn noise_grid<T>(
    shape: GridShape,
    field: &NoiseField,
    smoothness: Smoothness,
    palette: &Palette<T>,
) -> ColorGrid {
    ColorGrid::from_strategy(shape, palette, &mut CellStrategy::Noise { field, smoothness })
}

/// Field built from a constant stream, for the static first render.
///
/// # Errors
///
/// Returns an error unless `value` is in `[0, 1)`.
pub fn static_field(value: f64) -> GeneratorResult<NoiseField> {
    Ok(NoiseField::new(&mut ConstantStream::new(value)?))
}

/// The preview's first render: [`PREVIEW_SHAPE`] over a constant field.
///
/// # Errors
///
/// Never fails for the built-in placeholder; kept fallible to match
/// [`static_field`].
pub fn static_preview<T>(
    smoothness: Smoothness,
    palette: &Palette<T>,
) -> GeneratorResult<ColorGrid> {
    let field = static_field(PREVIEW_PLACEHOLDER)?;
    Ok(noise_grid(PREVIEW_SHAPE, &field, smoothness, palette))
}

/// A refreshed preview.
///
/// The shape is drawn within [`GridBounds::PREVIEW`] first, then the field
/// is built from the same stream.
///
/// # Errors
///
/// Never fails with the preview bounds; kept fallible to match
/// [`random_grid`].
pub fn preview_grid<T>(
    stream: &mut dyn RandomStream,
    smoothness: Smoothness,
    palette: &Palette<T>,
) -> GeneratorResult<ColorGrid> {
    let bounds = GridBounds::PREVIEW;
    let shape = GridShape::from_draws(stream, bounds.max_rows, bounds.max_cols)?;
    let field = NoiseField::new(stream);
    Ok(noise_grid(shape, &field, smoothness, palette))
}

/// Two seeded sequences side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedComparison {
    /// Values drawn from the first seed.
    pub first: Vec<f64>,
    /// Values drawn from the second seed.
    pub second: Vec<f64>,
}

impl SeedComparison {
    /// Whether both sequences are identical.
    #[must_use]
    pub fn matches(&self) -> bool {
        self.first == self.second
    }
}

/// First `count` values of a fresh stream keyed by `seed`.
#[must_use]
pub fn draw_sequence(seed: Seed, count: usize) -> Vec<f64> {
    let mut stream = Alea::new(seed);
    (0..count).map(|_| stream.next_f64()).collect()
}

/// Draws `count` values from each of two independent seeded streams.
#[must_use]
pub fn seed_comparison(first: Seed, second: Seed, count: usize) -> SeedComparison {
    SeedComparison {
        first: draw_sequence(first, count),
        second: draw_sequence(second, count),
    }
}

/// Fully seeded noise grid.
///
/// One stream feeds, in order: the noise field (255 draws), the row
/// count, then the column count.
///
/// # Errors
///
/// Returns an error if either bound is zero.
pub fn seeded_noise_grid<T>(
    seed: Seed,
    bounds: GridBounds,
    smoothness: Smoothness,
    palette: &Palette<T>,
) -> GeneratorResult<ColorGrid> {
    let mut stream = Alea::new(seed);
    let field = NoiseField::new(&mut stream);
    let shape = GridShape::from_draws(&mut stream, bounds.max_rows, bounds.max_cols)?;
    tracing::debug!(
        seed = seed.value(),
        rows = shape.rows(),
        cols = shape.cols(),
        "seeded noise grid"
    );
    Ok(noise_grid(shape, &field, smoothness, palette))
}

/// One lit cell of the logo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoCell {
    /// Column on the 17-wide canvas.
    pub x: usize,
    /// Row on the 8-high canvas.
    pub y: usize,
    /// Palette index.
    pub index: usize,
}

/// Colors the logo mask from `field` at smoothness 10.
#[must_use]
pub fn logo<T>(field: &NoiseField, palette: &Palette<T>) -> Vec<LogoCell> {
    LOGO_MASK
        .iter()
        .map(|&(y, x)| {
            let (x, y) = (usize::from(x), usize::from(y));
            let value = field.sample(x as f64 / LOGO_SMOOTHNESS, y as f64 / LOGO_SMOOTHNESS);
            LogoCell {
                x,
                y,
                index: palette.index_from_noise(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;
    use crate::palette::SIMPLE_COLORS;
    use crate::prng::EntropyStream;

    #[test]
    fn test_seed_comparison_same_seed() {
        let comparison = seed_comparison(Seed::new(99), Seed::new(99), 4);
        assert!(comparison.matches());
        assert_eq!(comparison.first.len(), 4);
        assert_eq!(comparison.first[0], 0.433_419_715_613_126_75);
    }

    #[test]
    fn test_seed_comparison_different_seeds() {
        let comparison = seed_comparison(Seed::new(99), Seed::new(100), 4);
        assert!(!comparison.matches());
    }

    #[test]
    fn test_seeded_noise_grid_shape_for_seed_99() {
        let grid = seeded_noise_grid(
            Seed::new(99),
            GridBounds::default(),
            Smoothness::default(),
            &Palette::simple(),
        )
        .unwrap();
        assert_eq!(grid.rows(), 89);
        assert_eq!(grid.cols(), 22);
    }

    #[test]
    fn test_seeded_noise_grid_repeatable() {
        let palette = Palette::simple();
        let smoothness = Smoothness::new(7.0, 3.0).unwrap();
        let one = seeded_noise_grid(Seed::new(17), GridBounds::default(), smoothness, &palette);
        let two = seeded_noise_grid(Seed::new(17), GridBounds::default(), smoothness, &palette);
        assert_eq!(one, two);
    }

    #[test]
    fn test_random_grid_shape_within_bounds() {
        let palette = Palette::simple();
        for seed in 1..=100 {
            let mut stream = Alea::new(Seed::new(seed));
            let grid = random_grid(&mut stream, GridBounds::default(), &palette).unwrap();
            assert!((1..100).contains(&grid.rows()));
            assert!((1..40).contains(&grid.cols()));
        }
    }

    #[test]
    fn test_random_grid_with_entropy_stream() {
        let palette = Palette::simple();
        let mut stream = EntropyStream::new();
        for _ in 0..20 {
            let grid = random_grid(&mut stream, GridBounds::default(), &palette).unwrap();
            assert!((1..100).contains(&grid.rows()));
            assert!((1..40).contains(&grid.cols()));
            assert!(grid.cells().iter().all(|&index| index < palette.len()));
        }
    }

    #[test]
    fn test_static_preview_shape() {
        let palette = Palette::simple();
        let one = static_preview(Smoothness::default(), &palette).unwrap();
        let two = static_preview(Smoothness::default(), &palette).unwrap();
        assert_eq!(one, two);
        assert_eq!((one.rows(), one.cols()), (73, 9));
    }

    #[test]
    fn test_preview_grid_within_preview_bounds() {
        let palette = Palette::simple();
        let bounds = GridBounds::PREVIEW;

        let mut stream = EntropyStream::new();
        for _ in 0..20 {
            let grid = preview_grid(&mut stream, Smoothness::default(), &palette).unwrap();
            assert!((1..bounds.max_rows).contains(&grid.rows()));
            assert!((1..bounds.max_cols).contains(&grid.cols()));
        }

        let seeded = |seed| {
            let mut stream = Alea::new(Seed::new(seed));
            preview_grid(&mut stream, Smoothness::default(), &palette).unwrap()
        };
        assert_eq!(seeded(12), seeded(12));
    }

    #[test]
    fn test_random_grid_zero_bound() {
        let mut stream = Alea::new(Seed::new(1));
        let bounds = GridBounds {
            max_rows: 0,
            max_cols: 40,
        };
        assert_eq!(
            random_grid(&mut stream, bounds, &Palette::simple()),
            Err(GeneratorError::InvalidBound)
        );
    }

    #[test]
    fn test_bucketed_grid_stays_in_buckets() {
        let palette = Palette::simple();
        let buckets = ManualBuckets::article();
        let mut stream = Alea::new(Seed::new(5));
        let grid = bucketed_grid(&mut stream, GridBounds::default(), &palette, &buckets).unwrap();

        let shape = grid.shape();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let index = grid.get(row, col).unwrap();
                assert!(buckets.candidates(row, col, shape).any(|c| c == index));
            }
        }
    }

    #[test]
    fn test_single_color() {
        let mut stream = Alea::new(Seed::new(99));
        // 0.433... * 7 = 3.03
        assert_eq!(single_color(&mut stream, &Palette::simple()), 3);
    }

    #[test]
    fn test_static_field_is_repeatable() {
        let palette = Palette::simple();
        let shape = GridShape::new(73, 9);
        let smoothness = Smoothness::default();
        let first = static_field(PREVIEW_PLACEHOLDER).unwrap();
        let second = static_field(PREVIEW_PLACEHOLDER).unwrap();
        let one = noise_grid(shape, &first, smoothness, &palette);
        let two = noise_grid(shape, &second, smoothness, &palette);
        assert_eq!(one, two);
        assert!(static_field(1.5).is_err());
    }

    #[test]
    fn test_logo_covers_mask() {
        let field = static_field(LOGO_PLACEHOLDER).unwrap();
        let cells = logo(&field, &Palette::simple());
        assert_eq!(cells.len(), 66);
        for cell in &cells {
            assert!(cell.x < LOGO_WIDTH);
            assert!(cell.y < LOGO_HEIGHT);
            assert!(cell.index < SIMPLE_COLORS.len());
        }
    }
}
