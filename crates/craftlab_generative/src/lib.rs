//! # Craft Lab Generative
//!
//! Deterministic color-field generation for generative-art figures.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same grid
//! 2. **Ordered**: Stream consumption order is fixed and documented
//! 3. **Total**: Every operation terminates; only bad arguments fail
//! 4. **Renderer-agnostic**: Output is palette indices, never pixels
//!
//! ## Core Components
//!
//! - `Alea`: seeded stream of floats in `[0, 1)`
//! - `NoiseField`: coherent 2D simplex noise built from a stream
//! - `Palette` / `ManualBuckets`: scalar and position to color index
//! - `ColorGrid`: row-major grid assembled from a cell strategy
//! - `scene`: the article's figures built from the pieces above
//!
//! ## Example
//!
//! ```rust
//! use craftlab_generative::{
//!     scene, GridBounds, Palette, Seed, Smoothness,
//! };
//!
//! let palette = Palette::simple();
//! let grid = scene::seeded_noise_grid(
//!     Seed::new(99),
//!     GridBounds::default(),
//!     Smoothness::default(),
//!     &palette,
//! )?;
//!
//! assert_eq!((grid.rows(), grid.cols()), (89, 22));
//! # Ok::<(), craftlab_generative::GeneratorError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod grid;
pub mod noise;
pub mod palette;
pub mod prng;
pub mod scene;

pub use config::{GeneratorConfig, SmoothnessConfig};
pub use error::{GeneratorError, GeneratorResult};
pub use grid::{CellStrategy, CellValue, ColorGrid, GridShape, Smoothness};
pub use noise::NoiseField;
pub use palette::{index_from_noise, index_from_uniform, ManualBuckets, Palette, SIMPLE_COLORS};
pub use prng::{draw_int, Alea, ConstantStream, EntropyStream, RandomStream, Seed};
pub use scene::{GridBounds, LogoCell, SeedComparison};
