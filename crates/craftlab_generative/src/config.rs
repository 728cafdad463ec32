//! # Generator Configuration
//!
//! Palette, bucket table, grid bounds and smoothness loaded from a TOML
//! file. The library never reads configuration on its own; callers load it
//! once and pass the resolved values into the generator.
//!
//! ```toml
//! max_rows = 100
//! max_cols = 40
//! seed = 99
//! palette = ["purple", "blue", "green", "lime", "yellow", "pink", "orange"]
//! buckets = [["blue", "purple", "purple"], ["pink", "orange", "orange"]]
//!
//! [smoothness]
//! x = 20.0
//! y = 20.0
//! ```
//!
//! Every field is optional; missing ones take the article's values. The
//! article's bucket table only applies to the article's palette: a custom
//! palette without `buckets` (or with `buckets = []`) has no manual
//! buckets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, GeneratorResult};
use crate::grid::Smoothness;
use crate::palette::{ManualBuckets, Palette, SIMPLE_COLORS};
use crate::prng::Seed;
use crate::scene::GridBounds;

/// Smoothness section of the config file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothnessConfig {
    /// Row divisor.
    pub x: f64,
    /// Column divisor.
    pub y: f64,
}

impl Default for SmoothnessConfig {
    fn default() -> Self {
        let smoothness = Smoothness::default();
        Self {
            x: smoothness.x(),
            y: smoothness.y(),
        }
    }
}

/// Top-level generator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Exclusive maximum for drawn row counts.
    pub max_rows: usize,
    /// Exclusive maximum for drawn column counts.
    pub max_cols: usize,
    /// Fixed seed; absent means the caller picks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Ordered color tokens.
    pub palette: Vec<String>,
    /// Manual bucket table, as tokens from `palette`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<Vec<String>>>,
    /// Noise smoothness.
    pub smoothness: SmoothnessConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let bounds = GridBounds::default();
        Self {
            max_rows: bounds.max_rows,
            max_cols: bounds.max_cols,
            seed: None,
            palette: SIMPLE_COLORS.iter().map(|&color| color.to_owned()).collect(),
            buckets: None,
            smoothness: SmoothnessConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] on malformed TOML or values
    /// that fail [`GeneratorConfig::validate`].
    pub fn from_toml_str(source: &str) -> GeneratorResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| GeneratorError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if the file cannot be read, otherwise
    /// as [`GeneratorConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "generator config loaded");
        Ok(config)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> GeneratorResult<String> {
        toml::to_string(self).map_err(|e| GeneratorError::InvalidConfig(e.to_string()))
    }

    /// Checks every value the generator will rely on.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::InvalidBound`] for a zero bound
    /// - [`GeneratorError::InvalidSmoothness`] for a non-positive divisor
    /// - [`GeneratorError::EmptyPalette`] for an empty palette
    /// - [`GeneratorError::InvalidConfig`] for a bad bucket table
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.max_rows == 0 || self.max_cols == 0 {
            return Err(GeneratorError::InvalidBound);
        }
        self.smoothness()?;
        self.manual_buckets()?;
        Ok(())
    }

    /// Grid bounds for randomly sized scenes.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        GridBounds {
            max_rows: self.max_rows,
            max_cols: self.max_cols,
        }
    }

    /// Configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<Seed> {
        self.seed.map(Seed::new)
    }

    /// Smoothness divisors.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidSmoothness`] unless both are positive.
    pub fn smoothness(&self) -> GeneratorResult<Smoothness> {
        Smoothness::new(self.smoothness.x, self.smoothness.y)
    }

    /// Palette of configured tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyPalette`] if no colors are configured.
    pub fn palette(&self) -> GeneratorResult<Palette<String>> {
        Palette::new(self.palette.clone())
    }

    /// Bucket table resolved against [`GeneratorConfig::palette`].
    ///
    /// Without a table, the article's palette gets the article's buckets
    /// and any other palette gets `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or a bucket is empty or
    /// names an unknown color.
    pub fn manual_buckets(&self) -> GeneratorResult<Option<ManualBuckets>> {
        let palette = self.palette()?;
        match &self.buckets {
            Some(table) if !table.is_empty() => {
                ManualBuckets::from_tokens(table, &palette).map(Some)
            }
            _ if self.palette == SIMPLE_COLORS => Ok(Some(ManualBuckets::article())),
            _ => Ok(None),
        }
    }
}
