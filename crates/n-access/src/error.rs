//! Configuration errors for the accessibility engines.

use thiserror::Error;

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("palette size must be at least 2, got {0}")]
    PaletteTooSmall(usize),

    #[error("max perceptual distance must be a positive number, got {0}")]
    InvalidPerceptualDistance(f64),
}
