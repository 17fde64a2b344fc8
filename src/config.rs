// SPDX-License-Identifier: MIT
//
// Optional TOML settings file.
//
//   cache_capacity = 256
//
//   [enhancer]
//   target_level = "aaa"
//   strategy = "minimum-change"
//   max_perceptual_distance = 25.0
//   prefer_darker = true
//
//   [palette]
//   target_level = "aa"
//   palette_size = 6
//   include_black_and_white = false
//
// Every key is optional. Command-line flags override file values.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result};
use n_access::{EnhancerConfig, PaletteConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Entries per conversion sub-cache. Unset uses the library default.
    pub cache_capacity: Option<NonZeroUsize>,
    pub enhancer: EnhancerConfig,
    pub palette: PaletteConfig,
}

impl Settings {
    /// Load `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.enhancer.validate()?;
        settings.palette.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use n_access::{AdjustmentStrategy, WcagLevel};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn missing_path_is_default() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn partial_tables() {
        let settings = Settings::parse(
            r#"
            cache_capacity = 16

            [enhancer]
            target_level = "aaa"
            strategy = "preserve-lightness"

            [palette]
            palette_size = 7
            "#,
        )
        .unwrap();

        assert_eq!(settings.cache_capacity, NonZeroUsize::new(16));
        assert_eq!(settings.enhancer.target_level, WcagLevel::Aaa);
        assert_eq!(settings.enhancer.strategy, AdjustmentStrategy::PreserveLightness);
        assert_eq!(settings.enhancer.max_perceptual_distance, 30.0);
        assert_eq!(settings.palette.palette_size, 7);
        assert!(settings.palette.include_black_and_white);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Settings::parse("[palette]\npalette_size = 1").is_err());
        assert!(Settings::parse("[enhancer]\nmax_perceptual_distance = -3.0").is_err());
        assert!(Settings::parse("cache_capacity = 0").is_err());
        assert!(Settings::parse("[enhancer]\nstrategy = \"sideways\"").is_err());
        assert!(Settings::parse("colour = true").is_err());
    }

    #[test]
    fn unreadable_file_names_path() {
        let err = Settings::load(Some(Path::new("/nonexistent/n-chroma.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/n-chroma.toml"));
    }
}
