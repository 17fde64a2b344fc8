//! Accessible palette generation from a single seed color.
//!
//! Candidates are derived from the seed by a random hue rotation, a fixed
//! lightness swing away from the seed and a small saturation boost. A
//! candidate joins the palette only if it is not HSL-similar to any entry
//! already there, so the result is always mutually distinct.
//!
//! Randomness comes from an injected [`rand::Rng`]; seeded generators make
//! the output reproducible.

use n_color::space::{hue_distance, normalize_hue};
use n_color::{Color, Hsl};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::wcag::{ContrastChecker, WcagLevel};

/// Random candidates tried before falling back to fixed colors.
const MAX_ATTEMPTS: u32 = 100;

/// Seed, black, white, every random attempt and every fallback.
const MAX_PALETTE_LEN: usize = 3 + MAX_ATTEMPTS as usize + FALLBACK_COLORS.len();

/// Backfill used when random generation runs out of attempts.
const FALLBACK_COLORS: [Color; 7] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::ORANGE,
    Color::PURPLE,
    Color::YELLOW,
    Color::PINK,
];

const HUE_SIMILARITY: f64 = 0.15;
const SATURATION_SIMILARITY: f64 = 0.25;
const LIGHTNESS_SIMILARITY: f64 = 0.25;

// ---------------------------------------------------------------------------
// PaletteConfig
// ---------------------------------------------------------------------------

/// Settings for [`AccessiblePaletteGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub target_level: WcagLevel,
    /// Requested number of colors, seed included. At least 2.
    pub palette_size: usize,
    pub include_black_and_white: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            target_level: WcagLevel::Aa,
            palette_size: 5,
            include_black_and_white: true,
        }
    }
}

impl PaletteConfig {
    /// # Errors
    ///
    /// [`ConfigError::PaletteTooSmall`] when `palette_size < 2`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.palette_size < 2 {
            return Err(ConfigError::PaletteTooSmall(self.palette_size));
        }
        Ok(())
    }

    /// Contrast every generated color aims for against the seed.
    #[must_use]
    pub const fn minimum_contrast_ratio(&self) -> f64 {
        self.target_level.min_ratio()
    }
}

// ---------------------------------------------------------------------------
// AccessiblePaletteGenerator
// ---------------------------------------------------------------------------

/// Builds palettes and themes around a seed color.
#[derive(Debug, Clone)]
pub struct AccessiblePaletteGenerator {
    pub(crate) config: PaletteConfig,
    pub(crate) checker: ContrastChecker,
}

impl AccessiblePaletteGenerator {
    /// Build a generator on the shared cache.
    ///
    /// # Errors
    ///
    /// Propagates [`PaletteConfig::validate`] failures.
    pub fn new(config: PaletteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            checker: ContrastChecker::shared(),
        })
    }

    #[must_use]
    pub fn with_checker(mut self, checker: ContrastChecker) -> Self {
        self.checker = checker;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Palette around `seed` using the thread-local RNG.
    #[must_use]
    pub fn generate_palette(&self, seed: Color) -> Vec<Color> {
        self.generate_palette_with_rng(seed, &mut rand::thread_rng())
    }

    /// Reproducible palette: the same `rng_seed` always yields the same colors.
    #[must_use]
    pub fn generate_palette_seeded(&self, seed: Color, rng_seed: u64) -> Vec<Color> {
        self.generate_palette_with_rng(seed, &mut StdRng::seed_from_u64(rng_seed))
    }

    /// Palette around `seed` drawing randomness from `rng`.
    ///
    /// The seed is always first, followed by black and white when enabled.
    /// The result holds at most `palette_size` colors and may hold fewer if
    /// both random generation and the fixed backfill run out.
    #[must_use]
    pub fn generate_palette_with_rng<R: Rng + ?Sized>(
        &self,
        seed: Color,
        rng: &mut R,
    ) -> Vec<Color> {
        let size = self.config.palette_size;
        let mut palette = Vec::with_capacity(size.min(MAX_PALETTE_LEN));
        palette.push(seed);

        if self.config.include_black_and_white {
            for extreme in [Color::BLACK, Color::WHITE] {
                self.push_distinct(&mut palette, extreme);
            }
            palette.truncate(size);
        }

        let mut attempts = 0;
        while palette.len() < size && attempts < MAX_ATTEMPTS {
            attempts += 1;
            let candidate = self.contrasting_color(seed, rng);
            if self.push_distinct(&mut palette, candidate) {
                debug!(attempt = attempts, %candidate, "palette color accepted");
            }
        }

        for fallback in FALLBACK_COLORS {
            if palette.len() >= size {
                break;
            }
            if self.push_distinct(&mut palette, fallback) {
                debug!(%fallback, "palette backfilled");
            }
        }

        if palette.len() < size {
            warn!(
                %seed,
                requested = size,
                achieved = palette.len(),
                "palette smaller than requested"
            );
        }
        palette
    }

    /// A candidate hue-rotated away from `seed` with swung lightness.
    fn contrasting_color<R: Rng + ?Sized>(&self, seed: Color, rng: &mut R) -> Color {
        let hsl = self.checker.hsl(seed);
        let hue = normalize_hue(hsl.hue + rng.gen_range(0.2..=0.8));
        let saturation = (hsl.saturation + 0.1).min(1.0);
        let dark_seed = hsl.lightness < 0.5;
        let lightness = if dark_seed {
            (hsl.lightness + 0.4).min(1.0)
        } else {
            (hsl.lightness - 0.4).max(0.0)
        };

        let candidate = Color::from_hsl(Hsl::new(hue, saturation, lightness));
        if self.checker.contrast_ratio(candidate, seed) >= self.config.minimum_contrast_ratio() {
            return candidate;
        }

        let pinned = if dark_seed { 0.9 } else { 0.1 };
        Color::from_hsl(Hsl::new(hue, saturation, pinned))
    }

    /// Append `color` unless it is HSL-similar to an existing entry.
    fn push_distinct(&self, palette: &mut Vec<Color>, color: Color) -> bool {
        let hsl = self.checker.hsl(color);
        let similar = palette
            .iter()
            .any(|&existing| hsl_similar(self.checker.hsl(existing), hsl));
        if !similar {
            palette.push(color);
        }
        !similar
    }
}

impl Default for AccessiblePaletteGenerator {
    fn default() -> Self {
        Self {
            config: PaletteConfig::default(),
            checker: ContrastChecker::shared(),
        }
    }
}

/// Whether two colors are close in hue, saturation and lightness at once.
#[must_use]
pub fn is_similar_hsl(a: Color, b: Color) -> bool {
    hsl_similar(a.to_hsl(), b.to_hsl())
}

fn hsl_similar(a: Hsl, b: Hsl) -> bool {
    hue_distance(a.hue, b.hue) < HUE_SIMILARITY
        && (a.saturation - b.saturation).abs() < SATURATION_SIMILARITY
        && (a.lightness - b.lightness).abs() < LIGHTNESS_SIMILARITY
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use n_color::ConversionCache;
    use pretty_assertions::assert_eq;

    use super::*;

    fn generator(config: PaletteConfig) -> AccessiblePaletteGenerator {
        AccessiblePaletteGenerator::new(config)
            .unwrap()
            .with_checker(ContrastChecker::new(Arc::new(ConversionCache::new())))
    }

    fn assert_distinct(palette: &[Color]) {
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert!(!is_similar_hsl(*a, *b), "{a} ~ {b} in {palette:?}");
            }
        }
    }

    // ── Config ──────────────────────────────────────────────────────

    #[test]
    fn default_config() {
        let config = PaletteConfig::default();
        assert_eq!(config.palette_size, 5);
        assert!(config.include_black_and_white);
        assert_eq!(config.minimum_contrast_ratio(), 4.5);
    }

    #[test]
    fn rejects_tiny_palette() {
        let config = PaletteConfig {
            palette_size: 1,
            ..PaletteConfig::default()
        };
        assert_eq!(
            AccessiblePaletteGenerator::new(config).unwrap_err(),
            ConfigError::PaletteTooSmall(1)
        );
    }

    // ── Similarity ──────────────────────────────────────────────────

    #[test]
    fn similarity_needs_all_three_axes() {
        let a = Color::from_hsl(Hsl::new(0.0, 0.5, 0.5));
        assert!(is_similar_hsl(a, Color::from_hsl(Hsl::new(0.1, 0.6, 0.4))));
        assert!(!is_similar_hsl(a, Color::from_hsl(Hsl::new(0.2, 0.5, 0.5))));
        assert!(!is_similar_hsl(a, Color::from_hsl(Hsl::new(0.0, 0.9, 0.5))));
        assert!(!is_similar_hsl(a, Color::from_hsl(Hsl::new(0.0, 0.5, 0.9))));
    }

    #[test]
    fn similarity_wraps_hue() {
        let a = Color::from_hsl(Hsl::new(0.95, 0.5, 0.5));
        let b = Color::from_hsl(Hsl::new(0.05, 0.5, 0.5));
        assert!(is_similar_hsl(a, b));
    }

    // ── Generation ──────────────────────────────────────────────────

    #[test]
    fn seed_then_black_and_white() {
        let palette = generator(PaletteConfig::default()).generate_palette_seeded(Color::BLUE, 7);
        assert_eq!(&palette[..3], &[Color::BLUE, Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn same_rng_seed_same_palette() {
        let g = generator(PaletteConfig::default());
        let seed = Color::rgb8(200, 80, 40);
        assert_eq!(
            g.generate_palette_seeded(seed, 42),
            g.generate_palette_seeded(seed, 42)
        );
    }

    #[test]
    fn palettes_are_distinct_and_bounded() {
        let seeds = [
            Color::BLUE,
            Color::rgb8(240, 240, 240),
            Color::rgb8(20, 20, 20),
            Color::rgb8(255, 200, 0),
            Color::rgb8(90, 160, 90),
        ];
        for size in [2, 3, 5, 8] {
            for include in [true, false] {
                let g = generator(PaletteConfig {
                    palette_size: size,
                    include_black_and_white: include,
                    ..PaletteConfig::default()
                });
                for (i, seed) in seeds.into_iter().enumerate() {
                    let palette = g.generate_palette_seeded(seed, i as u64);
                    assert!(palette.len() <= size);
                    assert_eq!(palette[0], seed);
                    assert_distinct(&palette);
                }
            }
        }
    }

    #[test]
    fn size_two_keeps_seed_and_black() {
        let g = generator(PaletteConfig {
            palette_size: 2,
            ..PaletteConfig::default()
        });
        assert_eq!(
            g.generate_palette_seeded(Color::BLUE, 1),
            vec![Color::BLUE, Color::BLACK]
        );
    }

    #[test]
    fn near_black_seed_skips_black() {
        let seed = Color::rgb8(10, 10, 10);
        let palette = generator(PaletteConfig::default()).generate_palette_seeded(seed, 3);
        assert_eq!(palette[0], seed);
        assert!(!palette.contains(&Color::BLACK));
        assert!(palette.contains(&Color::WHITE));
    }

    #[test]
    fn unreachable_size_returns_what_was_found() {
        let g = generator(PaletteConfig {
            palette_size: usize::MAX,
            ..PaletteConfig::default()
        });
        let palette = g.generate_palette_seeded(Color::BLUE, 1);
        assert!(palette.len() >= 5);
        assert!(palette.len() <= MAX_PALETTE_LEN);
        assert_eq!(palette[0], Color::BLUE);
        assert_distinct(&palette);
    }

    #[test]
    fn thread_rng_variant_is_distinct() {
        let palette = generator(PaletteConfig::default()).generate_palette(Color::RED);
        assert_eq!(palette[0], Color::RED);
        assert_distinct(&palette);
    }
}
