//! Named five-role themes derived from a seed color.
//!
//! ```text
//! seed ──► primary    (seed)
//!      ├─► secondary  (hue + 90°)
//!      ├─► accent     (hue + 180°, saturation + 0.1)
//!      ├─► background (black or white, whichever the seed is not near)
//!      └─► text       (the other extreme)
//! ```
//!
//! [`AccessiblePaletteGenerator::generate_theme`] is fully deterministic and
//! performs no contrast checks on secondary or accent;
//! [`AccessiblePaletteGenerator::generate_verified_theme`] repairs those two
//! against the background.

use n_color::space::normalize_hue;
use n_color::{Color, Hsl};
use serde::Serialize;
use tracing::debug;

use crate::enhance::{AccessibilityEnhancer, AdjustmentStrategy};
use crate::palette::AccessiblePaletteGenerator;

/// Lightness offset of the light and dark variants.
const VARIANT_OFFSET: f64 = 0.2;

// ---------------------------------------------------------------------------
// ColorVariant
// ---------------------------------------------------------------------------

/// A color with lighter and darker companions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorVariant {
    pub base: Color,
    pub light: Color,
    pub dark: Color,
}

impl ColorVariant {
    #[must_use]
    pub fn new(base: Color) -> Self {
        Self {
            base,
            light: base.lighten(VARIANT_OFFSET),
            dark: base.darken(VARIANT_OFFSET),
        }
    }
}

impl From<Color> for ColorVariant {
    fn from(base: Color) -> Self {
        Self::new(base)
    }
}

// ---------------------------------------------------------------------------
// ColorTheme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorTheme {
    pub name: String,
    pub primary: ColorVariant,
    pub secondary: ColorVariant,
    pub accent: ColorVariant,
    pub background: ColorVariant,
    pub text: ColorVariant,
}

impl ColorTheme {
    /// Role names paired with their variants, in export order.
    #[must_use]
    pub const fn roles(&self) -> [(&'static str, &ColorVariant); 5] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("background", &self.background),
            ("text", &self.text),
        ]
    }
}

impl AccessiblePaletteGenerator {
    /// Deterministic theme around `seed`.
    ///
    /// Secondary and accent are not checked against the background; use
    /// [`Self::generate_verified_theme`] for that.
    #[must_use]
    pub fn generate_theme(&self, seed: Color, name: &str) -> ColorTheme {
        let hsl = self.checker.hsl(seed);
        let (background, text) = if self.checker.luminance(seed) > 0.5 {
            (Color::BLACK, Color::WHITE)
        } else {
            (Color::WHITE, Color::BLACK)
        };

        let accent = Color::from_hsl(Hsl::new(
            normalize_hue(hsl.hue + 0.5),
            (hsl.saturation + 0.1).min(1.0),
            hsl.lightness,
        ))
        .with_alpha(seed.alpha());
        let secondary = Color::from_hsl(Hsl::new(
            normalize_hue(hsl.hue + 0.25),
            hsl.saturation,
            hsl.lightness,
        ))
        .with_alpha(seed.alpha());

        ColorTheme {
            name: name.to_string(),
            primary: seed.into(),
            secondary: secondary.into(),
            accent: accent.into(),
            background: background.into(),
            text: text.into(),
        }
    }

    /// Like [`Self::generate_theme`], then enhance secondary and accent
    /// against the background at the configured level with the preserve-hue
    /// strategy.
    #[must_use]
    pub fn generate_verified_theme(&self, seed: Color, name: &str) -> ColorTheme {
        let mut theme = self.generate_theme(seed, name);
        let enhancer = AccessibilityEnhancer::default()
            .with_checker(self.checker.clone())
            .with_target_level(self.config.target_level);
        let background = theme.background.base;

        for (role, variant) in [
            ("secondary", &mut theme.secondary),
            ("accent", &mut theme.accent),
        ] {
            let fixed =
                enhancer.enhance_with(AdjustmentStrategy::PreserveHue, variant.base, background);
            if fixed != variant.base {
                debug!(role, from = %variant.base, to = %fixed, "theme color repaired");
                *variant = fixed.into();
            }
        }
        theme
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
