//! Suggest a compliant replacement for a foreground color.
//!
//! The search walks HSL lightness toward the needed extreme, then trades
//! saturation away with lightness pinned, and finally falls back to the
//! better-contrasting of pure black and white. Each stage is bounded, so
//! the search always terminates and always yields at least one color.

use n_color::{Color, Hsl};
use tracing::debug;

use crate::wcag::{ContrastChecker, WcagLevel};

/// Lightness increments tried when hue is preserved.
const LIGHTNESS_STEPS: u32 = 10;

/// Saturation factors tried with lightness pinned to an extreme.
const SATURATION_FACTORS: [f64; 5] = [0.8, 0.6, 0.4, 0.2, 0.0];

/// Finds WCAG-compliant alternatives for a target color on a base color.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    checker: ContrastChecker,
}

impl SuggestionEngine {
    #[must_use]
    pub const fn new(checker: ContrastChecker) -> Self {
        Self { checker }
    }

    #[must_use]
    pub const fn checker(&self) -> &ContrastChecker {
        &self.checker
    }

    /// Suggest colors close to `target` that reach `level` against `base`.
    ///
    /// Returns `[target]` untouched when it already complies. The result is
    /// never empty: the last resort is black or white, whichever contrasts
    /// more with `base`.
    #[must_use]
    pub fn suggest(
        &self,
        base: Color,
        target: Color,
        level: WcagLevel,
        preserve_hue: bool,
    ) -> Vec<Color> {
        if self.checker.meets(base, target, level) {
            return vec![target];
        }

        let needs_darkening = self.checker.luminance(base) > 0.5;
        let hsl = self.checker.hsl(target);

        if preserve_hue {
            if let Some(found) = self.walk_lightness(base, target, hsl, level, needs_darkening) {
                return vec![found];
            }
        }

        if let Some(found) = self.drain_saturation(base, target, hsl, level, needs_darkening) {
            return vec![found];
        }

        // May oppose the walk direction on mid-luminance bases.
        let fallback = if self.checker.contrast_ratio(Color::BLACK, base)
            >= self.checker.contrast_ratio(Color::WHITE, base)
        {
            Color::BLACK
        } else {
            Color::WHITE
        };
        debug!(%target, %fallback, "no compliant suggestion, using extreme");
        vec![fallback]
    }

    /// Step lightness linearly toward 0 or 1 with hue and saturation fixed.
    fn walk_lightness(
        &self,
        base: Color,
        target: Color,
        hsl: Hsl,
        level: WcagLevel,
        darken: bool,
    ) -> Option<Color> {
        let l = hsl.lightness;
        (1..=LIGHTNESS_STEPS).find_map(|i| {
            let t = f64::from(i) / f64::from(LIGHTNESS_STEPS);
            let lightness = if darken {
                l * (1.0 - t)
            } else {
                t.mul_add(1.0 - l, l)
            };
            let candidate = Color::from_hsl(Hsl { lightness, ..hsl }).with_alpha(target.alpha());
            self.checker.meets(base, candidate, level).then(|| {
                debug!(step = i, %candidate, "suggestion found by lightness walk");
                candidate
            })
        })
    }

    /// Pin lightness to the extreme and reduce saturation stepwise.
    fn drain_saturation(
        &self,
        base: Color,
        target: Color,
        hsl: Hsl,
        level: WcagLevel,
        darken: bool,
    ) -> Option<Color> {
        let lightness = if darken { 0.0 } else { 1.0 };
        SATURATION_FACTORS.into_iter().find_map(|factor| {
            let candidate = Color::from_hsl(Hsl {
                saturation: hsl.saturation * factor,
                lightness,
                ..hsl
            })
            .with_alpha(target.alpha());
            self.checker.meets(base, candidate, level).then(|| {
                debug!(factor, %candidate, "suggestion found by saturation drain");
                candidate
            })
        })
    }
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

    fn engine() -> SuggestionEngine {
        SuggestionEngine::new(ContrastChecker::new(Arc::new(ConversionCache::new())))
    }

    #[test]
    fn compliant_target_is_returned_unchanged() {
        let target = Color::rgb8(20, 20, 120);
        let out = engine().suggest(Color::WHITE, target, WcagLevel::Aa, true);
        assert_eq!(out, vec![target]);
    }

    #[test]
    fn light_gray_on_white_darkens() {
        let target = Color::rgb8(200, 200, 200);
        let out = engine().suggest(Color::WHITE, target, WcagLevel::Aa, true);
        assert_eq!(out.len(), 1);
        let found = out[0];
        assert!(found.contrast_ratio(Color::WHITE) >= 4.5);
        assert!(found.luminance() < target.luminance());
        // Still a gray.
        assert!(found.to_hsl().saturation < 1e-6);
    }

    #[test]
    fn dark_base_lightens() {
        let target = Color::rgb8(40, 40, 90);
        let out = engine().suggest(Color::BLACK, target, WcagLevel::Aaa, true);
        assert!(out[0].contrast_ratio(Color::BLACK) >= 7.0);
        assert!(out[0].luminance() > target.luminance());
    }

    #[test]
    fn hue_is_kept_by_lightness_walk() {
        let target = Color::rgb8(255, 180, 180);
        let out = engine().suggest(Color::WHITE, target, WcagLevel::Aa, true);
        let hue = out[0].to_hsl().hue;
        assert!((hue - target.to_hsl().hue).abs() < 1e-3, "hue {hue}");
    }

    #[test]
    fn without_hue_preservation_uses_extreme_lightness() {
        let target = Color::rgb8(200, 200, 255);
        let out = engine().suggest(Color::WHITE, target, WcagLevel::Aa, false);
        assert_eq!(out.len(), 1);
        assert!(out[0].contrast_ratio(Color::WHITE) >= 4.5);
        assert!(out[0].to_hsl().lightness < 1e-6);
    }

    #[test]
    fn lightness_walk_path() {
        let target = Color::rgb8(200, 200, 200);
        let out = engine().suggest(Color::WHITE, target, WcagLevel::Aa, true);
        // Half way down: lightness 0.784 * (1 - 5/10).
        assert_eq!(out[0].to_hex(), "#646464FF");
    }

    #[test]
    fn saturation_drain_keeps_target_alpha() {
        let target = Color::rgba8(200, 200, 255, 128);
        let out = engine().suggest(Color::WHITE, target, WcagLevel::Aa, false);
        // Pinned to lightness 0 on the first factor.
        assert_eq!(out, vec![Color::rgba8(0, 0, 0, 128)]);
        assert_eq!(out[0].to_hex(), "#00000080");
    }

    #[test]
    fn mid_gray_base_falls_back_to_better_extreme() {
        let gray = Color::rgb8(150, 150, 150);
        // Luminance 0.305 asks for lighter, but neither walk nor white reaches 4.5.
        let out = engine().suggest(gray, gray, WcagLevel::Aa, true);
        assert_eq!(out, vec![Color::BLACK]);
        assert!(out[0].contrast_ratio(gray) >= 4.5);
    }

    #[test]
    fn fallback_is_opaque() {
        let gray = Color::rgba8(119, 119, 119, 64);
        let out = engine().suggest(Color::rgb8(119, 119, 119), gray, WcagLevel::Aaa, true);
        assert_eq!(out, vec![Color::BLACK]);
    }

    #[test]
    fn never_empty() {
        let gray = Color::rgb8(119, 119, 119);
        for level in WcagLevel::ALL {
            for preserve in [true, false] {
                assert!(!engine().suggest(gray, gray, level, preserve).is_empty());
            }
        }
    }
}
