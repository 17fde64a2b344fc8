//! Bounded searches that make a color readable on a background.
//!
//! Four strategies trade off which attribute of the original color is kept:
//!
//! | Strategy             | Held fixed | Moved                       | Steps | Exhausted   |
//! |----------------------|------------|-----------------------------|-------|-------------|
//! | `PreserveHue`        | hue        | lightness and saturation    | 20    | black/white |
//! | `PreserveSaturation` | saturation | lightness, hue drift        | 20    | black/white |
//! | `PreserveLightness`  | lightness  | saturation, hue drift       | 20    | preserve-hue|
//! | `MinimumChange`      | (nothing)  | L* with a small a*/b* wobble| 30    | preserve-hue|
//!
//! The step sizes are part of the contract: the same inputs always walk the
//! same path and land on the same color.

use std::fmt;

use n_color::space::normalize_hue;
use n_color::{Color, Hsl, Lab};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::wcag::{ContrastChecker, WcagLevel};

/// HSL increment applied per step by the three HSL strategies.
const HSL_STEP: f64 = 0.05;

/// Hue drift per step, in turns.
const HUE_DRIFT: f64 = 0.02;

const MAX_HSL_STEPS: u32 = 20;
const MAX_LAB_STEPS: u32 = 30;

/// Saturation above which the preserve-hue search also moves lightness.
const SATURATION_CEILING: f64 = 0.9;

/// ΔE below which two variants count as the same color.
pub const SIMILARITY_THRESHOLD: f64 = 5.0;

/// Alternate perceptual distances used to diversify variants.
const VARIANT_DISTANCES: [f64; 5] = [15.0, 20.0, 25.0, 35.0, 40.0];

/// Most variants one call can produce: one per strategy plus one per distance.
const MAX_VARIANTS: usize = AdjustmentStrategy::ALL.len() + VARIANT_DISTANCES.len();

// ---------------------------------------------------------------------------
// AdjustmentStrategy
// ---------------------------------------------------------------------------

/// Which attribute of the original color an enhancement tries to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentStrategy {
    #[default]
    PreserveHue,
    PreserveSaturation,
    PreserveLightness,
    MinimumChange,
}

impl AdjustmentStrategy {
    /// Every strategy, in the order `suggest_variants` tries them.
    pub const ALL: [Self; 4] = [
        Self::PreserveHue,
        Self::PreserveSaturation,
        Self::PreserveLightness,
        Self::MinimumChange,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PreserveHue => "preserve-hue",
            Self::PreserveSaturation => "preserve-saturation",
            Self::PreserveLightness => "preserve-lightness",
            Self::MinimumChange => "minimum-change",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|s| s.name() == lower)
    }
}

impl fmt::Display for AdjustmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// EnhancerConfig
// ---------------------------------------------------------------------------

/// Settings for [`AccessibilityEnhancer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub target_level: WcagLevel,
    pub strategy: AdjustmentStrategy,
    /// Advisory ΔE budget. Results beyond it are logged, never rejected.
    pub max_perceptual_distance: f64,
    /// Makes lightness the primary axis of the preserve-hue search when the
    /// background also calls for a darker color.
    pub prefer_darker: bool,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            target_level: WcagLevel::Aa,
            strategy: AdjustmentStrategy::PreserveHue,
            max_perceptual_distance: 30.0,
            prefer_darker: false,
        }
    }
}

impl EnhancerConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidPerceptualDistance`] when the distance is not
    /// a finite positive number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.max_perceptual_distance;
        if d.is_finite() && d > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidPerceptualDistance(d))
        }
    }
}

// ---------------------------------------------------------------------------
// AccessibilityEnhancer
// ---------------------------------------------------------------------------

/// Adjusts colors until they reach a WCAG level against a background.
#[derive(Debug, Clone)]
pub struct AccessibilityEnhancer {
    config: EnhancerConfig,
    checker: ContrastChecker,
}

impl AccessibilityEnhancer {
    /// Build an enhancer on the shared cache.
    ///
    /// # Errors
    ///
    /// Propagates [`EnhancerConfig::validate`] failures.
    pub fn new(config: EnhancerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            checker: ContrastChecker::shared(),
        })
    }

    /// Swap in a checker backed by another cache.
    #[must_use]
    pub fn with_checker(mut self, checker: ContrastChecker) -> Self {
        self.checker = checker;
        self
    }

    #[must_use]
    pub fn with_target_level(mut self, level: WcagLevel) -> Self {
        self.config.target_level = level;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    #[must_use]
    pub const fn checker(&self) -> &ContrastChecker {
        &self.checker
    }

    /// Enhance `color` with the configured strategy.
    ///
    /// Already compliant colors come back unchanged.
    #[must_use]
    pub fn enhance(&self, color: Color, background: Color) -> Color {
        let result = self.enhance_with(self.config.strategy, color, background);

        let distance = self.distance(color, result);
        if distance > self.config.max_perceptual_distance {
            warn!(
                %color,
                %result,
                distance,
                budget = self.config.max_perceptual_distance,
                "enhanced color exceeds perceptual distance budget"
            );
        }
        result
    }

    /// Enhance `color` with `strategy`, ignoring the configured one.
    #[must_use]
    pub fn enhance_with(
        &self,
        strategy: AdjustmentStrategy,
        color: Color,
        background: Color,
    ) -> Color {
        if self.compliant(color, background) {
            return color;
        }

        let needs_darker = self.needs_darker(background);
        debug!(%color, %background, %strategy, needs_darker, "enhancing");

        match strategy {
            AdjustmentStrategy::PreserveHue => self.preserve_hue(color, background, needs_darker),
            AdjustmentStrategy::PreserveSaturation => {
                self.preserve_saturation(color, background, needs_darker)
            }
            AdjustmentStrategy::PreserveLightness => {
                self.preserve_lightness(color, background, needs_darker)
            }
            AdjustmentStrategy::MinimumChange => {
                self.minimum_change(color, background, needs_darker)
            }
        }
    }

    /// Up to `count` distinct compliant variants of `color`.
    ///
    /// Runs every strategy once, then re-runs the configured strategy with
    /// alternate distances and the opposite darkness preference until enough
    /// variants differ by at least [`SIMILARITY_THRESHOLD`]. May return fewer
    /// than `count`.
    #[must_use]
    pub fn suggest_variants(&self, color: Color, background: Color, count: usize) -> Vec<Color> {
        let mut variants: Vec<Color> = Vec::with_capacity(count.min(MAX_VARIANTS));
        let push_unique = |candidate: Color, variants: &mut Vec<Color>| {
            let similar = variants
                .iter()
                .any(|&v| is_perceptually_similar(v, candidate, SIMILARITY_THRESHOLD));
            if !similar {
                variants.push(candidate);
            }
        };

        for strategy in AdjustmentStrategy::ALL {
            push_unique(self.enhance_with(strategy, color, background), &mut variants);
        }

        for distance in VARIANT_DISTANCES {
            if variants.len() >= count {
                break;
            }
            let alternate = Self {
                config: EnhancerConfig {
                    max_perceptual_distance: distance,
                    prefer_darker: !self.config.prefer_darker,
                    ..self.config
                },
                checker: self.checker.clone(),
            };
            let candidate = alternate.enhance_with(self.config.strategy, color, background);
            debug!(
                %candidate,
                distance = alternate.distance(color, candidate),
                budget = distance,
                "alternate variant"
            );
            push_unique(candidate, &mut variants);
        }

        variants.truncate(count);
        variants
    }

    // ── Search helpers ──────────────────────────────────────────────

    fn distance(&self, a: Color, b: Color) -> f64 {
        self.checker.lab(a).delta_e(self.checker.lab(b))
    }

    fn compliant(&self, color: Color, background: Color) -> bool {
        self.checker.meets(color, background, self.config.target_level)
    }

    /// Darker if black out-contrasts white on this background.
    fn needs_darker(&self, background: Color) -> bool {
        self.checker.contrast_ratio(Color::BLACK, background)
            >= self.checker.contrast_ratio(Color::WHITE, background)
    }

    fn accept(&self, candidate: Color, background: Color, strategy: &str, step: u32) -> bool {
        let ok = self.compliant(candidate, background);
        if ok {
            debug!(%candidate, strategy, step, "compliant color found");
        }
        ok
    }

    fn extreme(needs_darker: bool) -> Color {
        debug!(needs_darker, "search exhausted, falling back to extreme");
        if needs_darker {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    fn preserve_hue(&self, color: Color, background: Color, needs_darker: bool) -> Color {
        let hsl = self.checker.hsl(color);
        let direction: f64 = if needs_darker { -1.0 } else { 1.0 };
        let lightness_primary = needs_darker == self.config.prefer_darker;

        let mut saturation = hsl.saturation;
        let mut lightness = hsl.lightness;

        for step in 1..=MAX_HSL_STEPS {
            let alternate = step % 2 == 0;
            if !lightness_primary || alternate {
                saturation = (saturation + HSL_STEP).min(1.0);
            }
            if lightness_primary || alternate || saturation > SATURATION_CEILING {
                lightness = direction.mul_add(HSL_STEP, lightness).clamp(0.0, 1.0);
            }

            let candidate =
                Color::from_hsl(Hsl::new(hsl.hue, saturation, lightness)).with_alpha(color.alpha());
            if self.accept(candidate, background, "preserve-hue", step) {
                return candidate;
            }
        }

        Self::extreme(needs_darker)
    }

    fn preserve_saturation(&self, color: Color, background: Color, needs_darker: bool) -> Color {
        let hsl = self.checker.hsl(color);
        let direction: f64 = if needs_darker { -1.0 } else { 1.0 };

        for step in 1..=MAX_HSL_STEPS {
            let t = f64::from(step);
            let lightness = (direction * HSL_STEP).mul_add(t, hsl.lightness).clamp(0.0, 1.0);
            let hue = normalize_hue(HUE_DRIFT.mul_add(t, hsl.hue));

            let candidate =
                Color::from_hsl(Hsl::new(hue, hsl.saturation, lightness)).with_alpha(color.alpha());
            if self.accept(candidate, background, "preserve-saturation", step) {
                return candidate;
            }
        }

        Self::extreme(needs_darker)
    }

    fn preserve_lightness(&self, color: Color, background: Color, needs_darker: bool) -> Color {
        let hsl = self.checker.hsl(color);

        for step in 1..=MAX_HSL_STEPS {
            let t = f64::from(step);
            let saturation = HSL_STEP.mul_add(t, hsl.saturation).min(1.0);
            let hue = normalize_hue(HUE_DRIFT.mul_add(t, hsl.hue));

            let candidate =
                Color::from_hsl(Hsl::new(hue, saturation, hsl.lightness)).with_alpha(color.alpha());
            if self.accept(candidate, background, "preserve-lightness", step) {
                return candidate;
            }
        }

        debug!("preserve-lightness exhausted, trying preserve-hue");
        self.preserve_hue(color, background, needs_darker)
    }

    fn minimum_change(&self, color: Color, background: Color, needs_darker: bool) -> Color {
        let lab = self.checker.lab(color);
        let direction: f64 = if needs_darker { -1.0 } else { 1.0 };

        for step in 1..=MAX_LAB_STEPS {
            let t = f64::from(step);
            let step_size = if step > 20 {
                8.0
            } else if step > 10 {
                4.0
            } else {
                2.0
            };
            let l = (direction * t).mul_add(step_size, lab.l).clamp(0.0, 100.0);
            let a = (t * 0.2).sin().mul_add(2.0, lab.a);
            let b = (t * 0.2).cos().mul_add(2.0, lab.b);

            let candidate = Color::from_lab(Lab::new(l, a, b)).with_alpha(color.alpha());
            if self.accept(candidate, background, "minimum-change", step) {
                return candidate;
            }
        }

        debug!("minimum-change exhausted, trying preserve-hue");
        self.preserve_hue(color, background, needs_darker)
    }
}

impl Default for AccessibilityEnhancer {
    fn default() -> Self {
        Self {
            config: EnhancerConfig::default(),
            checker: ContrastChecker::shared(),
        }
    }
}

/// Whether `a` and `b` are closer than `threshold` in CIE76 ΔE.
#[must_use]
pub fn is_perceptually_similar(a: Color, b: Color, threshold: f64) -> bool {
    a.delta_e(b) < threshold
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
