//! WCAG 2.x compliance model.
//!
//! A [`ComplianceResult`] is derived from a single contrast ratio by
//! threshold comparison against the four [`WcagLevel`] constants:
//!
//! | Level       | Minimum ratio | Meaning                   |
//! |-------------|---------------|---------------------------|
//! | `AaLarge`   | 3.0           | large text, level AA      |
//! | `Aa`        | 4.5           | normal text, level AA     |
//! | `AaaLarge`  | 4.5           | large text, level AAA     |
//! | `Aaa`       | 7.0           | normal text, level AAA    |
//!
//! `Aa` and `AaaLarge` share a threshold but stay distinct levels.

use std::fmt;
use std::sync::Arc;

use n_color::{Color, ConversionCache, Hsl, Lab};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WcagLevel
// ---------------------------------------------------------------------------

/// A WCAG conformance level, ordered by stringency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum WcagLevel {
    AaLarge,
    #[default]
    Aa,
    AaaLarge,
    Aaa,
}

impl WcagLevel {
    /// Every level in ascending stringency.
    pub const ALL: [Self; 4] = [Self::AaLarge, Self::Aa, Self::AaaLarge, Self::Aaa];

    /// Minimum contrast ratio this level requires.
    #[must_use]
    pub const fn min_ratio(self) -> f64 {
        match self {
            Self::AaLarge => 3.0,
            Self::Aa | Self::AaaLarge => 4.5,
            Self::Aaa => 7.0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AaLarge => "aa-large",
            Self::Aa => "aa",
            Self::AaaLarge => "aaa-large",
            Self::Aaa => "aaa",
        }
    }

    /// Parse a level from its name (case-insensitive, `_` accepted for `-`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|l| l.name() == lower)
    }

    const fn flag(self) -> Levels {
        match self {
            Self::AaLarge => Levels::AA_LARGE,
            Self::Aa => Levels::AA,
            Self::AaaLarge => Levels::AAA_LARGE,
            Self::Aaa => Levels::AAA,
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of satisfied WCAG levels.
    ///
    /// ```
    /// use n_access::wcag::{Levels, evaluate};
    /// use n_color::Color;
    ///
    /// let levels = evaluate(Color::BLACK, Color::WHITE).levels();
    /// assert!(levels.contains(Levels::AAA | Levels::AA));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Levels: u8 {
        const AA_LARGE  = 1 << 0;
        const AA        = 1 << 1;
        const AAA_LARGE = 1 << 2;
        const AAA       = 1 << 3;
    }
}

// ---------------------------------------------------------------------------
// ComplianceResult
// ---------------------------------------------------------------------------

/// Pass/fail flags for one foreground/background pair.
///
/// Only produced by [`ContrastChecker::evaluate`] or
/// [`ComplianceResult::from_ratio`]; the flags always agree with the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplianceResult {
    contrast_ratio: f64,
    passes_aa: bool,
    passes_aa_large: bool,
    passes_aaa: bool,
    passes_aaa_large: bool,
}

impl ComplianceResult {
    /// Derive every flag from `contrast_ratio`.
    #[must_use]
    pub fn from_ratio(contrast_ratio: f64) -> Self {
        Self {
            contrast_ratio,
            passes_aa: contrast_ratio >= WcagLevel::Aa.min_ratio(),
            passes_aa_large: contrast_ratio >= WcagLevel::AaLarge.min_ratio(),
            passes_aaa: contrast_ratio >= WcagLevel::Aaa.min_ratio(),
            passes_aaa_large: contrast_ratio >= WcagLevel::AaaLarge.min_ratio(),
        }
    }

    #[must_use]
    pub const fn contrast_ratio(&self) -> f64 {
        self.contrast_ratio
    }

    #[must_use]
    pub const fn passes_aa(&self) -> bool {
        self.passes_aa
    }

    #[must_use]
    pub const fn passes_aa_large(&self) -> bool {
        self.passes_aa_large
    }

    #[must_use]
    pub const fn passes_aaa(&self) -> bool {
        self.passes_aaa
    }

    #[must_use]
    pub const fn passes_aaa_large(&self) -> bool {
        self.passes_aaa_large
    }

    /// Whether `level` is satisfied.
    #[must_use]
    pub const fn passes_level(&self, level: WcagLevel) -> bool {
        match level {
            WcagLevel::AaLarge => self.passes_aa_large,
            WcagLevel::Aa => self.passes_aa,
            WcagLevel::AaaLarge => self.passes_aaa_large,
            WcagLevel::Aaa => self.passes_aaa,
        }
    }

    /// The most stringent satisfied level, if any.
    #[must_use]
    pub fn highest_level(&self) -> Option<WcagLevel> {
        WcagLevel::ALL
            .into_iter()
            .rev()
            .find(|&level| self.passes_level(level))
    }

    /// Every satisfied level, in ascending stringency.
    #[must_use]
    pub fn passes(&self) -> Vec<WcagLevel> {
        WcagLevel::ALL
            .into_iter()
            .filter(|&level| self.passes_level(level))
            .collect()
    }

    /// Satisfied levels as a flag set.
    #[must_use]
    pub fn levels(&self) -> Levels {
        self.passes()
            .into_iter()
            .fold(Levels::empty(), |acc, level| acc | level.flag())
    }
}

// ---------------------------------------------------------------------------
// ContrastChecker
// ---------------------------------------------------------------------------

/// Evaluates WCAG compliance through a [`ConversionCache`].
///
/// Every search in this crate funnels its color math through one of these,
/// so repeated candidates during a search hit the cache.
#[derive(Debug, Clone)]
pub struct ContrastChecker {
    cache: Arc<ConversionCache>,
}

impl ContrastChecker {
    #[must_use]
    pub const fn new(cache: Arc<ConversionCache>) -> Self {
        Self { cache }
    }

    /// A checker backed by [`ConversionCache::shared`].
    #[must_use]
    pub fn shared() -> Self {
        Self::new(ConversionCache::shared())
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ConversionCache> {
        &self.cache
    }

    /// Full compliance result for `fg` on `bg`.
    #[must_use]
    pub fn evaluate(&self, fg: Color, bg: Color) -> ComplianceResult {
        ComplianceResult::from_ratio(self.contrast_ratio(fg, bg))
    }

    #[must_use]
    pub fn contrast_ratio(&self, a: Color, b: Color) -> f64 {
        self.cache.contrast_ratio(a, b)
    }

    #[must_use]
    pub fn luminance(&self, color: Color) -> f64 {
        self.cache.luminance(color)
    }

    /// Whether `fg` on `bg` satisfies `level`.
    #[must_use]
    pub fn meets(&self, fg: Color, bg: Color, level: WcagLevel) -> bool {
        self.contrast_ratio(fg, bg) >= level.min_ratio()
    }

    #[must_use]
    pub fn hsl(&self, color: Color) -> Hsl {
        self.cache.hsl(color)
    }

    #[must_use]
    pub fn lab(&self, color: Color) -> Lab {
        self.cache.lab(color)
    }
}

impl Default for ContrastChecker {
    fn default() -> Self {
        Self::shared()
    }
}

/// Evaluate `fg` on `bg` through the shared cache.
#[must_use]
pub fn evaluate(fg: Color, bg: Color) -> ComplianceResult {
    ContrastChecker::shared().evaluate(fg, bg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
