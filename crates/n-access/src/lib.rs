//! # n-access — accessibility engine for n-chroma
//!
//! Checks and repairs foreground/background pairs against WCAG 2.x and
//! builds palettes and themes whose colors stay readable together.
//!
//! # Architecture
//!
//! ```text
//! n_color::ConversionCache (Arc, shared or injected)
//!     │
//!     ▼
//! wcag.rs:    ContrastChecker → ComplianceResult per pair
//!     │
//!     ├──► suggest.rs: lightness walk → saturation drain → black/white
//!     │
//!     ├──► enhance.rs: four bounded strategies + variant diversification
//!     │
//!     └──► palette.rs: seeded random palette with HSL-distinct entries
//!              │
//!              ▼
//!          theme.rs:   five named roles from one seed
//! ```
//!
//! Every search is bounded and ends on a defined fallback, so none of the
//! operations here can fail once a configuration has been validated.

// Mathematical code uses small integer-to-float casts (loop indices).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod enhance;
pub mod error;
pub mod palette;
pub mod suggest;
pub mod theme;
pub mod wcag;

pub use enhance::{
    AccessibilityEnhancer, AdjustmentStrategy, EnhancerConfig, is_perceptually_similar,
};
pub use error::ConfigError;
pub use palette::{AccessiblePaletteGenerator, PaletteConfig, is_similar_hsl};
pub use suggest::SuggestionEngine;
pub use theme::{ColorTheme, ColorVariant};
pub use wcag::{ComplianceResult, ContrastChecker, Levels, WcagLevel, evaluate};
