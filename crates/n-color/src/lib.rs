// SPDX-License-Identifier: MIT
//
// n-color — the color model underneath n-chroma.
//
// A `Color` is four normalized doubles in gamma-encoded sRGB. Everything
// else is a derived view computed by pure functions:
//
//   space.rs  → HSL, HSB, XYZ, L*a*b*, CMYK, WCAG luminance/contrast
//   parse.rs  → hex and CSS-style functional notations
//   blend.rs  → separable blend modes, RGB/HSL/LAB interpolation
//   cache.rs  → thread-safe LRU memoization of the expensive paths
//
// Nothing in this crate performs I/O or can fail, except parsing.

// Color math is full of small integer-to-float casts (loop indices, bytes).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness names are inherently similar.
#![allow(clippy::similar_names)]

pub mod blend;
pub mod cache;
pub mod color;
pub mod error;
pub mod parse;
pub mod space;

pub use blend::{BlendMode, InterpolationSpace};
pub use cache::{CacheStats, ConversionCache};
pub use color::{Color, ColorComponents, RgbaSource};
pub use error::ParseColorError;
pub use space::{Cmyk, Hsb, Hsl, Lab, Xyz};
