// SPDX-License-Identifier: MIT
//
// n-color core value type: an immutable sRGB color with alpha.
//
// Single-character variable names (r, g, b, l, a, h, s) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// The canonical representation is four normalized doubles in gamma-encoded
// sRGB. Every other representation (HSL, HSB, XYZ, L*a*b*, CMYK, hex) is a
// derived view computed on demand by the pure functions in `space`. No
// derived state is cached on the value itself; memoization lives in
// `ConversionCache`, outside the type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;
use crate::parse;
use crate::space::{self, Cmyk, Hsb, Hsl, Lab, Xyz, normalize_hue};

// ─── Color ───────────────────────────────────────────────────────────────────

/// An sRGB color with alpha, every channel in [0, 1].
///
/// # Examples
///
/// ```
/// use n_color::Color;
///
/// let blue = Color::hex("#0000FF").unwrap();
/// let hsl = blue.to_hsl();
/// assert!((hsl.hue - 2.0 / 3.0).abs() < 1e-9);
///
/// let ratio = Color::BLACK.contrast_ratio(Color::WHITE);
/// assert!((ratio - 21.0).abs() < 1e-9);
///
/// assert_eq!(blue.to_hex(), "#0000FFFF");
/// ```
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

/// Something that can yield four normalized RGBA doubles.
///
/// This is the single bridge from foreign color objects (toolkit colors,
/// image pixels, raw buffers) into the color model. Implementors return
/// gamma-encoded sRGB; out-of-range values are clamped by [`Color::from_source`].
pub trait RgbaSource {
    fn rgba_components(&self) -> [f64; 4];
}

impl RgbaSource for [f64; 4] {
    fn rgba_components(&self) -> [f64; 4] {
        *self
    }
}

impl RgbaSource for (f64, f64, f64, f64) {
    fn rgba_components(&self) -> [f64; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

impl RgbaSource for [u8; 4] {
    fn rgba_components(&self) -> [f64; 4] {
        self.map(|c| f64::from(c) / 255.0)
    }
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from sRGB channels and alpha, each clamped to [0, 1].
    ///
    /// NaN channels collapse to 0.
    #[must_use]
    pub fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: unit(red),
            green: unit(green),
            blue: unit(blue),
            alpha: unit(alpha),
        }
    }

    /// Create an opaque color from sRGB channels (0.0 to 1.0).
    #[inline]
    #[must_use]
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Create an opaque color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit sRGBA values.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_source(&[r, g, b, a])
    }

    /// Create a color from anything that yields four normalized doubles.
    #[must_use]
    pub fn from_source<S: RgbaSource + ?Sized>(source: &S) -> Self {
        let [r, g, b, a] = source.rgba_components();
        Self::rgba(r, g, b, a)
    }

    /// Create a color from a hex string.
    ///
    /// Accepts `#RRGGBB` and `#RRGGBBAA`, case-insensitive, `#` optional.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse::parse_hex(s).ok()
    }

    /// Create an opaque color from HSL components.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let (r, g, b) = space::hsl_to_srgb(hsl);
        Self::rgb(r, g, b)
    }

    /// Create an opaque color from HSB components.
    #[must_use]
    pub fn from_hsb(hsb: Hsb) -> Self {
        let (r, g, b) = space::hsb_to_srgb(hsb);
        Self::rgb(r, g, b)
    }

    /// Create an opaque color from CIE L*a*b* (D65), clamped to the sRGB gamut.
    #[must_use]
    pub fn from_lab(lab: Lab) -> Self {
        let (r, g, b) = space::lab_to_srgb(lab);
        Self::rgb(r, g, b)
    }

    /// Create an opaque color from CIE XYZ (D65), clamped to the sRGB gamut.
    #[must_use]
    pub fn from_xyz(xyz: Xyz) -> Self {
        let (r, g, b) = space::xyz_to_srgb(xyz);
        Self::rgb(r, g, b)
    }

    /// Create an opaque color from CMYK components.
    #[must_use]
    pub fn from_cmyk(cmyk: Cmyk) -> Self {
        let (r, g, b) = space::cmyk_to_srgb(cmyk);
        Self::rgb(r, g, b)
    }

    // ─── Constants ───────────────────────────────────────────────────────

    /// Pure black.
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// CSS `red`, `#FF0000`.
    pub const RED: Self = Self::opaque(1.0, 0.0, 0.0);

    /// CSS `green`, `#008000`.
    pub const GREEN: Self = Self::opaque(0.0, 128.0 / 255.0, 0.0);

    /// CSS `blue`, `#0000FF`.
    pub const BLUE: Self = Self::opaque(0.0, 0.0, 1.0);

    /// CSS `orange`, `#FFA500`.
    pub const ORANGE: Self = Self::opaque(1.0, 165.0 / 255.0, 0.0);

    /// CSS `purple`, `#800080`.
    pub const PURPLE: Self = Self::opaque(128.0 / 255.0, 0.0, 128.0 / 255.0);

    /// CSS `yellow`, `#FFFF00`.
    pub const YELLOW: Self = Self::opaque(1.0, 1.0, 0.0);

    /// CSS `pink`, `#FFC0CB`.
    pub const PINK: Self = Self::opaque(1.0, 192.0 / 255.0, 203.0 / 255.0);

    const fn opaque(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    // ─── Channel Access ──────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn red(self) -> f64 {
        self.red
    }

    #[inline]
    #[must_use]
    pub const fn green(self) -> f64 {
        self.green
    }

    #[inline]
    #[must_use]
    pub const fn blue(self) -> f64 {
        self.blue
    }

    #[inline]
    #[must_use]
    pub const fn alpha(self) -> f64 {
        self.alpha
    }

    /// Return a copy with the given alpha (clamped to [0, 1]).
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: unit(alpha),
            ..self
        }
    }

    /// Whether alpha is 1.0.
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Channels as `[red, green, blue, alpha]`.
    #[inline]
    #[must_use]
    pub const fn to_rgba(self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Channels quantized to 8 bits.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.red), to_u8(self.green), to_u8(self.blue))
    }

    /// Channels and alpha quantized to 8 bits.
    #[must_use]
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb8();
        (r, g, b, to_u8(self.alpha))
    }

    /// Uppercase `#RRGGBBAA`, always eight digits.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        space::srgb_to_hsl(self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_hsb(self) -> Hsb {
        space::srgb_to_hsb(self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_xyz(self) -> Xyz {
        space::srgb_to_xyz(self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        space::srgb_to_lab(self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_cmyk(self) -> Cmyk {
        space::srgb_to_cmyk(self.red, self.green, self.blue)
    }

    /// Every representation at once.
    #[must_use]
    pub fn components(self) -> ColorComponents {
        ColorComponents {
            rgba: self.to_rgba(),
            hex: self.to_hex(),
            hsl: self.to_hsl(),
            hsb: self.to_hsb(),
            lab: self.to_lab(),
            xyz: self.to_xyz(),
            cmyk: self.to_cmyk(),
            luminance: self.luminance(),
        }
    }

    // ─── Metrics ─────────────────────────────────────────────────────────

    /// WCAG relative luminance. Alpha is ignored.
    #[must_use]
    pub fn luminance(self) -> f64 {
        space::relative_luminance(self.red, self.green, self.blue)
    }

    /// WCAG contrast ratio against `other`, in [1, 21].
    #[must_use]
    pub fn contrast_ratio(self, other: Self) -> f64 {
        space::contrast_ratio(self.luminance(), other.luminance())
    }

    /// CIE76 distance to `other` in L*a*b*.
    #[must_use]
    pub fn delta_e(self, other: Self) -> f64 {
        self.to_lab().delta_e(other.to_lab())
    }

    // ─── HSL Adjustments ─────────────────────────────────────────────────
    //
    // These rebuild the color from HSL and keep the original alpha.

    fn map_hsl(self, f: impl FnOnce(Hsl) -> Hsl) -> Self {
        Self::from_hsl(f(self.to_hsl())).with_alpha(self.alpha)
    }

    /// Replace the hue (wrapped into [0, 1)).
    #[must_use]
    pub fn with_hue(self, hue: f64) -> Self {
        self.map_hsl(|hsl| Hsl { hue: normalize_hue(hue), ..hsl })
    }

    /// Replace the HSL saturation (clamped to [0, 1]).
    #[must_use]
    pub fn with_saturation(self, saturation: f64) -> Self {
        self.map_hsl(|hsl| Hsl { saturation: unit(saturation), ..hsl })
    }

    /// Replace the HSL lightness (clamped to [0, 1]).
    #[must_use]
    pub fn with_lightness(self, lightness: f64) -> Self {
        self.map_hsl(|hsl| Hsl { lightness: unit(lightness), ..hsl })
    }

    /// Rotate the hue by `turns` (1.0 is a full revolution).
    #[must_use]
    pub fn shift_hue(self, turns: f64) -> Self {
        self.map_hsl(|hsl| Hsl { hue: normalize_hue(hsl.hue + turns), ..hsl })
    }

    /// Hue rotated by half a turn.
    #[must_use]
    pub fn complement(self) -> Self {
        self.shift_hue(0.5)
    }

    /// Raise HSL lightness by `amount` (clamped).
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.map_hsl(|hsl| Hsl { lightness: unit(hsl.lightness + amount), ..hsl })
    }

    /// Lower HSL lightness by `amount` (clamped).
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.lighten(-amount)
    }
}

// ─── ColorComponents ─────────────────────────────────────────────────────────

/// Every derived representation of a [`Color`], bundled for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorComponents {
    pub rgba: [f64; 4],
    pub hex: String,
    pub hsl: Hsl,
    pub hsb: Hsb,
    pub lab: Lab,
    pub xyz: Xyz,
    pub cmyk: Cmyk,
    pub luminance: f64,
}

// ─── Trait Impls ─────────────────────────────────────────────────────────────

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color::rgba({:.4}, {:.4}, {:.4}, {:.2})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f64 = 1e-6;
        self.to_rgba()
            .iter()
            .zip(other.to_rgba())
            .all(|(a, b)| (a - b).abs() < EPS)
    }
}

impl Default for Color {
    /// Default is opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<[f64; 4]> for Color {
    fn from(rgba: [f64; 4]) -> Self {
        Self::from_source(&rgba)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Clamp to [0, 1], mapping NaN to 0.
#[inline]
fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
