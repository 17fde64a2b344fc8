// SPDX-License-Identifier: MIT
//
// Color space math: pure, stateless conversions between sRGB and the
// derived representations (HSL, HSB, CIE XYZ, CIE L*a*b*, CMYK), plus the
// WCAG relative luminance and contrast ratio formulas.
//
// Every function here is total over its input domain: achromatic inputs,
// pure black and K=1 CMYK all have fixed outputs instead of NaN.
//
// Conversion pipeline:
//
//   sRGB ↔ HSL / HSB          (cylindrical, gamma-encoded)
//   sRGB ↔ Linear sRGB ↔ XYZ ↔ L*a*b*   (D65 reference white)
//   sRGB ↔ CMYK               (naive max-channel key extraction)

use serde::{Deserialize, Serialize};

// ─── Component Types ─────────────────────────────────────────────────────────

/// Hue / saturation / lightness, every component in [0, 1].
///
/// Hue is circular: 1.0 wraps back to 0.0 (red).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Hue / saturation / brightness (a.k.a. HSV), every component in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

/// CIE L*a*b* under D65.
///
/// `l` spans [0, 100]; `a` and `b` nominally [-128, 127].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// CIE XYZ scaled so that the D65 white point has Y = 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Device-independent (not ICC-accurate) CMYK, every component in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub key: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self { hue, saturation, lightness }
    }
}

impl Hsb {
    #[inline]
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self { hue, saturation, brightness }
    }
}

impl Lab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIE76 color difference: Euclidean distance in L*a*b*.
    #[must_use]
    pub fn delta_e(self, other: Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }
}

impl Xyz {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Cmyk {
    #[inline]
    #[must_use]
    pub const fn new(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        Self { cyan, magenta, yellow, key }
    }
}

// ─── Constants ───────────────────────────────────────────────────────────────

/// D65 reference white, Y normalized to 100.
pub const D65_WHITE: Xyz = Xyz::new(95.047, 100.0, 108.883);

/// CIE f(t) switch point, (6/29)^3.
const LAB_EPSILON: f64 = 0.008_856;

/// Slope of the linear segment of CIE f(t), (29/6)^2 / 3.
const LAB_KAPPA: f64 = 7.787;

const LAB_OFFSET: f64 = 16.0 / 116.0;

// ─── Hue Helpers ─────────────────────────────────────────────────────────────

/// Wrap a hue into [0, 1).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(1.0);
    // rem_euclid can return exactly 1.0 for tiny negative inputs.
    if h >= 1.0 { 0.0 } else { h }
}

/// Shortest circular distance between two hues, in [0, 0.5].
#[inline]
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(1.0);
    d.min(1.0 - d)
}

/// Interpolate between two hues along the shortest arc.
#[inline]
#[must_use]
pub fn interpolate_hue(h1: f64, h2: f64, t: f64) -> f64 {
    let mut diff = h2 - h1;
    if diff > 0.5 {
        diff -= 1.0;
    } else if diff < -0.5 {
        diff += 1.0;
    }
    normalize_hue(diff.mul_add(t, h1))
}

// ─── sRGB ↔ HSL ──────────────────────────────────────────────────────────────

/// Hue in [0, 1) from the max/min decomposition. Zero for grays.
fn hue_from_rgb(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta <= 0.0 {
        return 0.0;
    }
    #[allow(clippy::float_cmp)]
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    normalize_hue(sector / 6.0)
}

/// Convert gamma-encoded sRGB (0.0–1.0) to HSL.
#[must_use]
pub fn srgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    if delta <= 0.0 {
        return Hsl::new(0.0, 0.0, lightness);
    }

    let denom = 1.0 - 2.0f64.mul_add(lightness, -1.0).abs();
    let saturation = if denom <= 0.0 { 0.0 } else { (delta / denom).min(1.0) };

    Hsl::new(hue_from_rgb(r, g, b, max, delta), saturation, lightness)
}

/// Chroma/intermediate reconstruction over the six 60° hue sectors.
fn chroma_to_rgb(hue: f64, c: f64, m: f64) -> (f64, f64, f64) {
    let h6 = normalize_hue(hue) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match h6 as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        (r + m).clamp(0.0, 1.0),
        (g + m).clamp(0.0, 1.0),
        (b + m).clamp(0.0, 1.0),
    )
}

/// Convert HSL to gamma-encoded sRGB (0.0–1.0).
#[must_use]
pub fn hsl_to_srgb(hsl: Hsl) -> (f64, f64, f64) {
    let s = hsl.saturation.clamp(0.0, 1.0);
    let l = hsl.lightness.clamp(0.0, 1.0);
    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let m = l - c / 2.0;
    chroma_to_rgb(hsl.hue, c, m)
}

// ─── sRGB ↔ HSB ──────────────────────────────────────────────────────────────

/// Convert gamma-encoded sRGB (0.0–1.0) to HSB.
#[must_use]
pub fn srgb_to_hsb(r: f64, g: f64, b: f64) -> Hsb {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let saturation = if max <= 0.0 { 0.0 } else { delta / max };
    Hsb::new(hue_from_rgb(r, g, b, max, delta), saturation, max)
}

/// Convert HSB to gamma-encoded sRGB (0.0–1.0).
#[must_use]
pub fn hsb_to_srgb(hsb: Hsb) -> (f64, f64, f64) {
    let v = hsb.brightness.clamp(0.0, 1.0);
    let c = v * hsb.saturation.clamp(0.0, 1.0);
    chroma_to_rgb(hsb.hue, c, v - c)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single sRGB component to linear light (IEC 61966-2-1).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a single linear-light component back to sRGB.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

// ─── sRGB ↔ XYZ ──────────────────────────────────────────────────────────────

/// Convert gamma-encoded sRGB to CIE XYZ (D65, Y in [0, 100]).
#[must_use]
pub fn srgb_to_xyz(r: f64, g: f64, b: f64) -> Xyz {
    let r = srgb_to_linear(r) * 100.0;
    let g = srgb_to_linear(g) * 100.0;
    let b = srgb_to_linear(b) * 100.0;

    Xyz::new(
        0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g)),
        0.072_175_0f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g)),
        0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192_0 * g)),
    )
}

/// Convert CIE XYZ (D65, Y in [0, 100]) to sRGB, clamped to the gamut.
#[must_use]
pub fn xyz_to_srgb(xyz: Xyz) -> (f64, f64, f64) {
    let x = xyz.x / 100.0;
    let y = xyz.y / 100.0;
    let z = xyz.z / 100.0;

    let r = (-0.498_531_4f64).mul_add(z, 3.240_454_2f64.mul_add(x, -(1.537_138_5 * y)));
    let g = 0.041_556_0f64.mul_add(z, (-0.969_266_0f64).mul_add(x, 1.876_010_8 * y));
    let b = 1.057_225_2f64.mul_add(z, 0.055_643_4f64.mul_add(x, -(0.204_025_9 * y)));

    (
        linear_to_srgb(r).clamp(0.0, 1.0),
        linear_to_srgb(g).clamp(0.0, 1.0),
        linear_to_srgb(b).clamp(0.0, 1.0),
    )
}

// ─── XYZ ↔ L*a*b* ───────────────────────────────────────────────────────────

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, LAB_OFFSET)
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let cube = f * f * f;
    if cube > LAB_EPSILON {
        cube
    } else {
        (f - LAB_OFFSET) / LAB_KAPPA
    }
}

/// Convert CIE XYZ to L*a*b* relative to the D65 white.
#[must_use]
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_WHITE.x);
    let fy = lab_f(xyz.y / D65_WHITE.y);
    let fz = lab_f(xyz.z / D65_WHITE.z);

    Lab::new(116.0f64.mul_add(fy, -16.0), 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Convert L*a*b* (D65) back to CIE XYZ.
#[must_use]
pub fn lab_to_xyz(lab: Lab) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    Xyz::new(
        lab_f_inv(fx) * D65_WHITE.x,
        lab_f_inv(fy) * D65_WHITE.y,
        lab_f_inv(fz) * D65_WHITE.z,
    )
}

/// Convert gamma-encoded sRGB to L*a*b*.
#[must_use]
pub fn srgb_to_lab(r: f64, g: f64, b: f64) -> Lab {
    xyz_to_lab(srgb_to_xyz(r, g, b))
}

/// Convert L*a*b* to sRGB, each channel clamped to [0, 1].
#[must_use]
pub fn lab_to_srgb(lab: Lab) -> (f64, f64, f64) {
    xyz_to_srgb(lab_to_xyz(lab))
}

// ─── sRGB ↔ CMYK ─────────────────────────────────────────────────────────────

/// Convert sRGB to CMYK by max-channel key extraction.
///
/// Pure black short-circuits to `(0, 0, 0, 1)`.
#[must_use]
pub fn srgb_to_cmyk(r: f64, g: f64, b: f64) -> Cmyk {
    let key = 1.0 - r.max(g).max(b);
    if key >= 1.0 {
        return Cmyk::new(0.0, 0.0, 0.0, 1.0);
    }
    let inv = 1.0 - key;
    Cmyk::new(
        (1.0 - r - key) / inv,
        (1.0 - g - key) / inv,
        (1.0 - b - key) / inv,
        key,
    )
}

/// Convert CMYK to sRGB.
#[must_use]
pub fn cmyk_to_srgb(cmyk: Cmyk) -> (f64, f64, f64) {
    let k = 1.0 - cmyk.key.clamp(0.0, 1.0);
    (
        (1.0 - cmyk.cyan.clamp(0.0, 1.0)) * k,
        (1.0 - cmyk.magenta.clamp(0.0, 1.0)) * k,
        (1.0 - cmyk.yellow.clamp(0.0, 1.0)) * k,
    )
}

// ─── WCAG Luminance & Contrast ───────────────────────────────────────────────

/// WCAG 2.x channel linearization (note the 0.03928 threshold, which
/// predates the corrected 0.04045 of the sRGB standard).
#[inline]
fn wcag_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x, in [0, 1].
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2126f64.mul_add(
        wcag_linear(r),
        0.7152f64.mul_add(wcag_linear(g), 0.0722 * wcag_linear(b)),
    )
}

/// WCAG contrast ratio between two relative luminances, in [1, 21].
///
/// Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(la: f64, lb: f64) -> f64 {
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── HSL ──────────────────────────────────────────────────────────────

    #[test]
    fn hsl_of_pure_blue() {
        let hsl = srgb_to_hsl(0.0, 0.0, 1.0);
        assert!(approx_eq(hsl.hue, 2.0 / 3.0, 1e-9), "hue: {}", hsl.hue);
        assert!(approx_eq(hsl.saturation, 1.0, 1e-9));
        assert!(approx_eq(hsl.lightness, 0.5, 1e-9));
    }

    #[test]
    fn hsl_of_gray_is_achromatic() {
        let hsl = srgb_to_hsl(0.4, 0.4, 0.4);
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 0.0);
        assert!(approx_eq(hsl.lightness, 0.4, 1e-12));
    }

    #[test]
    fn hsl_of_magenta_wraps_hue() {
        // Red is max and g < b, so the raw sector is negative before wrapping.
        let hsl = srgb_to_hsl(1.0, 0.0, 0.5);
        assert!(hsl.hue > 0.9 && hsl.hue < 1.0, "hue: {}", hsl.hue);
    }

    #[test]
    fn hsl_roundtrip() {
        let samples = [
            (0.8, 0.2, 0.3),
            (0.1, 0.6, 0.9),
            (0.5, 0.5, 0.0),
            (0.0, 0.0, 0.0),
            (1.0, 1.0, 1.0),
            (0.25, 0.75, 0.5),
        ];
        for (r, g, b) in samples {
            let (r2, g2, b2) = hsl_to_srgb(srgb_to_hsl(r, g, b));
            assert!(
                approx_eq(r, r2, 1e-9) && approx_eq(g, g2, 1e-9) && approx_eq(b, b2, 1e-9),
                "({r}, {g}, {b}) -> ({r2}, {g2}, {b2})"
            );
        }
    }

    #[test]
    fn hsl_hue_one_equals_zero() {
        let a = hsl_to_srgb(Hsl::new(1.0, 1.0, 0.5));
        let b = hsl_to_srgb(Hsl::new(0.0, 1.0, 0.5));
        assert_eq!(a, b);
    }

    // ── HSB ──────────────────────────────────────────────────────────────

    #[test]
    fn hsb_roundtrip() {
        for (r, g, b) in [(0.9, 0.1, 0.4), (0.2, 0.3, 0.4), (0.0, 0.0, 0.0)] {
            let (r2, g2, b2) = hsb_to_srgb(srgb_to_hsb(r, g, b));
            assert!(approx_eq(r, r2, 1e-9) && approx_eq(g, g2, 1e-9) && approx_eq(b, b2, 1e-9));
        }
    }

    #[test]
    fn hsb_black_has_zero_saturation() {
        let hsb = srgb_to_hsb(0.0, 0.0, 0.0);
        assert_eq!(hsb.saturation, 0.0);
        assert_eq!(hsb.brightness, 0.0);
    }

    // ── XYZ / LAB ────────────────────────────────────────────────────────

    #[test]
    fn white_maps_to_d65() {
        let xyz = srgb_to_xyz(1.0, 1.0, 1.0);
        assert!(approx_eq(xyz.x, D65_WHITE.x, 0.01), "x: {}", xyz.x);
        assert!(approx_eq(xyz.y, D65_WHITE.y, 0.01), "y: {}", xyz.y);
        assert!(approx_eq(xyz.z, D65_WHITE.z, 0.01), "z: {}", xyz.z);
    }

    #[test]
    fn lab_white_and_black() {
        let white = srgb_to_lab(1.0, 1.0, 1.0);
        assert!(approx_eq(white.l, 100.0, 0.01));
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);

        let black = srgb_to_lab(0.0, 0.0, 0.0);
        assert!(black.l.abs() < 1e-9);
    }

    #[test]
    fn lab_of_red_matches_reference() {
        // Reference values for sRGB red under D65.
        let lab = srgb_to_lab(1.0, 0.0, 0.0);
        assert!(approx_eq(lab.l, 53.24, 0.05), "L: {}", lab.l);
        assert!(approx_eq(lab.a, 80.09, 0.05), "a: {}", lab.a);
        assert!(approx_eq(lab.b, 67.20, 0.05), "b: {}", lab.b);
    }

    #[test]
    fn lab_roundtrip() {
        for (r, g, b) in [(0.8, 0.2, 0.3), (0.02, 0.01, 0.03), (0.5, 0.9, 0.1), (1.0, 1.0, 1.0)] {
            let (r2, g2, b2) = lab_to_srgb(srgb_to_lab(r, g, b));
            assert!(
                approx_eq(r, r2, 1e-3) && approx_eq(g, g2, 1e-3) && approx_eq(b, b2, 1e-3),
                "({r}, {g}, {b}) -> ({r2}, {g2}, {b2})"
            );
        }
    }

    #[test]
    fn lab_out_of_gamut_is_clamped() {
        let (r, g, b) = lab_to_srgb(Lab::new(50.0, 127.0, -128.0));
        for c in [r, g, b] {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn delta_e_is_euclidean() {
        let a = Lab::new(50.0, 0.0, 0.0);
        let b = Lab::new(53.0, 4.0, 0.0);
        assert!(approx_eq(a.delta_e(b), 5.0, 1e-12));
    }

    // ── CMYK ─────────────────────────────────────────────────────────────

    #[test]
    fn cmyk_of_red() {
        let cmyk = srgb_to_cmyk(1.0, 0.0, 0.0);
        assert_eq!(cmyk, Cmyk::new(0.0, 1.0, 1.0, 0.0));
        assert_eq!(cmyk_to_srgb(cmyk), (1.0, 0.0, 0.0));
    }

    #[test]
    fn cmyk_of_black_avoids_division() {
        assert_eq!(srgb_to_cmyk(0.0, 0.0, 0.0), Cmyk::new(0.0, 0.0, 0.0, 1.0));
    }

    // ── Luminance & contrast ─────────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(0.0, 0.0, 0.0), 0.0, 1e-12));
        assert!(approx_eq(relative_luminance(1.0, 1.0, 1.0), 1.0, 1e-12));
    }

    #[test]
    fn contrast_ratio_black_white() {
        let ratio = contrast_ratio(0.0, 1.0);
        assert!(approx_eq(ratio, 21.0, 1e-12));
        assert!(approx_eq(contrast_ratio(1.0, 0.0), ratio, 1e-12));
    }

    #[test]
    fn equal_luminance_gives_unit_ratio() {
        assert!(approx_eq(contrast_ratio(0.3, 0.3), 1.0, 1e-12));
    }

    // ── Hue helpers ──────────────────────────────────────────────────────

    #[test]
    fn hue_distance_is_circular() {
        assert!(approx_eq(hue_distance(0.95, 0.05), 0.1, 1e-12));
        assert!(approx_eq(hue_distance(0.2, 0.7), 0.5, 1e-12));
    }

    #[test]
    fn interpolate_hue_short_arc() {
        let h = interpolate_hue(0.9, 0.1, 0.5);
        assert!(h < 1e-9 || h > 1.0 - 1e-9, "hue: {h}");
    }

    #[test]
    fn normalize_negative_hue() {
        assert!(approx_eq(normalize_hue(-0.25), 0.75, 1e-12));
        assert!(approx_eq(normalize_hue(1.5), 0.5, 1e-12));
    }
}
