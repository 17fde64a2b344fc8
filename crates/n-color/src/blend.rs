// SPDX-License-Identifier: MIT
//
// Blending and interpolation between two colors.
//
// Blend modes are the separable modes from W3C Compositing and Blending Level 1,
// applied per channel in gamma-encoded sRGB and mixed by the top layer's
// alpha. Interpolation can run in RGB, HSL (shortest hue arc) or L*a*b*.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::space::{Hsl, Lab, interpolate_hue};

// ─── BlendMode ───────────────────────────────────────────────────────────────

/// Separable blend mode applied channel by channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Top replaces base.
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    /// Absolute channel difference.
    Difference,
}

impl BlendMode {
    pub const ALL: [Self; 7] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::Difference,
    ];

    /// Kebab-case name, also used in cache keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::Difference => "difference",
        }
    }

    /// Parse a mode from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.name() == lower)
    }

    /// Blend a single channel: `b` is the backdrop, `s` the source.
    #[must_use]
    fn channel(self, b: f64, s: f64) -> f64 {
        match self {
            Self::Normal => s,
            Self::Multiply => b * s,
            Self::Screen => b + s - b * s,
            Self::Overlay => {
                if b <= 0.5 {
                    2.0 * b * s
                } else {
                    // Screen against the doubled backdrop.
                    let b2 = 2.0f64.mul_add(b, -1.0);
                    b2 + s - b2 * s
                }
            }
            Self::Darken => b.min(s),
            Self::Lighten => b.max(s),
            Self::Difference => (b - s).abs(),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blend `top` over `base` with `mode`.
///
/// The blended channel is mixed with the backdrop by the top layer's alpha,
/// and the output alpha follows Porter-Duff "source over". Not symmetric.
#[must_use]
pub fn blend(base: Color, top: Color, mode: BlendMode) -> Color {
    let [br, bg, bb, ba] = base.to_rgba();
    let [tr, tg, tb, ta] = top.to_rgba();

    let mix = |b: f64, t: f64| ta.mul_add(mode.channel(b, t) - b, b);
    let alpha = ba.mul_add(1.0 - ta, ta);

    Color::rgba(mix(br, tr), mix(bg, tg), mix(bb, tb), alpha)
}

// ─── Interpolation ───────────────────────────────────────────────────────────

/// Color space used for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationSpace {
    #[default]
    Rgb,
    Hsl,
    Lab,
}

impl InterpolationSpace {
    pub const ALL: [Self; 3] = [Self::Rgb, Self::Hsl, Self::Lab];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Lab => "lab",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.name() == lower)
    }
}

impl fmt::Display for InterpolationSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Interpolate from `a` (t = 0) to `b` (t = 1) in `space`.
///
/// `t` is clamped to [0, 1]. In HSL the hue follows the shortest arc, and
/// the hue of an achromatic endpoint is ignored so grays don't drag the
/// blend through red.
#[must_use]
pub fn interpolate(a: Color, b: Color, t: f64, space: InterpolationSpace) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let alpha = lerp(a.alpha(), b.alpha(), t);

    let mixed = match space {
        InterpolationSpace::Rgb => {
            let [ar, ag, ab, _] = a.to_rgba();
            let [br, bg, bb, _] = b.to_rgba();
            Color::rgb(lerp(ar, br, t), lerp(ag, bg, t), lerp(ab, bb, t))
        }
        InterpolationSpace::Hsl => {
            let ha = a.to_hsl();
            let hb = b.to_hsl();
            let hue = if ha.saturation <= 0.0 {
                hb.hue
            } else if hb.saturation <= 0.0 {
                ha.hue
            } else {
                interpolate_hue(ha.hue, hb.hue, t)
            };
            Color::from_hsl(Hsl::new(
                hue,
                lerp(ha.saturation, hb.saturation, t),
                lerp(ha.lightness, hb.lightness, t),
            ))
        }
        InterpolationSpace::Lab => {
            let la = a.to_lab();
            let lb = b.to_lab();
            Color::from_lab(Lab::new(
                lerp(la.l, lb.l, t),
                lerp(la.a, lb.a, t),
                lerp(la.b, lb.b, t),
            ))
        }
    };

    mixed.with_alpha(alpha)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Blend ────────────────────────────────────────────────────────────

    #[test]
    fn normal_opaque_top_wins() {
        assert_eq!(blend(Color::RED, Color::BLUE, BlendMode::Normal), Color::BLUE);
    }

    #[test]
    fn normal_transparent_top_keeps_base() {
        let top = Color::BLUE.with_alpha(0.0);
        assert_eq!(blend(Color::RED, top, BlendMode::Normal), Color::RED);
    }

    #[test]
    fn multiply_with_white_is_identity() {
        let base = Color::rgb(0.3, 0.6, 0.9);
        assert_eq!(blend(base, Color::WHITE, BlendMode::Multiply), base);
    }

    #[test]
    fn screen_with_black_is_identity() {
        let base = Color::rgb(0.3, 0.6, 0.9);
        assert_eq!(blend(base, Color::BLACK, BlendMode::Screen), base);
    }

    #[test]
    fn difference_of_equal_is_black() {
        let c = Color::rgb(0.4, 0.5, 0.6);
        assert_eq!(blend(c, c, BlendMode::Difference), Color::BLACK);
    }

    #[test]
    fn blend_is_order_dependent() {
        let a = Color::rgb(0.2, 0.2, 0.2);
        let b = Color::rgb(0.9, 0.9, 0.9);
        assert_ne!(
            blend(a, b, BlendMode::Overlay),
            blend(b, a, BlendMode::Overlay)
        );
    }

    #[test]
    fn half_alpha_normal_mixes() {
        let out = blend(Color::BLACK, Color::WHITE.with_alpha(0.5), BlendMode::Normal);
        assert!(approx_eq(out.red(), 0.5, 1e-12));
        assert!(approx_eq(out.alpha(), 1.0, 1e-12));
    }

    #[test]
    fn mode_names_roundtrip() {
        for mode in BlendMode::ALL {
            assert_eq!(BlendMode::from_name(mode.name()), Some(mode));
        }
    }

    // ── Interpolate ──────────────────────────────────────────────────────

    #[test]
    fn endpoints() {
        for space in InterpolationSpace::ALL {
            let a = Color::rgb(0.1, 0.5, 0.9);
            let b = Color::rgb(0.9, 0.3, 0.1);
            let start = interpolate(a, b, 0.0, space);
            let end = interpolate(a, b, 1.0, space);
            for (x, y) in start.to_rgba().iter().zip(a.to_rgba()) {
                assert!(approx_eq(*x, y, 1e-3), "{space}: {start:?} vs {a:?}");
            }
            for (x, y) in end.to_rgba().iter().zip(b.to_rgba()) {
                assert!(approx_eq(*x, y, 1e-3), "{space}: {end:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn rgb_midpoint() {
        let mid = interpolate(Color::BLACK, Color::WHITE, 0.5, InterpolationSpace::Rgb);
        assert_eq!(mid, Color::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn hsl_ignores_gray_hue() {
        let mid = interpolate(Color::WHITE, Color::BLUE, 0.5, InterpolationSpace::Hsl);
        assert!(approx_eq(mid.to_hsl().hue, 2.0 / 3.0, 1e-9));
    }

    #[test]
    fn amount_is_clamped() {
        let out = interpolate(Color::RED, Color::BLUE, 3.0, InterpolationSpace::Rgb);
        assert_eq!(out, Color::BLUE);
    }
}
