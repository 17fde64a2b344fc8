// SPDX-License-Identifier: MIT
//
// Color string parsing: hex, CSS-style functional notations, and the
// handful of names the palette generator relies on.
//
// Functional notations are matched with anchored regexes compiled once.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::Color;
use crate::error::ParseColorError;
use crate::space::{Cmyk, Hsl, Lab};

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Parse `#RRGGBB` or `#RRGGBBAA` (case-insensitive, `#` optional).
///
/// # Errors
///
/// [`ParseColorError::InvalidLength`] when the body is not 6 or 8 digits,
/// [`ParseColorError::InvalidHexDigit`] on a non-hex character.
pub fn parse_hex(s: &str) -> Result<Color, ParseColorError> {
    let body = s.strip_prefix('#').unwrap_or(s);
    let bytes = body.as_bytes();

    if bytes.len() != 6 && bytes.len() != 8 {
        return Err(ParseColorError::InvalidLength { len: bytes.len() });
    }

    let bad_digit = || ParseColorError::InvalidHexDigit {
        input: s.to_string(),
    };

    let mut channels = [255u8; 4];
    for (slot, pair) in channels.iter_mut().zip(bytes.chunks_exact(2)) {
        *slot = parse_hex_byte(pair).ok_or_else(bad_digit)?;
    }

    let [r, g, b, a] = channels;
    Ok(Color::rgba8(r, g, b, a))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Functional Notations ────────────────────────────────────────────────────

const NUM: &str = r"\s*(-?\d+(?:\.\d+)?)\s*";
const PCT: &str = r"\s*(\d+(?:\.\d+)?)%?\s*";

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^rgba?\({NUM},{NUM},{NUM}(?:,{NUM})?\)$")).expect("valid regex")
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^hsl\({NUM},{PCT},{PCT}\)$")).expect("valid regex")
});

static LAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^lab\({NUM},{NUM},{NUM}\)$")).expect("valid regex")
});

static CMYK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^cmyk\({PCT},{PCT},{PCT},{PCT}\)$")).expect("valid regex")
});

/// Parse any supported notation.
///
/// Supported formats (case-insensitive, surrounding whitespace ignored):
/// - Hex: `#FF8800`, `ff8800cc`
/// - RGB: `rgb(255, 136, 0)`, `rgba(255, 136, 0, 0.5)`
/// - HSL: `hsl(32, 100%, 50%)` (hue in degrees)
/// - LAB: `lab(70.5, 35.2, 75.0)`
/// - CMYK: `cmyk(0%, 47%, 100%, 0%)`
/// - Names: `black`, `white`, `red`, `green`, `blue`, `orange`, `purple`,
///   `yellow`, `pink`
///
/// # Errors
///
/// Returns a [`ParseColorError`] describing the first problem found.
pub fn parse_color(input: &str) -> Result<Color, ParseColorError> {
    let normalized = input.trim().to_ascii_lowercase();

    if let Some(color) = named(&normalized) {
        return Ok(color);
    }

    if let Some(caps) = RGB_RE.captures(&normalized) {
        let channel = |i: usize| -> Result<f64, ParseColorError> {
            let v = number(&caps[i]);
            if (0.0..=255.0).contains(&v) {
                Ok(v / 255.0)
            } else {
                Err(out_of_range("rgb channel", input))
            }
        };
        let alpha = match caps.get(4) {
            Some(m) => {
                let a = number(m.as_str());
                if !(0.0..=1.0).contains(&a) {
                    return Err(out_of_range("alpha", input));
                }
                a
            }
            None => 1.0,
        };
        return Ok(Color::rgba(channel(1)?, channel(2)?, channel(3)?, alpha));
    }

    if let Some(caps) = HSL_RE.captures(&normalized) {
        let saturation = percent(&caps[2], "saturation", input)?;
        let lightness = percent(&caps[3], "lightness", input)?;
        let hue = number(&caps[1]) / 360.0;
        return Ok(Color::from_hsl(Hsl::new(
            crate::space::normalize_hue(hue),
            saturation,
            lightness,
        )));
    }

    if let Some(caps) = LAB_RE.captures(&normalized) {
        let l = number(&caps[1]);
        if !(0.0..=100.0).contains(&l) {
            return Err(out_of_range("lightness", input));
        }
        return Ok(Color::from_lab(Lab::new(l, number(&caps[2]), number(&caps[3]))));
    }

    if let Some(caps) = CMYK_RE.captures(&normalized) {
        return Ok(Color::from_cmyk(Cmyk::new(
            percent(&caps[1], "cyan", input)?,
            percent(&caps[2], "magenta", input)?,
            percent(&caps[3], "yellow", input)?,
            percent(&caps[4], "key", input)?,
        )));
    }

    let looks_like_hex = normalized.starts_with('#')
        || (!normalized.is_empty() && normalized.bytes().all(|b| b.is_ascii_hexdigit()));
    if looks_like_hex {
        return parse_hex(&normalized);
    }

    Err(ParseColorError::Unrecognized(input.to_string()))
}

fn named(name: &str) -> Option<Color> {
    Some(match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "blue" => Color::BLUE,
        "orange" => Color::ORANGE,
        "purple" => Color::PURPLE,
        "yellow" => Color::YELLOW,
        "pink" => Color::PINK,
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    })
}

/// The regexes only capture well-formed decimals, so this cannot fail.
fn number(s: &str) -> f64 {
    s.parse().unwrap_or(0.0)
}

/// A 0–100 percentage mapped to [0, 1].
fn percent(s: &str, component: &'static str, input: &str) -> Result<f64, ParseColorError> {
    let v = number(s);
    if (0.0..=100.0).contains(&v) {
        Ok(v / 100.0)
    } else {
        Err(out_of_range(component, input))
    }
}

fn out_of_range(component: &'static str, input: &str) -> ParseColorError {
    ParseColorError::OutOfRange {
        component,
        input: input.to_string(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
