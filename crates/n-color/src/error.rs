// SPDX-License-Identifier: MIT
//
// Error types for color parsing.
//
// Parsing is the only fallible entry point into the color model: every
// conversion between representations is total, so this is the whole
// error surface of the crate.

use thiserror::Error;

/// Why a color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex body (after stripping `#`) was not 6 or 8 digits long.
    #[error("invalid hex color length {len} (expected 6 or 8 hex digits)")]
    InvalidLength { len: usize },

    /// A non-hexadecimal character appeared in a hex color.
    #[error("invalid hex digit in {input:?}")]
    InvalidHexDigit { input: String },

    /// A functional notation component fell outside its valid range.
    #[error("{component} out of range in {input:?}")]
    OutOfRange {
        component: &'static str,
        input: String,
    },

    /// The string matched no known notation or color name.
    #[error("unrecognized color {0:?}")]
    Unrecognized(String),
}
