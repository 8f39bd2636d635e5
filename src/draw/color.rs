//! Colour values as they travel through the persisted scene.
//!
//! Colours are stored exactly as the UI colour picker produced them (normally a
//! `#rrggbb` string). Parsing into RGBA components only happens on demand for
//! renderers, so unrecognised values survive a load/save cycle untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default pen colour used with the light colour scheme.
pub const LIGHT_DEFAULT: &str = "#4f46e5";

/// Default pen colour used with the dark colour scheme.
pub const DARK_DEFAULT: &str = "#ef4444";

/// Paint colour used by eraser strokes.
pub const ERASER: &str = "#ffffff";

/// A colour string such as `#4f46e5`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

/// RGBA components in the range 0.0 to 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn light_default() -> Self {
        Self::new(LIGHT_DEFAULT)
    }

    pub fn dark_default() -> Self {
        Self::new(DARK_DEFAULT)
    }

    pub fn eraser() -> Self {
        Self::new(ERASER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against another colour string, ignoring hex digit case.
    pub fn matches(&self, other: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.trim())
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` notation.
    ///
    /// Returns `None` for anything else (named CSS colours, `rgb()` syntax, garbage).
    pub fn to_rgba(&self) -> Option<Rgba> {
        let hex = self.0.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);

        match hex.len() {
            3 => {
                let mut parts = hex.chars().map(|c| {
                    let doubled = format!("{c}{c}");
                    channel(&doubled)
                });
                Some(Rgba {
                    r: parts.next()??,
                    g: parts.next()??,
                    b: parts.next()??,
                    a: 1.0,
                })
            }
            6 | 8 => Some(Rgba {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: if hex.len() == 8 {
                    channel(&hex[6..8])?
                } else {
                    1.0
                },
            }),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::light_default()
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
