//! Configuration type definitions.

use super::enums::ColorScheme;
use crate::draw::color::{DARK_DEFAULT, LIGHT_DEFAULT};
use crate::draw::element::{PEN_STROKE_WIDTH, TEXT_FONT_SIZE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing-related settings.
///
/// Controls the initial paint settings of a freshly opened editor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting pen colour as `#rrggbb`. When unset the theme default for the
    /// active colour scheme is used.
    #[serde(default)]
    pub default_color: Option<String>,

    /// Starting stroke width in pixels (valid range: 2.0 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: f64,

    /// Font size given to new text elements (valid range: 8.0 - 72.0)
    #[serde(default = "default_text_font_size")]
    pub text_font_size: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: None,
            default_stroke_width: default_stroke_width(),
            text_font_size: default_text_font_size(),
        }
    }
}

/// Theme colours.
///
/// The pen follows the scheme only while it still holds one of these defaults;
/// a colour the user picked explicitly is never replaced.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThemeConfig {
    #[serde(default = "default_light_color")]
    pub light_color: String,

    #[serde(default = "default_dark_color")]
    pub dark_color: String,

    /// Scheme assumed at startup
    #[serde(default)]
    pub scheme: ColorScheme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light_color: default_light_color(),
            dark_color: default_dark_color(),
            scheme: ColorScheme::default(),
        }
    }
}

/// Where drawing notes are stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Directory holding one JSON file per note. Defaults to
    /// `<data dir>/notesketch/notes`.
    #[serde(default)]
    pub notes_directory: Option<PathBuf>,
}

fn default_stroke_width() -> f64 {
    PEN_STROKE_WIDTH
}

fn default_text_font_size() -> f64 {
    TEXT_FONT_SIZE
}

fn default_light_color() -> String {
    LIGHT_DEFAULT.to_string()
}

fn default_dark_color() -> String {
    DARK_DEFAULT.to_string()
}
