//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Colour scheme of the surrounding application.
///
/// Drives which theme default the editor starts with and which default is
/// swapped in when the scheme changes at runtime.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Light background, indigo default pen
    #[default]
    Light,
    /// Dark background, red default pen
    Dark,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}
