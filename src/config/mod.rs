//! Configuration file support for notesketch.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/notesketch/config.toml`. Settings include drawing defaults,
//! theme colours, keybindings and the notes directory.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorScheme;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, StorageConfig, ThemeConfig};

use crate::draw::Color;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_stroke_width = 5.0
///
/// [theme]
/// scheme = "dark"
///
/// [keybindings]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
///
/// [storage]
/// notes_directory = "/home/me/notes"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial pen settings
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Light/dark default colours
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,

    /// Note storage location
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped (or reset to their default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 2.0 - 20.0
    /// - `text_font_size`: 8.0 - 72.0
    /// - colours: `#rgb`, `#rrggbb` or `#rrggbbaa`
    fn validate_and_clamp(&mut self) {
        if !(2.0..=20.0).contains(&self.drawing.default_stroke_width) {
            warn!(
                "Invalid default_stroke_width {:.1}, clamping to 2.0-20.0 range",
                self.drawing.default_stroke_width
            );
            // NaN would survive clamp()
            self.drawing.default_stroke_width = if self.drawing.default_stroke_width.is_nan() {
                crate::draw::element::PEN_STROKE_WIDTH
            } else {
                self.drawing.default_stroke_width.clamp(2.0, 20.0)
            };
        }

        if !(8.0..=72.0).contains(&self.drawing.text_font_size) {
            warn!(
                "Invalid text_font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.text_font_size
            );
            self.drawing.text_font_size = if self.drawing.text_font_size.is_nan() {
                crate::draw::element::TEXT_FONT_SIZE
            } else {
                self.drawing.text_font_size.clamp(8.0, 72.0)
            };
        }

        if let Some(color) = &self.drawing.default_color {
            if Color::new(color.as_str()).to_rgba().is_none() {
                warn!("Invalid default_color '{}', using theme default", color);
                self.drawing.default_color = None;
            }
        }

        if Color::new(self.theme.light_color.as_str()).to_rgba().is_none() {
            warn!(
                "Invalid theme light_color '{}', falling back to '{}'",
                self.theme.light_color,
                crate::draw::color::LIGHT_DEFAULT
            );
            self.theme.light_color = crate::draw::color::LIGHT_DEFAULT.to_string();
        }

        if Color::new(self.theme.dark_color.as_str()).to_rgba().is_none() {
            warn!(
                "Invalid theme dark_color '{}', falling back to '{}'",
                self.theme.dark_color,
                crate::draw::color::DARK_DEFAULT
            );
            self.theme.dark_color = crate::draw::color::DARK_DEFAULT.to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("notesketch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    /// - The keybindings contain an invalid or duplicate entry
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid keybindings in {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the config to TOML and writes it to `config_path`, creating
    /// the parent directory if needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Directory holding note files.
    pub fn notes_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.notes_directory {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join("notesketch").join("notes"))
    }

    /// Pen colour a new editor starts with.
    pub fn initial_color(&self) -> Color {
        match &self.drawing.default_color {
            Some(color) => Color::new(color.as_str()),
            None => self.theme_color(self.theme.scheme),
        }
    }

    /// Theme default colour for `scheme`.
    pub fn theme_color(&self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Light => Color::new(self.theme.light_color.as_str()),
            ColorScheme::Dark => Color::new(self.theme.dark_color.as_str()),
        }
    }
}
