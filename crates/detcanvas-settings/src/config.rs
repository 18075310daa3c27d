//! Configuration file model.
//!
//! A config file is JSON or TOML, picked by extension. Every section and
//! field is optional; missing values fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use detcanvas_core::constants::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, MAX_PERCENT, MIN_BOX_PERCENT,
    MIN_ZOOM_PERCENT,
};
use detcanvas_core::geometry::PixelRect;
use detcanvas_editor::{CanvasSettings, EditorSettings, ViewportSettings};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "detcanvas";

/// File name of the default config.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Headless layout settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Container width in pixels
    pub container_width: f64,
    /// Container height in pixels
    pub container_height: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
        }
    }
}

/// Logging preferences; command-line flags and `RUST_LOG` take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter level
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zoom and pan tunables
    pub viewport: ViewportSettings,
    /// Box editing tunables
    pub editor: EditorSettings,
    /// Headless layout
    pub layout: LayoutSettings,
    /// Logging
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default location, e.g. `~/.config/detcanvas/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise the default location when a file
    /// exists there, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.is_file() => Self::load_from_file(&default),
            Ok(_) => Ok(Self::default()),
            Err(err) => {
                tracing::debug!("Using built-in config: {}", err);
                Ok(Self::default())
            }
        }
    }

    /// Serializes in the given format.
    pub fn to_string_as(&self, format: ConfigFormat) -> SettingsResult<String> {
        Ok(match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = self.to_string_as(ConfigFormat::from_path(path)?)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let vp = &self.viewport;
        positive("viewport.zoom_step_percent", vp.zoom_step_percent)?;
        if !(vp.min_zoom_percent.is_finite() && vp.min_zoom_percent >= MIN_ZOOM_PERCENT) {
            return Err(ConfigError::out_of_range(
                "viewport.min_zoom_percent",
                vp.min_zoom_percent,
                "must be at least 100",
            ));
        }
        non_negative("viewport.pan_slack_x_px", vp.pan_slack_x_px)?;
        non_negative("viewport.pan_slack_y_px", vp.pan_slack_y_px)?;

        let min_box = self.editor.min_box_percent;
        if !(MIN_BOX_PERCENT..=MAX_PERCENT).contains(&min_box) {
            return Err(ConfigError::out_of_range(
                "editor.min_box_percent",
                min_box,
                "must be between 1 and 100",
            ));
        }
        positive("editor.handle_size_px", self.editor.handle_size_px)?;

        positive("layout.container_width", self.layout.container_width)?;
        positive("layout.container_height", self.layout.container_height)?;

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }
        Ok(())
    }

    /// Settings handed to the canvas.
    pub fn canvas_settings(&self) -> CanvasSettings {
        CanvasSettings {
            viewport: self.viewport,
            editor: self.editor,
        }
    }

    /// Container for the headless layout, anchored at the screen origin.
    pub fn container_rect(&self) -> PixelRect {
        PixelRect::new(
            0.0,
            0.0,
            self.layout.container_width,
            self.layout.container_height,
        )
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value, "must be > 0"))
    }
}

fn non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value, "must be >= 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport.zoom_step_percent, 10.0);
        assert_eq!(config.editor.min_box_percent, 1.0);
        assert_eq!(
            config.container_rect(),
            PixelRect::new(0.0, 0.0, 900.0, 600.0)
        );
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.json")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(ConfigFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.viewport.zoom_step_percent = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.editor.min_box_percent = 0.5;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.viewport.min_zoom_percent = 50.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "viewport.min_zoom_percent"
        ));
        config.viewport.min_zoom_percent = 150.0;
        assert!(config.validate().is_ok());

        let mut config = Config::new();
        config.layout.container_height = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[viewport]\nzoom_step_percent = 25.0\n").unwrap();
        assert_eq!(config.viewport.zoom_step_percent, 25.0);
        assert_eq!(config.viewport.min_zoom_percent, 100.0);
        assert_eq!(config.layout, LayoutSettings::default());
    }

    #[test]
    fn test_canvas_settings() {
        let mut config = Config::new();
        config.editor.handle_size_px = 14.0;
        let settings = config.canvas_settings();
        assert_eq!(settings.editor.handle_size_px, 14.0);
        assert_eq!(settings.viewport, config.viewport);
    }
}
