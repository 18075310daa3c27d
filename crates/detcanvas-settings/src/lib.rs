//! Detcanvas Settings Crate
//!
//! Handles the configuration file: format detection, validation and the
//! platform default location.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, LayoutSettings, LoggingSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
