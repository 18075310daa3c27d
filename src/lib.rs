//! # detcanvas
//!
//! Interactive detection-box canvas engine: a picture with labelled bounding
//! boxes that can be zoomed, panned, moved and resized with pointer input.
//!
//! ## Architecture
//!
//! detcanvas is organized as a workspace with multiple crates:
//!
//! 1. **detcanvas-core** - Data model, coordinate math, pointer input and capture
//! 2. **detcanvas-editor** - Viewport controller, box editor, detection store, canvas
//! 3. **detcanvas-settings** - Configuration file model and validation
//! 4. **detcanvas** - Command-line driver that replays recorded input headlessly

pub mod script;

pub use detcanvas_core::{
    BoxGeometry, Detection, DetectionSet, Error, Image, ImageSize, PixelRect, PointerEvent,
    PointerTarget, Result, ScreenPoint, WheelEvent,
};
pub use detcanvas_editor::{
    CanvasSettings, CanvasSurface, EditMode, LayoutModel, MeasurementProvider, Scene,
    ViewportController, ViewportState,
};
pub use detcanvas_settings::Config;
pub use script::{replay, InputCommand, ReplayReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr (stdout carries command output):
/// - `RUST_LOG` wins over `level` when set
/// - human-readable output, or JSON lines when `json` is true
///
/// Calling it again after a subscriber is installed is an error.
pub fn init_logging(level: &str, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", level, e))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}
