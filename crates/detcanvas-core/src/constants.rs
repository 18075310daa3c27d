//! Shared numeric constants.
//!
//! Box geometry is expressed in percentages of the rendered image, viewport
//! zoom in percent of the natural (fitted) size and pan in screen pixels.

/// Upper bound of any box coordinate, in percent.
pub const MAX_PERCENT: f64 = 100.0;

/// Smallest width/height a box may shrink to, in percent.
pub const MIN_BOX_PERCENT: f64 = 1.0;

/// Zoom change applied per wheel notch, in percent.
pub const ZOOM_STEP_PERCENT: f64 = 10.0;

/// Zoom floor; the image cannot be shown smaller than its fitted size.
pub const MIN_ZOOM_PERCENT: f64 = 100.0;

/// Horizontal slack added to the pan bound to absorb the 2px frame border.
pub const PAN_SLACK_X_PX: f64 = 4.0;

/// Vertical slack added to the pan bound (border plus baseline rounding).
pub const PAN_SLACK_Y_PX: f64 = 2.25;

/// Side length of the square move/resize grips drawn on each box corner.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Default container width used by the headless layout.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 900.0;

/// Default container height used by the headless layout.
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 600.0;

/// Tolerance used when comparing percentages against their bounds.
pub const PERCENT_EPSILON: f64 = 1e-9;
