//! Coordinate math shared by the box editor and the viewport controller.
//!
//! Screen space is measured in pixels with (0,0) at the top-left of the
//! surface and +Y going down. Box space is measured in percent of the
//! rendered image, so a box keeps its position on the picture no matter
//! how the picture is zoomed or panned.
//!
//! Everything here is pure: callers supply measured pixel bases and are
//! responsible for guarding against unmeasured (zero-sized) layouts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Converts a screen-pixel displacement into a percentage displacement.
///
/// `percent_basis` and `px_basis` describe the same extent (for example the
/// width of a box) in percent and in pixels, captured when the drag started.
///
/// ```text
/// delta_percent = delta_px * percent_basis / px_basis
/// ```
///
/// `px_basis` must be non-zero; check [`PixelSize::is_measurable`] first.
pub fn px_delta_to_percent(delta_px: f64, percent_basis: f64, px_basis: f64) -> f64 {
    debug_assert!(px_basis != 0.0, "pixel basis must be measured before converting");
    delta_px * percent_basis / px_basis
}

/// Constrains `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics when `min > max`; the lower bound wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Constrains `|value| <= bound`, keeping the sign of `value`.
///
/// A negative bound collapses to zero.
pub fn clamp_magnitude(value: f64, bound: f64) -> f64 {
    let bound = bound.max(0.0);
    if value.abs() > bound {
        bound.copysign(value)
    } else {
        value
    }
}

/// A pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a new screen point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to this point.
    pub fn delta_from(&self, origin: ScreenPoint) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A measured width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    /// Creates a new pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and strictly positive, i.e. the
    /// size can serve as a conversion basis.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle in screen pixels (a "bounding client rect").
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Creates a new rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    pub fn origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }

    /// Bottom-right corner.
    pub fn far_corner(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width, self.y + self.height)
    }

    /// Width and height.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// See [`PixelSize::is_measurable`].
    pub fn is_measurable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.size().is_measurable()
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// A square of side `size` centered on `center`.
    pub fn square_around(center: ScreenPoint, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}x{:.1} @ ({:.1}, {:.1})",
            self.width, self.height, self.x, self.y
        )
    }
}
