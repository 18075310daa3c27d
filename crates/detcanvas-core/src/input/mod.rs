//! # Pointer input
//!
//! Platform-neutral pointer and wheel events, plus the capture registry
//! used to attach "global" listeners for the duration of a drag.
//!
//! ## Usage
//!
//! ```rust
//! use detcanvas_core::input::{CaptureOwner, PointerCapture};
//!
//! let capture = PointerCapture::new();
//! let guard = capture.acquire(CaptureOwner::Viewport);
//! assert_eq!(capture.active_count(), 1);
//!
//! // Releasing (or dropping) the guard detaches the listener
//! guard.release();
//! assert_eq!(capture.active_count(), 0);
//! ```

mod capture;

pub use capture::*;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::ScreenPoint;

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// Pointer left the image surface.
    Leave,
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Move => write!(f, "move"),
            Self::Up => write!(f, "up"),
            Self::Leave => write!(f, "leave"),
        }
    }
}

/// The element a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PointerTarget {
    /// Bottom-right grip of a detection box.
    ResizeHandle(String),
    /// Top-left grip of a detection box.
    MoveHandle(String),
    /// The picture itself (including box bodies, which sit on top of it).
    Image,
    /// Anywhere outside the picture.
    Outside,
}

/// A pointer event in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: ScreenPoint,
    /// Element under the pointer as reported by the platform. `None` lets
    /// the canvas hit-test the position itself.
    #[serde(default)]
    pub target: Option<PointerTarget>,
}

impl PointerEvent {
    /// Creates an event without a platform target.
    pub fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: ScreenPoint::new(x, y),
            target: None,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Leave, x, y)
    }

    /// Attaches the platform-reported target.
    pub fn with_target(mut self, target: PointerTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// Which way a wheel notch changes the zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDirection {
    ZoomIn,
    ZoomOut,
}

/// A scroll-wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Vertical scroll amount; negative means scrolling up.
    pub delta_y: f64,
    pub position: ScreenPoint,
}

impl WheelEvent {
    /// Creates a new wheel event.
    pub fn new(delta_y: f64, x: f64, y: f64) -> Self {
        Self {
            delta_y,
            position: ScreenPoint::new(x, y),
        }
    }

    /// Scrolling up zooms in, scrolling down zooms out, no movement does nothing.
    pub fn direction(&self) -> Option<WheelDirection> {
        if self.delta_y < 0.0 {
            Some(WheelDirection::ZoomIn)
        } else if self.delta_y > 0.0 {
            Some(WheelDirection::ZoomOut)
        } else {
            None
        }
    }
}
