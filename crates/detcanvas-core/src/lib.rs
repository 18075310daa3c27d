//! # Detcanvas Core
//!
//! Core types, coordinate math and input plumbing for detcanvas.
//! Provides the data model for detections and their boxes, the pure
//! pixel/percentage conversions used by every editor component, and the
//! pointer capture registry that scopes drag-session listeners.

pub mod constants;
pub mod data;
pub mod error;
pub mod geometry;
pub mod input;
pub mod types;

pub use data::{BoxGeometry, Detection, DetectionSet, Image, ImageSize};

pub use error::{DataError, Error, Result};

pub use geometry::{clamp, clamp_magnitude, px_delta_to_percent, PixelRect, PixelSize, ScreenPoint};

pub use input::{
    CaptureGuard, CaptureOwner, PointerCapture, PointerEvent, PointerEventKind, PointerTarget,
    SubscriptionId, WheelDirection, WheelEvent,
};

// Re-export type aliases for convenience
pub use types::{shared, BoxUpdateCallback, Shared};
