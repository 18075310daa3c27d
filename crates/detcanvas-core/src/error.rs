//! Error handling for detcanvas
//!
//! Geometry updates never fail: out-of-range pointer input is clamped or
//! rejected per axis and missing measurements skip the event. The error
//! types here cover the fallible edges of the system instead:
//! - Data errors (malformed detection sets, unknown ids, invalid boxes)
//! - I/O and JSON errors while loading input records
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Data error type
///
/// Represents problems with detection-set records supplied by the host.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Two detections share the same id
    #[error("Duplicate detection id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// No detection with this id exists
    #[error("Unknown detection: {id}")]
    UnknownDetection {
        /// The id that was looked up.
        id: String,
    },

    /// Box geometry violates the containment invariants
    #[error("Invalid box for detection {id}: {reason}")]
    InvalidBox {
        /// The detection owning the box.
        id: String,
        /// Which invariant was violated.
        reason: String,
    },

    /// Image dimensions are zero, negative or not finite
    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize {
        /// The supplied width.
        width: f64,
        /// The supplied height.
        height: f64,
    },
}

/// Main error type for detcanvas
///
/// A unified error type used by the public APIs of the library crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Data error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a data error
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Data(_))
    }

    /// Check if this error reports an unknown detection id
    pub fn is_unknown_detection(&self) -> bool {
        matches!(self, Error::Data(DataError::UnknownDetection { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
