//! Detection-set records.
//!
//! A [`DetectionSet`] is the input record handed over by the host: the image
//! being annotated plus the detections drawn on top of it.
//!
//! ```json
//! {
//!   "id": "1",
//!   "image": { "url": "plants.jpg", "size": { "width": 907, "height": 510 } },
//!   "detections": [
//!     { "id": "1", "label": "plant1", "owner": "@ana",
//!       "box": { "top": 28, "left": 5, "width": 9, "height": 12 } }
//!   ]
//! }
//! ```

mod detection;

pub use detection::{BoxGeometry, Detection};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{DataError, Result};

/// Natural image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    /// Creates a new image size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// The picture the detections refer to. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub size: ImageSize,
}

impl Image {
    /// Creates a new image record.
    pub fn new(url: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            url: url.into(),
            size: ImageSize::new(width, height),
        }
    }

    /// Rejects zero, negative or non-finite dimensions.
    pub fn validate(&self) -> std::result::Result<(), DataError> {
        let ImageSize { width, height } = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(DataError::InvalidImageSize { width, height });
        }
        Ok(())
    }
}

/// An image together with its detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSet {
    #[serde(default)]
    pub id: String,
    pub image: Image,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl DetectionSet {
    /// Creates a new detection set.
    pub fn new(id: impl Into<String>, image: Image, detections: Vec<Detection>) -> Self {
        Self {
            id: id.into(),
            image,
            detections,
        }
    }

    /// The built-in sample: a field photo with two annotated plants.
    pub fn sample() -> Self {
        Self::new(
            "1",
            Image::new(
                "https://www.agritotal.com/files/image/8/8057/5346b54b568b5_907_510!.jpg",
                907.0,
                510.0,
            ),
            vec![
                Detection::new(
                    "1",
                    "plant1",
                    "@fede4rodriguez",
                    BoxGeometry::new(28.0, 5.0, 9.0, 12.0),
                ),
                Detection::new(
                    "2",
                    "plant2",
                    "@fede4rodriguez",
                    BoxGeometry::new(31.0, 63.0, 13.0, 17.0),
                ),
            ],
        )
    }

    /// Parses and validates a JSON record.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(content)?;
        set.validate()?;
        Ok(set)
    }

    /// Loads and validates a JSON record from disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded detection set {} with {} detections from {}",
            set.id,
            set.detections.len(),
            path.display()
        );
        Ok(set)
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks image dimensions, id uniqueness and every box.
    pub fn validate(&self) -> std::result::Result<(), DataError> {
        self.image.validate()?;

        let mut seen = HashSet::new();
        for detection in &self.detections {
            if !seen.insert(detection.id.as_str()) {
                return Err(DataError::DuplicateId {
                    id: detection.id.clone(),
                });
            }
            detection.bbox.check(&detection.id)?;
        }
        Ok(())
    }
}
