//! Detection and box geometry types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{MAX_PERCENT, MIN_BOX_PERCENT, PERCENT_EPSILON};
use crate::error::DataError;
use crate::geometry::PixelRect;

/// A bounding box in percent of the rendered image.
///
/// Valid boxes satisfy `top >= 0`, `left >= 0`, `width >= 1`, `height >= 1`,
/// `top + height <= 100` and `left + width <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxGeometry {
    /// Creates a new box. No validation is performed; see [`BoxGeometry::check`].
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge in percent.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge in percent.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Returns the first violated invariant, if any.
    pub fn violation(&self) -> Option<&'static str> {
        let values = [self.top, self.left, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Some("coordinates must be finite");
        }
        if self.top < -PERCENT_EPSILON || self.left < -PERCENT_EPSILON {
            return Some("origin must not be negative");
        }
        if self.width < MIN_BOX_PERCENT - PERCENT_EPSILON {
            return Some("width below minimum");
        }
        if self.height < MIN_BOX_PERCENT - PERCENT_EPSILON {
            return Some("height below minimum");
        }
        if self.bottom() > MAX_PERCENT + PERCENT_EPSILON {
            return Some("box extends past the bottom edge");
        }
        if self.right() > MAX_PERCENT + PERCENT_EPSILON {
            return Some("box extends past the right edge");
        }
        None
    }

    /// Whether all containment invariants hold.
    pub fn is_valid(&self) -> bool {
        self.violation().is_none()
    }

    /// Validates the box, attributing any failure to detection `id`.
    pub fn check(&self, id: &str) -> Result<(), DataError> {
        match self.violation() {
            Some(reason) => Err(DataError::InvalidBox {
                id: id.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Projects the box onto a rendered image rectangle.
    pub fn to_pixel_rect(&self, image: &PixelRect) -> PixelRect {
        PixelRect::new(
            image.x + image.width * self.left / MAX_PERCENT,
            image.y + image.height * self.top / MAX_PERCENT,
            image.width * self.width / MAX_PERCENT,
            image.height * self.height / MAX_PERCENT,
        )
    }
}

impl fmt::Display for BoxGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top {:.2}% left {:.2}% {:.2}%x{:.2}%",
            self.top, self.left, self.width, self.height
        )
    }
}

/// A labeled bounding box attributed to an annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: String,
    pub label: String,
    /// Annotator handle. Older records call this field `person`.
    #[serde(alias = "person")]
    pub owner: String,
    #[serde(rename = "box")]
    pub bbox: BoxGeometry,
}

impl Detection {
    /// Creates a new detection.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        owner: impl Into<String>,
        bbox: BoxGeometry,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            owner: owner.into(),
            bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_validity() {
        assert!(BoxGeometry::new(28.0, 5.0, 9.0, 12.0).is_valid());
        assert!(BoxGeometry::new(0.0, 0.0, 100.0, 100.0).is_valid());
        assert_eq!(
            BoxGeometry::new(95.0, 0.0, 10.0, 10.0).violation(),
            Some("box extends past the bottom edge")
        );
        assert_eq!(
            BoxGeometry::new(0.0, 0.0, 0.5, 10.0).violation(),
            Some("width below minimum")
        );
        assert_eq!(
            BoxGeometry::new(-1.0, 0.0, 5.0, 5.0).violation(),
            Some("origin must not be negative")
        );
    }

    #[test]
    fn test_check_reports_id() {
        let err = BoxGeometry::new(0.0, 99.5, 1.0, 1.0).check("3").unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidBox {
                id: "3".to_string(),
                reason: "box extends past the right edge".to_string(),
            }
        );
    }

    #[test]
    fn test_to_pixel_rect() {
        let image = PixelRect::new(10.0, 20.0, 1000.0, 500.0);
        let rect = BoxGeometry::new(10.0, 50.0, 20.0, 40.0).to_pixel_rect(&image);
        assert_eq!(rect, PixelRect::new(510.0, 70.0, 200.0, 200.0));
    }

    #[test]
    fn test_detection_accepts_person_alias() {
        let json = r#"{
            "id": "1",
            "label": "plant1",
            "person": "@ana",
            "box": {"top": 1, "left": 2, "width": 3, "height": 4}
        }"#;
        let detection: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(detection.owner, "@ana");
        assert_eq!(detection.bbox, BoxGeometry::new(1.0, 2.0, 3.0, 4.0));

        let out = serde_json::to_value(&detection).unwrap();
        assert_eq!(out["owner"], "@ana");
        assert!(out.get("box").is_some());
    }
}
