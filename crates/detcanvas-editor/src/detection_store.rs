//! In-memory detection storage.

use detcanvas_core::data::{BoxGeometry, Detection, DetectionSet};
use detcanvas_core::error::{DataError, Result};

/// Ordered list of detections; draw order is insertion order.
///
/// The store is the only owner of box geometry. Detections are never added
/// or removed after construction, only their boxes are updated.
#[derive(Debug, Clone, Default)]
pub struct DetectionStore {
    detections: Vec<Detection>,
}

impl DetectionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store, rejecting duplicate ids and invalid boxes.
    pub fn from_detections(detections: Vec<Detection>) -> Result<Self> {
        let mut store = Self {
            detections: Vec::with_capacity(detections.len()),
        };
        for detection in detections {
            if store.contains(&detection.id) {
                return Err(DataError::DuplicateId { id: detection.id }.into());
            }
            detection.bbox.check(&detection.id)?;
            store.detections.push(detection);
        }
        Ok(store)
    }

    /// Builds a store from the detections of a set.
    pub fn from_set(set: &DetectionSet) -> Result<Self> {
        Self::from_detections(set.detections.clone())
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Gets a detection by id.
    pub fn get(&self, id: &str) -> Option<&Detection> {
        self.detections.iter().find(|d| d.id == id)
    }

    /// Iterates in draw order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Detection> {
        self.detections.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.detections.iter().map(|d| d.id.clone()).collect()
    }

    /// Replaces the box of detection `id`.
    pub fn update_box(&mut self, id: &str, geometry: BoxGeometry) -> Result<()> {
        geometry.check(id)?;
        let detection = self
            .detections
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DataError::UnknownDetection { id: id.to_string() })?;
        detection.bbox = geometry;
        Ok(())
    }

    /// Copies the detections out, e.g. to hand them back to the host.
    pub fn to_vec(&self) -> Vec<Detection> {
        self.detections.clone()
    }
}
