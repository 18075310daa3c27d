//! Canvas surface composing the picture and its detection overlays.
//!
//! The canvas owns the viewport controller, one box editor per detection,
//! the detection store and the pointer capture registry. Hosts feed it raw
//! pointer and wheel events; see [`CanvasSurface::handle_pointer`] and
//! [`CanvasSurface::handle_wheel`].

mod events;
mod types;

pub use types::{CanvasSettings, OverlayBox, Scene};

use std::collections::HashMap;
use std::rc::Rc;

use detcanvas_core::data::{BoxGeometry, Detection, DetectionSet, Image};
use detcanvas_core::error::Result;
use detcanvas_core::geometry::PixelRect;
use detcanvas_core::input::PointerCapture;
use detcanvas_core::types::BoxUpdateCallback;

use crate::box_editor::{BoxEditor, EditMode};
use crate::detection_store::DetectionStore;
use crate::measurement::{LayoutModel, MeasurementProvider};
use crate::viewport::{ViewportController, ViewportState};

/// Interactive surface: picture, overlays, zoom/pan and box drags.
pub struct CanvasSurface<M: MeasurementProvider = LayoutModel> {
    image: Image,
    store: DetectionStore,
    editors: HashMap<String, BoxEditor>,
    viewport: ViewportController,
    capture: PointerCapture,
    surface: M,
    settings: CanvasSettings,
    observers: Vec<BoxUpdateCallback>,
}

impl CanvasSurface<LayoutModel> {
    /// Creates a canvas laid out headlessly inside `container`.
    pub fn with_layout(
        set: DetectionSet,
        container: PixelRect,
        settings: CanvasSettings,
    ) -> Result<Self> {
        let layout = LayoutModel::new(container, set.image.size);
        Self::new(set, layout, settings)
    }
}

impl<M: MeasurementProvider> CanvasSurface<M> {
    /// Creates a canvas over `surface`. The detection set is validated first.
    pub fn new(set: DetectionSet, mut surface: M, settings: CanvasSettings) -> Result<Self> {
        set.image.validate()?;
        let store = DetectionStore::from_set(&set)?;
        let editors = store
            .iter()
            .map(|d| (d.id.clone(), BoxEditor::new(d.id.clone(), settings.editor)))
            .collect();
        let viewport = ViewportController::new(settings.viewport);
        surface.relayout(&viewport.state());

        tracing::debug!(
            "Canvas created for {} with {} detections",
            set.image.url,
            store.len()
        );

        Ok(Self {
            image: set.image,
            store,
            editors,
            viewport,
            capture: PointerCapture::new(),
            surface,
            settings,
            observers: Vec::new(),
        })
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn store(&self) -> &DetectionStore {
        &self.store
    }

    /// Current detections in draw order.
    pub fn detections(&self) -> Vec<Detection> {
        self.store.to_vec()
    }

    /// Gets a detection by id.
    pub fn detection(&self, id: &str) -> Option<&Detection> {
        self.store.get(id)
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    /// Mutable access for hosts that resize the surface. Call
    /// [`CanvasSurface::relayout`] afterwards.
    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    /// Drag mode of detection `id`.
    pub fn edit_mode(&self, id: &str) -> Option<EditMode> {
        self.editors.get(id).map(BoxEditor::mode)
    }

    /// Number of pointer listeners attached by in-flight drags.
    pub fn active_listener_count(&self) -> usize {
        self.capture.active_count()
    }

    /// Capture registry shared by every drag on this canvas.
    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    /// Registers an observer called as `update_box(id, new_box)` after every
    /// committed drag step.
    pub fn on_box_updated<F>(&mut self, callback: F)
    where
        F: Fn(&str, &BoxGeometry) + 'static,
    {
        self.observers.push(Rc::new(callback));
    }

    /// Re-runs layout after the host changed the surface and re-clamps pan.
    pub fn relayout(&mut self) {
        self.viewport.clamp_to(&mut self.surface);
    }

    /// Back to 100% zoom with no pan.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.surface.relayout(&self.viewport.state());
        tracing::debug!("View reset");
    }

    /// Ends every in-flight drag and pan, detaching their listeners.
    pub fn teardown(&mut self) {
        for editor in self.editors.values_mut() {
            editor.end();
        }
        self.viewport.end_pan();
    }

    /// Snapshot of what should be drawn.
    pub fn render(&self) -> Scene {
        let overlays = self
            .store
            .iter()
            .map(|d| OverlayBox {
                id: d.id.clone(),
                label: d.label.clone(),
                owner: d.owner.clone(),
                bbox: d.bbox,
                rect: self
                    .surface
                    .box_rect(&d.id, &d.bbox)
                    .filter(PixelRect::is_measurable),
                mode: self.edit_mode(&d.id).unwrap_or(EditMode::Idle),
            })
            .collect();

        Scene {
            image_url: self.image.url.clone(),
            container: self.surface.container_rect(),
            image: self.surface.image_rect(),
            viewport: self.viewport.state(),
            overlays,
        }
    }

    fn commit_box(&mut self, id: &str, geometry: BoxGeometry) {
        if let Err(err) = self.store.update_box(id, geometry) {
            tracing::warn!("Dropped box update for {}: {}", id, err);
            return;
        }
        for observer in &self.observers {
            observer(id, &geometry);
        }
    }
}

impl<M: MeasurementProvider> Drop for CanvasSurface<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<M: MeasurementProvider + std::fmt::Debug> std::fmt::Debug for CanvasSurface<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("image", &self.image)
            .field("store", &self.store)
            .field("viewport", &self.viewport)
            .field("surface", &self.surface)
            .field("listeners", &self.capture.active_count())
            .field("observers", &self.observers.len())
            .finish()
    }
}
