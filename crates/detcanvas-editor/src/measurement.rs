//! Measurement of the rendered surface.
//!
//! The geometry engine never queries a rendering toolkit directly; every
//! pixel basis comes from an injected [`MeasurementProvider`]. A GUI host
//! implements it on top of its widget geometry, while [`LayoutModel`]
//! computes the same rectangles deterministically for headless use and
//! tests.

use detcanvas_core::data::{BoxGeometry, ImageSize};
use detcanvas_core::geometry::{PixelRect, PixelSize};

use crate::viewport::ViewportState;

/// Source of measured screen rectangles.
///
/// Any method may return `None` (or an unmeasurable rectangle) while the
/// surface has not been laid out yet; callers skip the event in that case.
pub trait MeasurementProvider {
    /// Visible frame the picture is clipped to.
    fn container_rect(&self) -> Option<PixelRect>;

    /// Rendered picture, including zoom and pan.
    fn image_rect(&self) -> Option<PixelRect>;

    /// Rendered overlay for one detection. Defaults to projecting the box
    /// percentages onto [`MeasurementProvider::image_rect`].
    fn box_rect(&self, _id: &str, geometry: &BoxGeometry) -> Option<PixelRect> {
        self.image_rect()
            .filter(PixelRect::is_measurable)
            .map(|image| geometry.to_pixel_rect(&image))
    }

    /// Called after the viewport transform changed so the surface can settle
    /// its layout before the next measurement.
    fn relayout(&mut self, _viewport: &ViewportState) {}
}

/// Headless layout: the picture is fitted ("contain") into the container at
/// 100% zoom, scaled by the zoom level, centered and then offset by pan.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutModel {
    container: PixelRect,
    natural: ImageSize,
    viewport: ViewportState,
    image: Option<PixelRect>,
}

impl LayoutModel {
    /// Creates a layout for `natural` inside `container`, at the default viewport.
    pub fn new(container: PixelRect, natural: ImageSize) -> Self {
        let mut model = Self {
            container,
            natural,
            viewport: ViewportState::default(),
            image: None,
        };
        model.compute();
        model
    }

    /// Container anchored at the screen origin.
    pub fn with_container_size(width: f64, height: f64, natural: ImageSize) -> Self {
        Self::new(PixelRect::new(0.0, 0.0, width, height), natural)
    }

    pub fn container(&self) -> PixelRect {
        self.container
    }

    pub fn natural_size(&self) -> ImageSize {
        self.natural
    }

    /// Replaces the container (window resize). The picture is re-laid out
    /// with the last known viewport.
    pub fn set_container(&mut self, container: PixelRect) {
        self.container = container;
        self.compute();
    }

    /// Picture size at 100% zoom.
    pub fn fitted_size(&self) -> Option<PixelSize> {
        let natural = PixelSize::new(self.natural.width, self.natural.height);
        if !self.container.is_measurable() || !natural.is_measurable() {
            return None;
        }
        let scale = (self.container.width / natural.width)
            .min(self.container.height / natural.height);
        Some(PixelSize::new(natural.width * scale, natural.height * scale))
    }

    fn compute(&mut self) {
        self.image = self.fitted_size().map(|fitted| {
            let factor = self.viewport.zoom_percent / 100.0;
            let width = fitted.width * factor;
            let height = fitted.height * factor;
            PixelRect::new(
                self.container.x + (self.container.width - width) / 2.0 + self.viewport.pan_x,
                self.container.y + (self.container.height - height) / 2.0 + self.viewport.pan_y,
                width,
                height,
            )
        });
    }
}

impl MeasurementProvider for LayoutModel {
    fn container_rect(&self) -> Option<PixelRect> {
        Some(self.container).filter(PixelRect::is_measurable)
    }

    fn image_rect(&self) -> Option<PixelRect> {
        self.image
    }

    fn relayout(&mut self, viewport: &ViewportState) {
        self.viewport = *viewport;
        self.compute();
    }
}
