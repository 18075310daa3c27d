//! Canvas type definitions: CanvasSettings, Scene, OverlayBox.

use serde::{Deserialize, Serialize};

use detcanvas_core::data::BoxGeometry;
use detcanvas_core::geometry::PixelRect;

use crate::box_editor::{EditMode, EditorSettings};
use crate::viewport::{ViewportSettings, ViewportState};

/// Settings consumed by the canvas and the controllers it owns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSettings {
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub editor: EditorSettings,
}

/// One rendered detection overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayBox {
    pub id: String,
    pub label: String,
    pub owner: String,
    #[serde(rename = "box")]
    pub bbox: BoxGeometry,
    /// Screen rectangle; `None` until the surface has been measured.
    pub rect: Option<PixelRect>,
    pub mode: EditMode,
}

/// Everything a renderer needs to draw one frame: the picture and the boxes
/// on top of it, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub image_url: String,
    pub container: Option<PixelRect>,
    pub image: Option<PixelRect>,
    pub viewport: ViewportState,
    pub overlays: Vec<OverlayBox>,
}

impl Scene {
    /// Overlay for detection `id`.
    pub fn overlay(&self, id: &str) -> Option<&OverlayBox> {
        self.overlays.iter().find(|o| o.id == id)
    }
}
