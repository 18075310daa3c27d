//! # detcanvas editor
//!
//! Interactive editing of detection boxes over a zoomable, pannable picture.
//!
//! - [`viewport`]: zoom level, pan offset, anchored wheel zoom, pan clamping
//! - [`box_editor`]: per-detection resize/move drag state machine
//! - [`detection_store`]: the detection list, the single owner of box geometry
//! - [`measurement`]: injected screen measurements and a headless layout
//! - [`canvas`]: composes all of the above behind pointer/wheel entry points

pub mod box_editor;
pub mod canvas;
pub mod detection_store;
pub mod measurement;
pub mod viewport;

pub use box_editor::{
    move_box, resize_box, BoxEditor, DragOrigin, EditMode, EditState, EditorSettings,
};
pub use canvas::{CanvasSettings, CanvasSurface, OverlayBox, Scene};
pub use detection_store::DetectionStore;
pub use measurement::{LayoutModel, MeasurementProvider};
pub use viewport::{
    clamp_pan, pan_bounds, PanState, ViewportController, ViewportSettings, ViewportState,
};
