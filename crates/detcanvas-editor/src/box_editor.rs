//! Per-detection drag editing.
//!
//! Each detection has a [`BoxEditor`] that is either idle, resizing (the
//! bottom-right grip is being dragged) or moving (the top-left grip is being
//! dragged). A drag records its pixel basis on pointer-down and converts every
//! later pointer position into percentages relative to that basis, so the
//! result does not depend on how far the pointer strayed in between.
//!
//! Moving is coupled with a counter-resize: dragging the top-left grip moves
//! the top/left edges while the bottom/right edges stay put.

use serde::{Deserialize, Serialize};
use std::fmt;

use detcanvas_core::constants::{HANDLE_SIZE_PX, MAX_PERCENT, MIN_BOX_PERCENT};
use detcanvas_core::data::BoxGeometry;
use detcanvas_core::geometry::{px_delta_to_percent, PixelSize, ScreenPoint};
use detcanvas_core::input::{CaptureGuard, CaptureOwner, PointerCapture};

/// Tunables for box editing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Smallest width/height a drag may produce, in percent.
    pub min_box_percent: f64,
    /// Side of the square corner grips, in pixels.
    pub handle_size_px: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_box_percent: MIN_BOX_PERCENT,
            handle_size_px: HANDLE_SIZE_PX,
        }
    }
}

/// Everything captured on pointer-down that later moves are measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub pointer: ScreenPoint,
    /// Rendered box size in pixels when the drag started.
    pub box_px: PixelSize,
    pub start_box: BoxGeometry,
}

impl DragOrigin {
    /// Pointer displacement converted to percent of the image, per axis.
    fn percent_delta(&self, pointer: ScreenPoint) -> (f64, f64) {
        let (dx, dy) = pointer.delta_from(self.pointer);
        (
            px_delta_to_percent(dx, self.start_box.width, self.box_px.width),
            px_delta_to_percent(dy, self.start_box.height, self.box_px.height),
        )
    }
}

/// Grows or shrinks the box from its bottom-right corner.
///
/// `top`/`left` never change. The new size is floored at `min_size`, then
/// reduced so the box stays inside the image. Near the right or bottom edge the
/// image bound wins over the floor.
pub fn resize_box(origin: &DragOrigin, pointer: ScreenPoint, min_size: f64) -> BoxGeometry {
    let (d_width, d_height) = origin.percent_delta(pointer);
    let start = origin.start_box;

    BoxGeometry {
        top: start.top,
        left: start.left,
        width: fit_extent(start.width + d_width, start.left, min_size),
        height: fit_extent(start.height + d_height, start.top, min_size),
    }
}

fn fit_extent(extent: f64, offset: f64, min_size: f64) -> f64 {
    extent.max(min_size).min(MAX_PERCENT - offset)
}

/// Drags the top-left corner while the bottom-right corner stays fixed.
///
/// Each axis is accepted or rejected on its own: if the candidate would push
/// the origin below zero or the size below `min_size`, that axis keeps the
/// values from `previous`.
pub fn move_box(
    origin: &DragOrigin,
    pointer: ScreenPoint,
    previous: &BoxGeometry,
    min_size: f64,
) -> BoxGeometry {
    let (d_horizontal, d_vertical) = origin.percent_delta(pointer);
    let start = origin.start_box;
    let mut next = *previous;

    let top = start.top + d_vertical;
    let height = start.height - d_vertical;
    if top >= 0.0 && height >= min_size {
        next.top = top;
        next.height = height;
    }

    let left = start.left + d_horizontal;
    let width = start.width - d_horizontal;
    if left >= 0.0 && width >= min_size {
        next.left = left;
        next.width = width;
    }

    next
}

/// An in-flight drag. Holding it keeps the editor's pointer capture alive.
#[derive(Debug)]
pub struct DragSession {
    origin: DragOrigin,
    _capture: CaptureGuard,
}

impl DragSession {
    pub fn origin(&self) -> &DragOrigin {
        &self.origin
    }
}

/// Editor state. Invalid combinations (a drag without its basis) cannot be
/// represented.
#[derive(Debug, Default)]
pub enum EditState {
    #[default]
    Idle,
    Resizing(DragSession),
    Moving(DragSession),
}

/// Payload-free view of [`EditState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    Idle,
    Resizing,
    Moving,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Resizing => write!(f, "resizing"),
            Self::Moving => write!(f, "moving"),
        }
    }
}

/// Drag state machine for one detection.
#[derive(Debug)]
pub struct BoxEditor {
    detection_id: String,
    state: EditState,
    settings: EditorSettings,
}

impl BoxEditor {
    /// Creates an idle editor for the detection `detection_id`.
    pub fn new(detection_id: impl Into<String>, settings: EditorSettings) -> Self {
        Self {
            detection_id: detection_id.into(),
            state: EditState::Idle,
            settings,
        }
    }

    pub fn detection_id(&self) -> &str {
        &self.detection_id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn mode(&self) -> EditMode {
        match self.state {
            EditState::Idle => EditMode::Idle,
            EditState::Resizing(_) => EditMode::Resizing,
            EditState::Moving(_) => EditMode::Moving,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, EditState::Idle)
    }

    /// Starts a resize drag. Ignored unless idle and `box_px` is measurable.
    pub fn begin_resize(
        &mut self,
        pointer: ScreenPoint,
        box_px: PixelSize,
        current: BoxGeometry,
        capture: &PointerCapture,
    ) -> bool {
        self.begin(EditMode::Resizing, pointer, box_px, current, capture)
    }

    /// Starts a move drag. Ignored unless idle and `box_px` is measurable.
    pub fn begin_move(
        &mut self,
        pointer: ScreenPoint,
        box_px: PixelSize,
        current: BoxGeometry,
        capture: &PointerCapture,
    ) -> bool {
        self.begin(EditMode::Moving, pointer, box_px, current, capture)
    }

    fn begin(
        &mut self,
        mode: EditMode,
        pointer: ScreenPoint,
        box_px: PixelSize,
        current: BoxGeometry,
        capture: &PointerCapture,
    ) -> bool {
        if self.is_active() {
            return false;
        }
        if !box_px.is_measurable() {
            tracing::trace!(
                "Drag on detection {} skipped: box not measured",
                self.detection_id
            );
            return false;
        }

        let session = DragSession {
            origin: DragOrigin {
                pointer,
                box_px,
                start_box: current,
            },
            _capture: capture.acquire(CaptureOwner::Detection(self.detection_id.clone())),
        };
        self.state = match mode {
            EditMode::Resizing => EditState::Resizing(session),
            EditMode::Moving => EditState::Moving(session),
            EditMode::Idle => return false,
        };
        tracing::debug!(
            "Detection {} {} from {} ({})",
            self.detection_id,
            mode,
            pointer,
            current
        );
        true
    }

    /// Geometry for the pointer at `pointer`, or `None` when idle or when
    /// nothing changed relative to `current`.
    pub fn drag_to(&self, pointer: ScreenPoint, current: &BoxGeometry) -> Option<BoxGeometry> {
        let min_size = self.settings.min_box_percent;
        let next = match &self.state {
            EditState::Idle => return None,
            EditState::Resizing(session) => resize_box(&session.origin, pointer, min_size),
            EditState::Moving(session) => move_box(&session.origin, pointer, current, min_size),
        };
        if next == *current {
            return None;
        }
        tracing::trace!("Detection {} -> {}", self.detection_id, next);
        Some(next)
    }

    /// Returns to idle, releasing the pointer capture. Returns whether a
    /// drag was in progress.
    pub fn end(&mut self) -> bool {
        let previous = std::mem::take(&mut self.state);
        let was_active = !matches!(previous, EditState::Idle);
        if was_active {
            tracing::debug!("Detection {} drag ended", self.detection_id);
        }
        was_active
    }
}
