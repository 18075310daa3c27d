//! Viewport zoom and pan control.
//!
//! Zoom is expressed in percent of the fitted image size (never below the
//! configured floor, 100% by default) and pan is a screen-pixel offset of
//! the picture from its centered position inside the container.
//!
//! Zoom steps are anchored: the image pixel under the pointer before the
//! step stays under the pointer after layout has been recomputed. Pan is
//! clamped so a zoomed picture can never be dragged far enough to reveal
//! empty space past its edges.

use serde::{Deserialize, Serialize};
use std::fmt;

use detcanvas_core::constants::{
    MIN_ZOOM_PERCENT, PAN_SLACK_X_PX, PAN_SLACK_Y_PX, ZOOM_STEP_PERCENT,
};
use detcanvas_core::geometry::{clamp_magnitude, PixelRect, PixelSize, ScreenPoint};
use detcanvas_core::input::{CaptureGuard, CaptureOwner, PointerCapture, WheelDirection};

use crate::measurement::MeasurementProvider;

/// Tunables for zoom stepping and pan clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Zoom change per wheel notch, in percent.
    pub zoom_step_percent: f64,
    /// Zoom floor, in percent. Never below 100.
    pub min_zoom_percent: f64,
    /// Extra horizontal pan allowance (frame border), in pixels.
    pub pan_slack_x_px: f64,
    /// Extra vertical pan allowance (frame border plus rounding), in pixels.
    pub pan_slack_y_px: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom_step_percent: ZOOM_STEP_PERCENT,
            min_zoom_percent: MIN_ZOOM_PERCENT,
            pan_slack_x_px: PAN_SLACK_X_PX,
            pan_slack_y_px: PAN_SLACK_Y_PX,
        }
    }
}

/// Snapshot of the viewport transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom_percent: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_percent: MIN_ZOOM_PERCENT,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Largest allowed `|pan|` per axis for a picture shown inside a container.
///
/// ```text
/// max_x = (picture_w - container_w + slack_x) / 2
/// max_y = (picture_h - container_h + slack_y) / 2
/// ```
///
/// A picture smaller than its container yields a negative bound, which
/// [`clamp_pan`] treats as "no pan on this axis".
pub fn pan_bounds(
    picture: PixelSize,
    container: PixelSize,
    settings: &ViewportSettings,
) -> (f64, f64) {
    (
        (picture.width - container.width + settings.pan_slack_x_px) / 2.0,
        (picture.height - container.height + settings.pan_slack_y_px) / 2.0,
    )
}

/// Clamps a pan offset into `[-max, max]` per axis, keeping its sign.
pub fn clamp_pan(
    pan: (f64, f64),
    picture: PixelSize,
    container: PixelSize,
    settings: &ViewportSettings,
) -> (f64, f64) {
    let (max_x, max_y) = pan_bounds(picture, container, settings);
    (clamp_magnitude(pan.0, max_x), clamp_magnitude(pan.1, max_y))
}

/// Pan-drag bookkeeping captured on pointer-down.
#[derive(Debug)]
pub struct PanSession {
    start_pointer: ScreenPoint,
    start_pan: (f64, f64),
    _capture: CaptureGuard,
}

impl PanSession {
    pub fn start_pointer(&self) -> ScreenPoint {
        self.start_pointer
    }

    pub fn start_pan(&self) -> (f64, f64) {
        self.start_pan
    }
}

/// Pan interaction state. Orthogonal to the zoom level.
#[derive(Debug, Default)]
pub enum PanState {
    #[default]
    Idle,
    Panning(PanSession),
}

/// Owns the zoom level and pan offset.
#[derive(Debug)]
pub struct ViewportController {
    zoom_percent: f64,
    pan_x: f64,
    pan_y: f64,
    pan_state: PanState,
    settings: ViewportSettings,
}

impl ViewportController {
    /// Creates a controller at the zoom floor with no pan.
    pub fn new(settings: ViewportSettings) -> Self {
        Self {
            zoom_percent: settings.min_zoom_percent.max(MIN_ZOOM_PERCENT),
            pan_x: 0.0,
            pan_y: 0.0,
            pan_state: PanState::Idle,
            settings,
        }
    }

    pub fn settings(&self) -> &ViewportSettings {
        &self.settings
    }

    /// Gets the current zoom level in percent.
    pub fn zoom_percent(&self) -> f64 {
        self.zoom_percent
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Current transform as a plain value.
    pub fn state(&self) -> ViewportState {
        ViewportState {
            zoom_percent: self.zoom_percent,
            pan_x: self.pan_x,
            pan_y: self.pan_y,
        }
    }

    pub fn pan_state(&self) -> &PanState {
        &self.pan_state
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.pan_state, PanState::Panning(_))
    }

    /// Zoom floor in effect: the configured minimum, never below fitted size.
    pub fn min_zoom_percent(&self) -> f64 {
        self.settings.min_zoom_percent.max(MIN_ZOOM_PERCENT)
    }

    /// Sets the zoom level, floored at [`Self::min_zoom_percent`].
    pub fn set_zoom_percent(&mut self, zoom_percent: f64) {
        if zoom_percent.is_finite() {
            self.zoom_percent = zoom_percent.max(self.min_zoom_percent());
        }
    }

    /// Sets the pan offset without clamping. Use [`Self::clamp_to`] afterwards
    /// when the value comes from outside.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Applies one zoom step without moving the pan. Returns the new zoom.
    pub fn step_zoom(&mut self, direction: WheelDirection) -> f64 {
        let step = self.settings.zoom_step_percent;
        let target = match direction {
            WheelDirection::ZoomIn => self.zoom_percent + step,
            WheelDirection::ZoomOut => self.zoom_percent - step,
        };
        self.set_zoom_percent(target);
        self.zoom_percent
    }

    /// Applies one zoom step keeping the image pixel under `pointer` fixed.
    ///
    /// The surface is asked to re-run layout after the zoom change so the
    /// post-zoom image position can be measured. Returns `false` when the
    /// image could not be measured and the event was skipped.
    pub fn zoom_at<M>(
        &mut self,
        direction: WheelDirection,
        pointer: ScreenPoint,
        surface: &mut M,
    ) -> bool
    where
        M: MeasurementProvider + ?Sized,
    {
        let Some(before) = measured(surface.image_rect()) else {
            tracing::trace!("Zoom skipped: image not measured");
            return false;
        };
        let pointer_before = pointer.delta_from(before.origin());

        let old_zoom = self.zoom_percent;
        let new_zoom = self.step_zoom(direction);
        surface.relayout(&self.state());

        if new_zoom == old_zoom {
            return true;
        }

        let Some(after) = measured(surface.image_rect()) else {
            tracing::trace!("Zoom applied without anchoring: image not measured after layout");
            return true;
        };

        let anchor_x = after.width * pointer_before.0 / before.width;
        let anchor_y = after.height * pointer_before.1 / before.height;
        let (pointer_after_x, pointer_after_y) = pointer.delta_from(after.origin());

        self.pan_x -= anchor_x - pointer_after_x;
        self.pan_y -= anchor_y - pointer_after_y;
        self.clamp_to(surface);

        tracing::debug!(
            "Zoom {:.0}% -> {:.0}% anchored at {}, pan ({:.2}, {:.2})",
            old_zoom,
            new_zoom,
            pointer,
            self.pan_x,
            self.pan_y
        );
        true
    }

    /// Starts a pan drag at `pointer`. Ignored while already panning.
    pub fn begin_pan(&mut self, pointer: ScreenPoint, capture: &PointerCapture) -> bool {
        if self.is_panning() {
            return false;
        }
        self.pan_state = PanState::Panning(PanSession {
            start_pointer: pointer,
            start_pan: (self.pan_x, self.pan_y),
            _capture: capture.acquire(CaptureOwner::Viewport),
        });
        tracing::debug!("Pan started at {}", pointer);
        true
    }

    /// Moves the picture to follow the pointer during a pan drag.
    ///
    /// Returns `true` when the pan offset changed.
    pub fn pan_to<M>(&mut self, pointer: ScreenPoint, surface: &mut M) -> bool
    where
        M: MeasurementProvider + ?Sized,
    {
        let PanState::Panning(session) = &self.pan_state else {
            return false;
        };
        let (Some(picture), Some(container)) =
            (measured(surface.image_rect()), measured(surface.container_rect()))
        else {
            tracing::trace!("Pan skipped: layout not measured");
            return false;
        };

        let (dx, dy) = pointer.delta_from(session.start_pointer);
        let candidate = (session.start_pan.0 + dx, session.start_pan.1 + dy);
        let (x, y) = clamp_pan(candidate, picture.size(), container.size(), &self.settings);

        if x == self.pan_x && y == self.pan_y {
            return false;
        }
        self.pan_x = x;
        self.pan_y = y;
        surface.relayout(&self.state());
        tracing::trace!("Pan -> ({:.2}, {:.2})", x, y);
        true
    }

    /// Ends the pan drag, releasing its pointer capture.
    pub fn end_pan(&mut self) -> bool {
        match std::mem::take(&mut self.pan_state) {
            PanState::Panning(session) => {
                tracing::debug!(
                    "Pan ended, offset ({:.2}, {:.2}) from ({:.2}, {:.2})",
                    self.pan_x,
                    self.pan_y,
                    session.start_pan.0,
                    session.start_pan.1
                );
                true
            }
            PanState::Idle => false,
        }
    }

    /// Re-clamps the current pan against fresh measurements.
    ///
    /// The surface is laid out for the current zoom before measuring, so a
    /// zoom set through [`Self::set_zoom_percent`] is clamped against the
    /// picture size it produces.
    pub fn clamp_to<M>(&mut self, surface: &mut M)
    where
        M: MeasurementProvider + ?Sized,
    {
        surface.relayout(&self.state());
        if let (Some(picture), Some(container)) =
            (measured(surface.image_rect()), measured(surface.container_rect()))
        {
            let (x, y) = clamp_pan(
                (self.pan_x, self.pan_y),
                picture.size(),
                container.size(),
                &self.settings,
            );
            self.pan_x = x;
            self.pan_y = y;
        }
        surface.relayout(&self.state());
    }

    /// Back to the zoom floor with no pan; any pan drag is dropped.
    pub fn reset(&mut self) {
        self.end_pan();
        self.zoom_percent = self.min_zoom_percent();
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportSettings::default())
    }
}

impl fmt::Display for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom_percent, self.pan_x, self.pan_y
        )
    }
}

fn measured(rect: Option<PixelRect>) -> Option<PixelRect> {
    rect.filter(PixelRect::is_measurable)
}
