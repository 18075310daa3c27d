//! Recorded input scripts.
//!
//! A script is a JSON array of commands, each tagged by `type`:
//!
//! ```json
//! [
//!   {"type": "wheel", "delta_y": -120, "x": 300, "y": 200},
//!   {"type": "pointer_down", "x": 126, "y": 249.4},
//!   {"type": "pointer_move", "x": 150, "y": 260},
//!   {"type": "pointer_up", "x": 150, "y": 260}
//! ]
//! ```
//!
//! Replaying drives a headless [`CanvasSurface`] exactly like a host would.

use serde::{Deserialize, Serialize};

use detcanvas_core::geometry::PixelRect;
use detcanvas_core::input::{PointerEvent, PointerTarget, WheelEvent};
use detcanvas_core::{Detection, DetectionSet};
use detcanvas_editor::{CanvasSurface, LayoutModel, Scene, ViewportState};
use detcanvas_settings::Config;

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputCommand {
    PointerDown {
        x: f64,
        y: f64,
        /// Element the platform reported under the pointer; hit-tested when absent.
        #[serde(default)]
        target: Option<PointerTarget>,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    PointerLeave {
        x: f64,
        y: f64,
    },
    Wheel {
        delta_y: f64,
        x: f64,
        y: f64,
    },
    /// Back to 100% with no pan.
    Reset,
    /// Host window resized.
    ResizeContainer {
        width: f64,
        height: f64,
    },
}

impl InputCommand {
    /// Feeds the command into `canvas`.
    pub fn apply(&self, canvas: &mut CanvasSurface<LayoutModel>) {
        match self {
            Self::PointerDown { x, y, target } => {
                let mut event = PointerEvent::down(*x, *y);
                event.target = target.clone();
                canvas.handle_pointer(&event);
            }
            Self::PointerMove { x, y } => canvas.handle_pointer(&PointerEvent::moved(*x, *y)),
            Self::PointerUp { x, y } => canvas.handle_pointer(&PointerEvent::up(*x, *y)),
            Self::PointerLeave { x, y } => canvas.handle_pointer(&PointerEvent::leave(*x, *y)),
            Self::Wheel { delta_y, x, y } => {
                canvas.handle_wheel(&WheelEvent::new(*delta_y, *x, *y));
            }
            Self::Reset => canvas.reset_view(),
            Self::ResizeContainer { width, height } => {
                let origin = canvas.surface().container();
                canvas
                    .surface_mut()
                    .set_container(PixelRect::new(origin.x, origin.y, *width, *height));
                canvas.relayout();
            }
        }
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub viewport: ViewportState,
    pub scene: Scene,
    pub detections: Vec<Detection>,
    /// Box updates delivered to observers during the replay.
    pub box_updates: usize,
}

/// Replays `commands` against a fresh canvas built from `set` and `config`.
///
/// Drags still in flight at the end of the script are torn down.
pub fn replay(
    set: DetectionSet,
    config: &Config,
    commands: &[InputCommand],
) -> detcanvas_core::Result<ReplayReport> {
    let mut canvas =
        CanvasSurface::with_layout(set, config.container_rect(), config.canvas_settings())?;

    let updates = std::rc::Rc::new(std::cell::Cell::new(0usize));
    let counter = updates.clone();
    canvas.on_box_updated(move |_, _| counter.set(counter.get() + 1));

    for (index, command) in commands.iter().enumerate() {
        tracing::trace!("Command {}: {:?}", index, command);
        command.apply(&mut canvas);
    }
    canvas.teardown();

    tracing::info!(
        "Replayed {} commands: {}, {} box updates",
        commands.len(),
        canvas.viewport(),
        updates.get()
    );

    Ok(ReplayReport {
        viewport: canvas.viewport_state(),
        scene: canvas.render(),
        detections: canvas.detections(),
        box_updates: updates.get(),
    })
}
