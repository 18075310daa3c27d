//! Pointer and wheel routing for CanvasSurface.

use detcanvas_core::geometry::{PixelRect, ScreenPoint};
use detcanvas_core::input::{
    CaptureOwner, PointerEvent, PointerEventKind, PointerTarget, WheelEvent,
};

use super::CanvasSurface;
use crate::measurement::MeasurementProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grip {
    Resize,
    Move,
}

impl<M: MeasurementProvider> CanvasSurface<M> {
    /// Finds the element under `point`.
    ///
    /// Grips win over the picture, and later (topmost) detections win over
    /// earlier ones. Resize grips sit on the bottom-right corner of a box,
    /// move grips on its top-left corner. Box bodies belong to the picture.
    pub fn hit_test(&self, point: ScreenPoint) -> PointerTarget {
        let size = self.settings.editor.handle_size_px;
        for detection in self.store.iter().rev() {
            let Some(rect) = self
                .surface
                .box_rect(&detection.id, &detection.bbox)
                .filter(PixelRect::is_measurable)
            else {
                continue;
            };
            if PixelRect::square_around(rect.far_corner(), size).contains(point) {
                return PointerTarget::ResizeHandle(detection.id.clone());
            }
            if PixelRect::square_around(rect.origin(), size).contains(point) {
                return PointerTarget::MoveHandle(detection.id.clone());
            }
        }

        match self.surface.image_rect() {
            Some(image) if image.is_measurable() && image.contains(point) => PointerTarget::Image,
            _ => PointerTarget::Outside,
        }
    }

    /// Routes one pointer event.
    ///
    /// - down: starts a resize, move or pan depending on the target; ignored
    ///   while another drag is in flight
    /// - move: delivered to every capture owner
    /// - up: ends every drag, wherever the pointer is
    /// - leave: ends the pan drag only; box drags keep their capture
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::Down => {
                let target = match &event.target {
                    Some(target) => target.clone(),
                    None => self.hit_test(event.position),
                };
                self.pointer_down(event.position, target);
            }
            PointerEventKind::Move => self.pointer_move(event.position),
            PointerEventKind::Up => self.pointer_up(),
            PointerEventKind::Leave => {
                self.viewport.end_pan();
            }
        }
    }

    /// Applies one anchored zoom step when the wheel turns over the picture.
    ///
    /// Returns `true` when the event was consumed.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        let Some(direction) = event.direction() else {
            return false;
        };
        if self.hit_test(event.position) == PointerTarget::Outside {
            return false;
        }
        self.viewport
            .zoom_at(direction, event.position, &mut self.surface)
    }

    fn pointer_down(&mut self, position: ScreenPoint, target: PointerTarget) {
        if !self.capture.is_idle() {
            tracing::trace!("Pointer down at {} ignored: drag in progress", position);
            return;
        }
        match target {
            PointerTarget::ResizeHandle(id) => self.begin_box_drag(&id, Grip::Resize, position),
            PointerTarget::MoveHandle(id) => self.begin_box_drag(&id, Grip::Move, position),
            PointerTarget::Image => {
                self.viewport.begin_pan(position, &self.capture);
            }
            PointerTarget::Outside => {}
        }
    }

    fn begin_box_drag(&mut self, id: &str, grip: Grip, position: ScreenPoint) {
        let Some(detection) = self.store.get(id) else {
            tracing::warn!("Pointer down on unknown detection {}", id);
            return;
        };
        let current = detection.bbox;
        let Some(rect) = self.surface.box_rect(id, &current) else {
            tracing::trace!("Drag on {} skipped: box not measured", id);
            return;
        };
        let Some(editor) = self.editors.get_mut(id) else {
            return;
        };
        match grip {
            Grip::Resize => editor.begin_resize(position, rect.size(), current, &self.capture),
            Grip::Move => editor.begin_move(position, rect.size(), current, &self.capture),
        };
    }

    fn pointer_move(&mut self, position: ScreenPoint) {
        for owner in self.capture.owners() {
            match owner {
                CaptureOwner::Viewport => {
                    self.viewport.pan_to(position, &mut self.surface);
                }
                CaptureOwner::Detection(id) => {
                    let (Some(editor), Some(detection)) =
                        (self.editors.get(&id), self.store.get(&id))
                    else {
                        continue;
                    };
                    if let Some(next) = editor.drag_to(position, &detection.bbox) {
                        self.commit_box(&id, next);
                    }
                }
            }
        }
    }

    fn pointer_up(&mut self) {
        self.teardown();
    }
}
