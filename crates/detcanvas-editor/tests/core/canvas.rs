use detcanvas_core::{DetectionSet, PixelRect, PointerEvent, PointerTarget, ScreenPoint, WheelEvent};
use detcanvas_editor::{CanvasSettings, CanvasSurface, EditMode, ViewportState};

fn sample_canvas() -> CanvasSurface {
    CanvasSurface::with_layout(
        DetectionSet::sample(),
        PixelRect::new(0.0, 0.0, 900.0, 600.0),
        CanvasSettings::default(),
    )
    .unwrap()
}

#[test]
fn test_render_projects_boxes() {
    let canvas = sample_canvas();
    let scene = canvas.render();
    assert_eq!(scene.overlays.len(), 2);
    assert_eq!(scene.viewport.zoom_percent, 100.0);

    let image = scene.image.unwrap();
    assert!((image.width - 900.0).abs() < 1e-9);

    let rect = scene.overlay("1").unwrap().rect.unwrap();
    assert!((rect.x - 45.0).abs() < 1e-9);
    assert!((rect.width - 81.0).abs() < 1e-9);
    assert!((rect.y - (image.y + 0.28 * image.height)).abs() < 1e-9);
    assert_eq!(scene.overlay("1").unwrap().mode, EditMode::Idle);
}

#[test]
fn test_hit_test_targets() {
    let canvas = sample_canvas();
    let rect = canvas.render().overlay("1").unwrap().rect.unwrap();

    assert_eq!(
        canvas.hit_test(rect.far_corner()),
        PointerTarget::ResizeHandle("1".into())
    );
    assert_eq!(
        canvas.hit_test(rect.origin()),
        PointerTarget::MoveHandle("1".into())
    );
    // Box body belongs to the picture
    let center = ScreenPoint::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    assert_eq!(canvas.hit_test(center), PointerTarget::Image);
    // Letterbox band above the fitted picture
    assert_eq!(canvas.hit_test(ScreenPoint::new(450.0, 5.0)), PointerTarget::Outside);
}

#[test]
fn test_wheel_scenario() {
    let mut canvas = sample_canvas();
    let pointer = (300.0, 200.0);

    assert!(canvas.handle_wheel(&WheelEvent::new(-120.0, pointer.0, pointer.1)));
    assert_eq!(canvas.viewport().zoom_percent(), 110.0);
    assert!(canvas.handle_wheel(&WheelEvent::new(120.0, pointer.0, pointer.1)));
    assert_eq!(canvas.viewport().zoom_percent(), 100.0);
    canvas.handle_wheel(&WheelEvent::new(120.0, pointer.0, pointer.1));
    assert_eq!(canvas.viewport().zoom_percent(), 100.0);
    assert!(canvas.viewport().pan_x().abs() < 1e-9);
}

#[test]
fn test_wheel_ignored_outside_or_without_delta() {
    let mut canvas = sample_canvas();
    assert!(!canvas.handle_wheel(&WheelEvent::new(-120.0, 450.0, 5.0)));
    assert!(!canvas.handle_wheel(&WheelEvent::new(0.0, 300.0, 200.0)));
    assert_eq!(canvas.viewport().zoom_percent(), 100.0);
}

#[test]
fn test_reset_view() {
    let mut canvas = sample_canvas();
    for _ in 0..5 {
        canvas.handle_wheel(&WheelEvent::new(-1.0, 200.0, 300.0));
    }
    assert_eq!(canvas.viewport().zoom_percent(), 150.0);
    assert!(canvas.viewport().pan_x() != 0.0);

    canvas.handle_pointer(&PointerEvent::down(450.0, 300.0));
    assert!(canvas.viewport().is_panning());

    canvas.reset_view();
    assert_eq!(canvas.viewport_state(), ViewportState::default());
    assert_eq!(canvas.active_listener_count(), 0);
    let image = canvas.render().image.unwrap();
    assert!((image.width - 900.0).abs() < 1e-9);
}

#[test]
fn test_invalid_set_rejected() {
    let mut set = DetectionSet::sample();
    set.detections[1].id = "1".into();
    let result = CanvasSurface::with_layout(
        set,
        PixelRect::new(0.0, 0.0, 900.0, 600.0),
        CanvasSettings::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_render_serializes() {
    let canvas = sample_canvas();
    let json = serde_json::to_value(canvas.render()).unwrap();
    assert_eq!(json["overlays"][0]["box"]["top"], 28.0);
    assert_eq!(json["overlays"][1]["mode"], "idle");
}

#[test]
fn test_drop_detaches_listeners() {
    let mut canvas = sample_canvas();
    let capture = canvas.capture().clone();
    let grip = canvas.render().overlay("1").unwrap().rect.unwrap().far_corner();
    canvas.handle_pointer(&PointerEvent::down(grip.x, grip.y));
    assert_eq!(capture.active_count(), 1);

    drop(canvas);
    assert!(capture.is_idle());
}
