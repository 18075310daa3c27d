use detcanvas_core::{ImageSize, PixelRect, PointerCapture, ScreenPoint, WheelDirection};
use detcanvas_editor::measurement::{LayoutModel, MeasurementProvider};
use detcanvas_editor::viewport::{ViewportController, ViewportSettings};

fn layout() -> LayoutModel {
    LayoutModel::with_container_size(900.0, 600.0, ImageSize::new(907.0, 510.0))
}

#[test]
fn test_viewport_creation() {
    let vp = ViewportController::default();
    assert_eq!(vp.zoom_percent(), 100.0);
    assert_eq!(vp.pan_x(), 0.0);
    assert_eq!(vp.pan_y(), 0.0);
    assert!(!vp.is_panning());
}

#[test]
fn test_zoom_in_then_out_restores_pan() {
    let mut surface = layout();
    let mut vp = ViewportController::default();
    let pointer = ScreenPoint::new(300.0, 200.0);

    assert!(vp.zoom_at(WheelDirection::ZoomIn, pointer, &mut surface));
    assert_eq!(vp.zoom_percent(), 110.0);
    assert!((vp.pan_x() - 15.0).abs() < 1e-9);
    // Picture is still shorter than the container: no vertical pan
    assert_eq!(vp.pan_y(), 0.0);

    assert!(vp.zoom_at(WheelDirection::ZoomOut, pointer, &mut surface));
    assert_eq!(vp.zoom_percent(), 100.0);
    assert!(vp.pan_x().abs() < 1e-9);
    assert!(vp.pan_y().abs() < 1e-9);
}

#[test]
fn test_zoom_keeps_pixel_under_pointer() {
    let mut surface = layout();
    let mut vp = ViewportController::default();
    for _ in 0..10 {
        vp.zoom_at(WheelDirection::ZoomIn, ScreenPoint::new(450.0, 300.0), &mut surface);
    }
    assert_eq!(vp.zoom_percent(), 200.0);

    let pointer = ScreenPoint::new(500.0, 350.0);
    let before = surface.image_rect().unwrap();
    let fx = (pointer.x - before.x) / before.width;
    let fy = (pointer.y - before.y) / before.height;

    vp.zoom_at(WheelDirection::ZoomIn, pointer, &mut surface);
    let after = surface.image_rect().unwrap();
    assert!(((pointer.x - after.x) / after.width - fx).abs() < 1e-9);
    assert!(((pointer.y - after.y) / after.height - fy).abs() < 1e-9);
}

#[test]
fn test_zoom_floor_leaves_state_alone() {
    let mut surface = layout();
    let mut vp = ViewportController::default();
    assert!(vp.zoom_at(WheelDirection::ZoomOut, ScreenPoint::new(100.0, 100.0), &mut surface));
    assert_eq!(vp.zoom_percent(), 100.0);
    assert_eq!(vp.pan_x(), 0.0);
}

#[test]
fn test_zoom_skipped_without_measurement() {
    let mut surface = LayoutModel::with_container_size(0.0, 0.0, ImageSize::new(907.0, 510.0));
    let mut vp = ViewportController::default();
    assert!(!vp.zoom_at(WheelDirection::ZoomIn, ScreenPoint::new(1.0, 1.0), &mut surface));
    assert_eq!(vp.zoom_percent(), 100.0);
}

#[test]
fn test_pan_clamped_at_fit() {
    let mut surface = layout();
    let capture = PointerCapture::new();
    let mut vp = ViewportController::default();

    assert!(vp.begin_pan(ScreenPoint::new(100.0, 100.0), &capture));
    assert!(vp.pan_to(ScreenPoint::new(150.0, 150.0), &mut surface));
    // Only the 4px horizontal slack is available at 100%
    assert_eq!(vp.pan_x(), 2.0);
    assert_eq!(vp.pan_y(), 0.0);
    assert!(vp.end_pan());
    assert!(capture.is_idle());
}

#[test]
fn test_pan_follows_pointer_when_zoomed() {
    let mut surface = layout();
    let capture = PointerCapture::new();
    let mut vp = ViewportController::default();
    vp.set_zoom_percent(200.0);
    vp.clamp_to(&mut surface);

    vp.begin_pan(ScreenPoint::new(450.0, 300.0), &capture);
    vp.pan_to(ScreenPoint::new(500.0, 260.0), &mut surface);
    assert_eq!(vp.pan_x(), 50.0);
    assert_eq!(vp.pan_y(), -40.0);

    let image = surface.image_rect().unwrap();
    assert!((image.x - (-450.0 + 50.0)).abs() < 1e-9);
}

#[test]
fn test_pan_to_without_session_is_ignored() {
    let mut surface = layout();
    let mut vp = ViewportController::default();
    assert!(!vp.pan_to(ScreenPoint::new(10.0, 10.0), &mut surface));
}

#[test]
fn test_clamp_to_after_container_resize() {
    let mut surface = layout();
    let mut vp = ViewportController::new(ViewportSettings::default());
    vp.set_zoom_percent(200.0);
    vp.set_pan(400.0, 0.0);
    vp.clamp_to(&mut surface);
    assert_eq!(vp.pan_x(), 400.0);

    // A narrower container fits a smaller picture, shrinking the allowed pan
    surface.set_container(PixelRect::new(0.0, 0.0, 450.0, 600.0));
    vp.clamp_to(&mut surface);
    let picture = surface.image_rect().unwrap();
    let max_x = (picture.width - 450.0 + 4.0) / 2.0;
    assert!(max_x < 400.0);
    assert!((vp.pan_x() - max_x).abs() < 1e-9);
}
