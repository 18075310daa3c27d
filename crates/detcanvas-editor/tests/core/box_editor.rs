use detcanvas_core::{BoxGeometry, PixelSize, PointerCapture, ScreenPoint};
use detcanvas_editor::box_editor::{
    move_box, resize_box, BoxEditor, DragOrigin, EditMode, EditorSettings,
};

fn sample_box() -> BoxGeometry {
    BoxGeometry::new(28.0, 5.0, 9.0, 12.0)
}

#[test]
fn test_resize_scenario() {
    let capture = PointerCapture::new();
    let mut editor = BoxEditor::new("1", EditorSettings::default());
    let bbox = sample_box();

    let size = PixelSize::new(300.0, 200.0);
    editor.begin_resize(ScreenPoint::new(400.0, 300.0), size, bbox, &capture);
    let next = editor.drag_to(ScreenPoint::new(420.0, 320.0), &bbox).unwrap();
    assert!((next.width - 9.6).abs() < 1e-9);
    assert!((next.height - 13.2).abs() < 1e-9);
    assert_eq!((next.top, next.left), (28.0, 5.0));
}

#[test]
fn test_resize_measures_from_drag_start() {
    let capture = PointerCapture::new();
    let mut editor = BoxEditor::new("1", EditorSettings::default());
    let bbox = sample_box();

    editor.begin_resize(ScreenPoint::new(0.0, 0.0), PixelSize::new(300.0, 200.0), bbox, &capture);
    let first = editor.drag_to(ScreenPoint::new(500.0, 500.0), &bbox).unwrap();
    // Moving back to (20, 20) yields the same box as going there directly
    let second = editor.drag_to(ScreenPoint::new(20.0, 20.0), &first).unwrap();
    assert!((second.width - 9.6).abs() < 1e-9);
    assert!((second.height - 13.2).abs() < 1e-9);
}

#[test]
fn test_move_to_origin_edge() {
    let start = BoxGeometry::new(10.0, 10.0, 20.0, 20.0);
    let origin = DragOrigin {
        pointer: ScreenPoint::new(0.0, 0.0),
        box_px: PixelSize::new(200.0, 200.0),
        start_box: start,
    };
    // -100px on a 200px box spanning 20% is -10%
    let out = move_box(&origin, ScreenPoint::new(-100.0, -100.0), &start, 1.0);
    assert_eq!(out, BoxGeometry::new(0.0, 0.0, 30.0, 30.0));

    // One pixel further is rejected on both axes
    let out = move_box(&origin, ScreenPoint::new(-102.0, -102.0), &out, 1.0);
    assert_eq!(out, BoxGeometry::new(0.0, 0.0, 30.0, 30.0));
}

#[test]
fn test_resize_respects_custom_minimum() {
    let start = BoxGeometry::new(10.0, 10.0, 20.0, 20.0);
    let origin = DragOrigin {
        pointer: ScreenPoint::new(0.0, 0.0),
        box_px: PixelSize::new(200.0, 200.0),
        start_box: start,
    };
    let out = resize_box(&origin, ScreenPoint::new(-190.0, -190.0), 5.0);
    assert_eq!(out.width, 5.0);
    assert_eq!(out.height, 5.0);
}

#[test]
fn test_move_session_mode() {
    let capture = PointerCapture::new();
    let mut editor = BoxEditor::new("2", EditorSettings::default());
    let size = PixelSize::new(10.0, 10.0);
    assert!(editor.begin_move(ScreenPoint::new(0.0, 0.0), size, sample_box(), &capture));
    assert_eq!(editor.mode(), EditMode::Moving);
    assert_eq!(editor.mode().to_string(), "moving");
    assert!(capture.is_captured_by(&detcanvas_core::CaptureOwner::Detection("2".into())));
    drop(editor);
    assert!(capture.is_idle());
}
