use detcanvas_core::{BoxGeometry, Detection, DetectionSet, Error};
use detcanvas_editor::detection_store::DetectionStore;

#[test]
fn test_store_from_sample() {
    let store = DetectionStore::from_set(&DetectionSet::sample()).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.contains("1"));
    assert!(!store.contains("3"));
    assert_eq!(store.get("1").unwrap().owner, "@fede4rodriguez");
}

#[test]
fn test_invalid_box_rejected_at_construction() {
    let detections = vec![Detection::new(
        "x",
        "plant",
        "@someone",
        BoxGeometry::new(95.0, 0.0, 10.0, 10.0),
    )];
    match DetectionStore::from_detections(detections) {
        Err(Error::Data(_)) => {}
        other => panic!("expected data error, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_update_keeps_other_detections() {
    let mut store = DetectionStore::from_set(&DetectionSet::sample()).unwrap();
    let untouched = store.get("2").unwrap().clone();
    store
        .update_box("1", BoxGeometry::new(0.0, 0.0, 100.0, 100.0))
        .unwrap();
    assert_eq!(store.get("2").unwrap(), &untouched);
    assert_eq!(store.to_vec()[0].bbox.width, 100.0);
}
