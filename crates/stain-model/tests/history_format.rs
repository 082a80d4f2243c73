//! Wire format checks for persisted history entries.

use stain_model::{EstimationResult, HistoryEntry};

#[test]
fn history_entry_uses_camel_case_fields() {
    let result = EstimationResult {
        total_points: 1000,
        points_in_stain: 500,
        estimated_area: 100,
        area_percentage: 50.0,
    };
    let entry = HistoryEntry::new("stain.png", 10, 20, &result, "data:image/png;base64,AA==".into());
    let value = serde_json::to_value(&entry).expect("serialize entry");
    let object = value.as_object().expect("entry is an object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "areaPercentage",
            "estimatedArea",
            "fileName",
            "id",
            "imageDataUrl",
            "imageHeight",
            "imageWidth",
            "pointsInStain",
            "timestamp",
            "totalPoints",
        ]
    );
    assert_eq!(object["fileName"], "stain.png");
    assert_eq!(object["imageWidth"], 10);
    assert_eq!(object["imageHeight"], 20);
    assert_eq!(object["pointsInStain"], 500);
    assert!(object["timestamp"].is_string());
}

#[test]
fn parses_entry_written_by_earlier_versions() {
    // Millisecond timestamps and numeric-string ids come from older writers.
    let json = r#"{
        "id": "1718000000000",
        "fileName": "mancha.jpg",
        "imageWidth": 640,
        "imageHeight": 480,
        "totalPoints": 2500,
        "pointsInStain": 610,
        "estimatedArea": 74957,
        "areaPercentage": 24.4,
        "timestamp": "2024-06-10T06:13:20.000Z",
        "imageDataUrl": "data:image/png;base64,iVBORw0KGgo="
    }"#;
    let entry: HistoryEntry = serde_json::from_str(json).expect("parse legacy entry");
    assert_eq!(entry.id, "1718000000000");
    assert_eq!(entry.file_name, "mancha.jpg");
    assert_eq!(entry.result().points_outside(), 1890);
    assert_eq!(entry.timestamp.to_rfc3339(), "2024-06-10T06:13:20+00:00");
}

#[test]
fn round_trip_preserves_entry() {
    let result = EstimationResult {
        total_points: 3,
        points_in_stain: 1,
        estimated_area: 33,
        area_percentage: 33.33,
    };
    let entry = HistoryEntry::new("x.bmp", 10, 10, &result, String::new());
    let json = serde_json::to_string(&entry).expect("serialize");
    let back: HistoryEntry = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, entry);
}
