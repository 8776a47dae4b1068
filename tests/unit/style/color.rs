use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::new(255, 0, 0, 255));

    let c: Rgba8 = serde_json::from_value(json!("#0000FF80")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 128));

    assert!(parse_hex("#12345").is_err());
    assert!(parse_hex("#gg0000").is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c, Rgba8::new(255, 128, 0, 255));

    let c: Rgba8 = serde_json::from_value(json!([0.0, 0.0, 0.0, 0.0])).unwrap();
    assert_eq!(c, Rgba8::TRANSPARENT);

    assert!(serde_json::from_value::<Rgba8>(json!([1.0, 2.0])).is_err());
}

#[test]
fn parses_hsla_object() {
    let c: Rgba8 = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    // Pure red.
    assert_eq!(c, Rgba8::new(255, 0, 0, 255));
}

#[test]
fn hex_output_round_trips() {
    assert_eq!(to_hex(Rgba8::WHITE), "#ffffff");
    assert_eq!(to_hex(Rgba8::new(1, 2, 3, 4)), "#01020304");
    let back: Rgba8 = serde_json::from_value(json!(to_hex(Rgba8::new(1, 2, 3, 4)))).unwrap();
    assert_eq!(back, Rgba8::new(1, 2, 3, 4));
}
