use super::*;

fn sample() -> TransformSnapshot {
    TransformSnapshot {
        position: Vec2f::new(960.0, -40.0),
        rotation: 12.5,
        scale: Vec2f::new(1.0, 0.25),
        bounds: Vec2f::new(320.0, 180.0),
        crop: Crop::new(0, 4, 16, 2),
    }
}

#[test]
fn format_matches_fixed_layout() {
    assert_eq!(
        format_summary(&sample()),
        "pos: x 960 y -40 rot: 12.5 scale: x 1.000 y 0.250 bounds: x 320 y 180 crop: l 0 t 4 r 16 b 2"
    );
}

#[test]
fn formatted_text_parses_back() {
    assert_eq!(parse_summary(&format_summary(&sample())).unwrap(), sample());
}

#[test]
fn parse_tolerates_whitespace_precision_and_trailing_text() {
    let text = "  pos:x 1.25   y-3\nrot:  -90 scale: x 2 y 2.5e0 bounds: x 0 y 0 crop: l 1 t 2 r 3 b 4 and more";
    let s = parse_summary(text).unwrap();
    assert_eq!(s.position, Vec2f::new(1.25, -3.0));
    assert_eq!(s.rotation, -90.0);
    assert_eq!(s.scale, Vec2f::new(2.0, 2.5));
    assert_eq!(s.crop, Crop::new(1, 2, 3, 4));
}

#[test]
fn parse_rejects_missing_fields() {
    let err = parse_summary("pos: x 1 y 2 rot: 3").unwrap_err();
    assert!(matches!(err, MoveError::Summary(_)));

    let err = parse_summary("pos: x one y 2").unwrap_err();
    assert!(err.to_string().contains("expected a number"));

    assert!(parse_summary("").is_err());
}

#[test]
fn numbers_beyond_f32_are_rejected() {
    let text = "pos: x 1e40 y 0 rot: 0 scale: x 1 y 1 bounds: x 0 y 0 crop: l 0 t 0 r 0 b 0";
    let err = parse_summary(text).unwrap_err();
    assert!(matches!(err, MoveError::Summary(_)));
    assert!(err.to_string().contains("1e40"));

    let text = "pos: x 0 y 0 rot: -4e38 scale: x 1 y 1 bounds: x 0 y 0 crop: l 0 t 0 r 0 b 0";
    assert!(parse_summary(text).is_err());
}

#[test]
fn crop_edges_must_be_integers() {
    let text = "pos: x 0 y 0 rot: 0 scale: x 1 y 1 bounds: x 0 y 0 crop: l 1.5 t 0 r 0 b 0";
    assert!(parse_summary(text).is_err());
}

#[test]
fn rounding_is_applied_per_field() {
    let s = TransformSnapshot {
        position: Vec2f::new(10.4, 10.6),
        rotation: 0.04,
        scale: Vec2f::new(0.12345, 1.0),
        ..TransformSnapshot::identity()
    };
    let text = format_summary(&s);
    assert!(text.starts_with("pos: x 10 y 11 rot: 0.0 scale: x 0.123 y 1.000"));
    let back = parse_summary(&text).unwrap();
    assert_eq!(back.position, Vec2f::new(10.0, 11.0));
}
