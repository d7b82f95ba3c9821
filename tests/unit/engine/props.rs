use super::*;
use crate::{
    animation::snapshot::TransformSnapshot,
    animation::summary::format_summary,
    config::model::{MoveSettings, ValueMoveSettings},
    engine::{
        registry::FilterSlot,
        value_move::{ValueKind, ValueMove},
    },
    foundation::core::{Canvas, Crop, Vec2f},
    host::memory::MemoryHost,
};

fn live() -> TransformSnapshot {
    TransformSnapshot {
        position: Vec2f::new(100.0, 50.0),
        crop: Crop::new(2, 2, 0, 0),
        ..TransformSnapshot::identity()
    }
}

fn setup() -> (MemoryHost, TransformMove) {
    let mut host = MemoryHost::new(Canvas::default());
    host.add_item("Main", "Box", live());
    let mv = TransformMove::new(MoveSettings {
        source: "Box".into(),
        ..MoveSettings::default()
    });
    (host, mv)
}

#[test]
fn capture_copies_live_transform() {
    let (host, mut mv) = setup();
    assert!(capture_transform(&mut mv, &host, "Main"));
    assert_eq!(mv.settings.target, live());
    assert_eq!(mv.settings.transform_text, format_summary(&live()));
}

#[test]
fn capture_in_relative_mode_stores_offset_from_last_end() {
    let (host, mut mv) = setup();
    mv.settings.relative = true;
    mv.to = TransformSnapshot {
        position: Vec2f::new(40.0, 50.0),
        ..TransformSnapshot::identity()
    };
    assert!(capture_transform(&mut mv, &host, "Main"));
    assert_eq!(mv.settings.target.position, Vec2f::new(60.0, 0.0));
    assert_eq!(mv.settings.target.crop, Crop::new(2, 2, 0, 0));
}

#[test]
fn capture_without_item_changes_nothing() {
    let (host, mut mv) = setup();
    mv.settings.source = "Ghost".into();
    let before = mv.settings.clone();
    assert!(!capture_transform(&mut mv, &host, "Main"));
    assert_eq!(mv.settings, before);
}

#[test]
fn relative_toggle_converts_both_ways() {
    let (host, mut mv) = setup();
    mv.settings.target = TransformSnapshot {
        position: Vec2f::new(150.0, 50.0),
        crop: Crop::new(0, 2, 0, 0),
        ..TransformSnapshot::identity()
    };

    assert!(!relative_changed(&mut mv, &host, "Main", false));
    assert!(relative_changed(&mut mv, &host, "Main", true));
    assert_eq!(mv.settings.target.position, Vec2f::new(50.0, 0.0));
    assert_eq!(mv.settings.target.crop, Crop::new(-2, 0, 0, 0));

    assert!(relative_changed(&mut mv, &host, "Main", false));
    assert_eq!(mv.settings.target.position, Vec2f::new(150.0, 50.0));
    assert_eq!(mv.settings.target.crop, Crop::new(0, 2, 0, 0));
    assert_eq!(
        mv.settings.transform_text,
        format_summary(&mv.settings.target)
    );
}

#[test]
fn text_edits_parse_or_regenerate() {
    let (_, mut mv) = setup();
    assert!(!transform_text_changed(
        &mut mv,
        "pos: x 1 y 2 rot: 3 scale: x 1 y 1 bounds: x 0 y 0 crop: l 0 t 0 r 0 b 0"
    ));
    assert_eq!(mv.settings.target.position, Vec2f::new(1.0, 2.0));
    assert!(transform_text_changed(&mut mv, "pos: nope"));
    assert_eq!(
        mv.settings.transform_text,
        format_summary(&mv.settings.target)
    );
}

#[test]
fn candidates_list_moves_on_owner_and_target() {
    let mut table = FilterTable::new();
    let slot = |name: &str, parent: &str, node: FilterNode| FilterSlot {
        name: name.into(),
        parent: parent.into(),
        enabled: true,
        node,
    };
    let me = table
        .insert(slot(
            "Slide",
            "Main",
            FilterNode::TransformMove(Box::new(TransformMove::new(MoveSettings {
                source: "Box".into(),
                ..MoveSettings::default()
            }))),
        ))
        .unwrap();
    table
        .insert(slot(
            "Fade",
            "Box",
            FilterNode::ValueMove(Box::new(ValueMove::new(
                ValueMoveSettings::default(),
                ValueKind::Generic,
            ))),
        ))
        .unwrap();
    table
        .insert(slot(
            "Blur",
            "Box",
            FilterNode::Foreign {
                kind_id: "blur".into(),
            },
        ))
        .unwrap();
    table
        .insert(slot(
            "Elsewhere",
            "Other",
            FilterNode::TransformMove(Box::new(TransformMove::new(MoveSettings::default()))),
        ))
        .unwrap();

    assert_eq!(
        next_move_candidates(&table, me),
        vec!["", "Reverse", "Slide", "Fade"]
    );
    assert_eq!(
        next_move_candidates(&table, FilterId(42)),
        vec!["", "Reverse"]
    );
}
