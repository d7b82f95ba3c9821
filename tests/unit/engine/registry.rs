use super::*;
use crate::config::model::{MoveSettings, NextMoveOn, ValueMoveSettings};

fn slot(name: &str, parent: &str, node: FilterNode) -> FilterSlot {
    FilterSlot {
        name: name.into(),
        parent: parent.into(),
        enabled: true,
        node,
    }
}

fn transform(source: &str, next: &str) -> FilterNode {
    let mut s = MoveSettings {
        source: source.into(),
        ..MoveSettings::default()
    };
    s.chain.next_move = next.into();
    FilterNode::TransformMove(Box::new(TransformMove::new(s)))
}

#[test]
fn names_are_unique_per_parent() {
    let mut t = FilterTable::new();
    t.insert(slot("Move", "Scene", transform("", ""))).unwrap();
    assert!(t.insert(slot("Move", "Scene", transform("", ""))).is_err());
    assert!(t.insert(slot("Move", "Other", transform("", ""))).is_ok());
}

#[test]
fn removed_ids_stay_dead() {
    let mut t = FilterTable::new();
    let a = t.insert(slot("A", "S", transform("", ""))).unwrap();
    let b = t.insert(slot("B", "S", transform("", ""))).unwrap();
    t.remove(a).unwrap();
    assert!(matches!(t.get(a), Err(MoveError::UnknownFilter(id)) if id == a));
    assert!(t.remove(a).is_err());
    assert_eq!(t.ids(), vec![b]);
    let c = t.insert(slot("A", "S", transform("", ""))).unwrap();
    assert_ne!(a, c);
}

#[test]
fn kind_ids_cover_every_node() {
    let v = ValueMove::new(ValueMoveSettings::default(), ValueKind::Audio);
    assert_eq!(
        FilterNode::ValueMove(Box::new(v)).kind_id(),
        MOVE_AUDIO_VALUE_FILTER_ID
    );
    let g = ValueMove::new(ValueMoveSettings::default(), ValueKind::Generic);
    assert_eq!(
        FilterNode::ValueMove(Box::new(g)).kind_id(),
        MOVE_VALUE_FILTER_ID
    );
    assert_eq!(transform("", "").kind_id(), MOVE_SOURCE_FILTER_ID);
    let f = FilterNode::Foreign {
        kind_id: "color_filter".into(),
    };
    assert_eq!(f.kind_id(), "color_filter");
    assert!(f.chain().is_none());
    assert!(f.state().is_none());
}

#[test]
fn links_expose_chain_settings() {
    let mut t = FilterTable::new();
    let a = t.insert(slot("A", "Scene", transform("Cam", "B"))).unwrap();
    let link = t.link(a).unwrap();
    assert_eq!(link.kind, NodeKind::TransformMove);
    assert_eq!(link.owner, "Scene");
    assert_eq!(link.target.as_deref(), Some("Cam"));
    assert_eq!(link.next_move, "B");
    assert_eq!(link.next_move_on, NextMoveOn::End);

    let f = t
        .insert(slot(
            "Blur",
            "Cam",
            FilterNode::Foreign {
                kind_id: "blur".into(),
            },
        ))
        .unwrap();
    let link = t.link(f).unwrap();
    assert_eq!(link.kind, NodeKind::Foreign);
    assert!(link.next_move.is_empty());
    assert_eq!(t.filter_by_name("Cam", "Blur"), Some(f));
    assert_eq!(t.attached_to("Scene").count(), 1);
}
