use super::*;
use crate::{
    animation::snapshot::TransformSnapshot, foundation::core::Canvas, host::memory::MemoryHost,
};

fn host_with(n: usize) -> (MemoryHost, Vec<ItemId>) {
    let mut h = MemoryHost::new(Canvas {
        width: 1280,
        height: 720,
    });
    let ids = (0..n)
        .map(|i| h.add_item("Main", &format!("S{i}"), TransformSnapshot::identity()))
        .collect();
    (h, ids)
}

#[test]
fn relative_order_issues_unit_steps() {
    let (mut h, ids) = host_with(4);
    apply_order(&mut h, ids[0], OrderMode::Relative, 2);
    assert_eq!(h.order_index(ids[0]), Some(2));
    apply_order(&mut h, ids[0], OrderMode::Relative, -1);
    assert_eq!(h.order_index(ids[0]), Some(1));
    apply_order(&mut h, ids[0], OrderMode::Relative, 0);
    assert_eq!(h.order_index(ids[0]), Some(1));
}

#[test]
fn absolute_order_sets_position() {
    let (mut h, ids) = host_with(3);
    apply_order(&mut h, ids[2], OrderMode::Absolute, 0);
    assert_eq!(h.order_index(ids[2]), Some(0));
}

#[test]
fn toggle_shows_hidden_items_and_records_it() {
    let (mut h, ids) = host_with(1);
    let item = ids[0];
    assert!(!show_at_start(&mut h, item, VisibilityChange::Toggle));
    h.set_visible(item, false);
    assert!(show_at_start(&mut h, item, VisibilityChange::Toggle));
    assert!(h.visible(item));

    hide_at_end(&mut h, item, VisibilityChange::Toggle, true);
    assert!(h.visible(item));
    hide_at_end(&mut h, item, VisibilityChange::Toggle, false);
    assert!(!h.visible(item));
}

#[test]
fn show_and_hide_are_one_sided() {
    let (mut h, ids) = host_with(1);
    let item = ids[0];
    h.set_visible(item, false);
    assert!(show_at_start(&mut h, item, VisibilityChange::Show));
    hide_at_end(&mut h, item, VisibilityChange::Show, false);
    assert!(h.visible(item));

    assert!(!show_at_start(&mut h, item, VisibilityChange::Hide));
    hide_at_end(&mut h, item, VisibilityChange::Hide, false);
    assert!(!h.visible(item));
}

#[test]
fn pending_visibility_rules() {
    let (mut h, ids) = host_with(1);
    let item = ids[0];
    assert!(visibility_pending(&h, item, VisibilityChange::Hide, false));
    assert!(visibility_pending(&h, item, VisibilityChange::Toggle, false));
    assert!(!visibility_pending(&h, item, VisibilityChange::Show, false));
    assert!(visibility_pending(&h, item, VisibilityChange::Show, true));
    h.set_visible(item, false);
    assert!(!visibility_pending(&h, item, VisibilityChange::Hide, false));
    assert!(!visibility_pending(&h, item, VisibilityChange::None, false));
}
