use super::*;
use crate::{
    animation::{ease::EaseMode, snapshot::TransformSnapshot, summary::format_summary},
    config::model::{NEXT_MOVE_REVERSE, NextMoveOn},
    foundation::core::{Canvas, Crop, Vec2f},
    host::memory::MemoryHost,
};

fn host() -> (MemoryHost, ItemId) {
    let mut host = MemoryHost::new(Canvas::default());
    let item = host.add_item("Main", "Box", TransformSnapshot::identity());
    (host, item)
}

fn slide(x: f32, y: f32, trigger: StartTrigger, next: &str) -> MoveSettings {
    let mut s = MoveSettings {
        source: "Box".into(),
        target: TransformSnapshot {
            position: Vec2f::new(x, y),
            ..TransformSnapshot::identity()
        },
        ..MoveSettings::default()
    };
    s.timing.easing = EaseMode::None;
    s.chain.start_trigger = trigger;
    s.chain.next_move = next.into();
    s.refresh_transform_text();
    s
}

fn position(rt: &MoveRuntime<MemoryHost>, item: ItemId) -> Vec2f {
    rt.host().transform(item).unwrap().position
}

#[test]
fn enable_disable_runs_once_then_switches_off() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(100.0, 0.0, StartTrigger::EnableDisable, ""))
        .unwrap();

    assert_eq!(rt.tick_filter(id, 0.1).unwrap(), StepOutcome::Advanced);
    assert!(rt.state(id).unwrap().moving);
    assert_eq!(rt.tick_filter(id, 0.3).unwrap(), StepOutcome::Completed);
    assert_eq!(position(&rt, item), Vec2f::new(100.0, 0.0));
    assert!(!rt.is_enabled(id).unwrap());

    rt.tick(0.1);
    assert!(!rt.state(id).unwrap().moving);

    // Enabling again at the target has nothing to do and switches straight back off.
    rt.set_enabled(id, true).unwrap();
    rt.tick(0.1);
    assert!(!rt.is_enabled(id).unwrap());
    assert!(!rt.state(id).unwrap().moving);
}

#[test]
fn disabled_filters_do_not_advance() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(100.0, 0.0, StartTrigger::Manual, ""))
        .unwrap();
    assert_eq!(rt.start_manual(id).unwrap(), StartOutcome::Started);
    rt.set_enabled(id, false).unwrap();
    assert_eq!(rt.tick_filter(id, 1.0).unwrap(), StepOutcome::Idle);
    assert_eq!(position(&rt, item), Vec2f::ZERO);
}

#[test]
fn completion_starts_the_next_move() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let a = rt
        .create_transform_move("A", "Main", slide(100.0, 0.0, StartTrigger::Manual, "B"))
        .unwrap();
    let b = rt
        .create_transform_move("B", "Main", slide(100.0, 100.0, StartTrigger::None, ""))
        .unwrap();

    rt.start_manual(a).unwrap();
    assert_eq!(rt.tick_filter(a, 0.4).unwrap(), StepOutcome::Completed);
    assert!(rt.state(b).unwrap().moving);
    assert_eq!(rt.tick_filter(b, 0.4).unwrap(), StepOutcome::Completed);
    assert_eq!(position(&rt, item), Vec2f::new(100.0, 100.0));
}

#[test]
fn reverse_sentinel_plays_back_once() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move(
            "Slide",
            "Main",
            slide(100.0, 0.0, StartTrigger::Manual, NEXT_MOVE_REVERSE),
        )
        .unwrap();

    rt.start_manual(id).unwrap();
    rt.tick(0.4);
    assert_eq!(position(&rt, item), Vec2f::new(100.0, 0.0));
    let state = rt.state(id).unwrap();
    assert!(state.moving && state.reverse);

    rt.tick(0.4);
    assert_eq!(position(&rt, item), Vec2f::ZERO);
    let state = rt.state(id).unwrap();
    assert!(!state.moving && !state.reverse);
}

#[test]
fn enable_disable_chain_hands_over_the_enabled_flag() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let a = rt
        .create_transform_move("A", "Main", slide(100.0, 0.0, StartTrigger::EnableDisable, "B"))
        .unwrap();
    let b = rt
        .create_transform_move("B", "Main", slide(0.0, 50.0, StartTrigger::EnableDisable, ""))
        .unwrap();
    rt.set_enabled(b, false).unwrap();

    assert_eq!(rt.tick_filter(a, 0.4).unwrap(), StepOutcome::Completed);
    assert!(!rt.is_enabled(a).unwrap());
    assert!(rt.is_enabled(b).unwrap());
    assert!(rt.state(b).unwrap().moving);

    // No second start from the enabled edge: the move keeps its clock.
    assert_eq!(rt.tick_filter(b, 0.1).unwrap(), StepOutcome::Advanced);
    assert_eq!(rt.tick_filter(b, 0.3).unwrap(), StepOutcome::Completed);
    assert_eq!(position(&rt, item), Vec2f::new(0.0, 50.0));
    assert!(!rt.is_enabled(b).unwrap());
}

#[test]
fn hotkey_walks_the_chain_and_wraps() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let mut sa = slide(100.0, 0.0, StartTrigger::None, "B");
    sa.chain.next_move_on = NextMoveOn::Hotkey;
    let mut sb = slide(0.0, 0.0, StartTrigger::None, "A");
    sb.chain.next_move_on = NextMoveOn::Hotkey;
    let a = rt.create_transform_move("A", "Main", sa).unwrap();
    let b = rt.create_transform_move("B", "Main", sb).unwrap();

    rt.hotkey_pressed(a).unwrap();
    assert!(rt.state(a).unwrap().moving);
    assert!(!rt.state(b).unwrap().moving);
    rt.tick(0.4);

    rt.hotkey_pressed(a).unwrap();
    assert!(rt.state(b).unwrap().moving);
    rt.tick(0.4);

    rt.hotkey_pressed(a).unwrap();
    assert!(rt.state(a).unwrap().moving);
    assert_eq!(rt.transform_move(a).unwrap().hotkey_cursor, 1);
}

#[test]
fn hotkey_on_a_foreign_filter_is_rejected() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let f = rt.add_foreign_filter("Blur", "Main", "blur_filter").unwrap();
    assert!(rt.hotkey_pressed(f).is_err());
    assert!(rt.start_manual(f).is_err());
}

#[test]
fn owner_and_source_events_match_their_triggers() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let on_activate = rt
        .create_transform_move("A", "Main", slide(10.0, 0.0, StartTrigger::Activate, ""))
        .unwrap();
    let on_show = rt
        .create_transform_move("B", "Main", slide(10.0, 0.0, StartTrigger::SourceShow, ""))
        .unwrap();

    rt.parent_event("Main", SourceEvent::Show);
    assert!(!rt.state(on_activate).unwrap().moving);
    assert!(!rt.state(on_show).unwrap().moving);

    rt.parent_event("Main", SourceEvent::Activate);
    assert!(rt.state(on_activate).unwrap().moving);

    rt.source_event("Box", SourceEvent::Hide);
    assert!(!rt.state(on_show).unwrap().moving);
    rt.source_event("Box", SourceEvent::Show);
    assert!(rt.state(on_show).unwrap().moving);
}

#[test]
fn rename_follows_source_and_parent() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(10.0, 0.0, StartTrigger::None, ""))
        .unwrap();

    rt.host_mut().rename_source("Box", "Crate");
    rt.source_renamed("Box", "Crate");
    assert_eq!(rt.transform_move(id).unwrap().settings.source, "Crate");
    assert_eq!(rt.signals().subscribers("Crate"), vec![id]);
    assert!(rt.signals().subscribers("Box").is_empty());

    rt.host_mut().rename_source("Main", "Intro");
    rt.source_renamed("Main", "Intro");
    assert_eq!(rt.filters().get(id).unwrap().name, "Slide");
    assert_eq!(rt.filters().find("Intro", "Slide"), Some(id));
}

#[test]
fn removed_item_stops_the_move() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(10.0, 0.0, StartTrigger::None, ""))
        .unwrap();
    rt.start_manual(id).unwrap();

    rt.host_mut().remove_item(item);
    rt.item_removed(item);
    let mv = rt.transform_move(id).unwrap();
    assert!(mv.item.is_none());
    assert!(!mv.state.moving);
    assert_eq!(rt.start_manual(id).unwrap(), StartOutcome::NoTarget);
}

#[test]
fn update_moves_the_subscription() {
    let (mut host, _) = host();
    let other = host.add_item("Main", "Cam", TransformSnapshot::identity());
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(10.0, 0.0, StartTrigger::None, ""))
        .unwrap();

    let mut s = slide(10.0, 0.0, StartTrigger::None, "");
    s.source = "Cam".into();
    rt.update(id, s).unwrap();
    assert_eq!(rt.transform_move(id).unwrap().item, Some(other));
    assert!(rt.signals().subscribers("Box").is_empty());
    assert_eq!(rt.signals().subscribers("Cam"), vec![id]);

    let mut bad = slide(10.0, 0.0, StartTrigger::None, "");
    bad.curve = f32::NAN;
    assert!(rt.update(id, bad).is_err());
    assert!(rt.update_value(id, ValueMoveSettings::default()).is_err());
}

#[test]
fn load_regenerates_the_summary_text() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", MoveSettings::default())
        .unwrap();
    let mut s = slide(42.0, 0.0, StartTrigger::None, "");
    s.transform_text = "stale".into();
    rt.load(id, s).unwrap();
    let mv = rt.transform_move(id).unwrap();
    assert!(mv.settings.transform_text.starts_with("pos: x 42 y 0"));
}

#[test]
fn destroy_drops_filter_and_subscriptions() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(10.0, 0.0, StartTrigger::None, ""))
        .unwrap();
    rt.destroy(id).unwrap();
    assert!(matches!(rt.state(id), Err(MoveError::UnknownFilter(_))));
    assert!(rt.signals().subscribers("Box").is_empty());
    assert!(rt.signals().rename_subscribers().is_empty());
    assert!(rt.destroy(id).is_err());
}

#[test]
fn value_moves_run_through_the_runtime() {
    let mut host = MemoryHost::new(Canvas::default());
    host.set_setting("Mic", "volume", 1.0);
    let mut rt = MoveRuntime::new(host);
    let mut s = ValueMoveSettings {
        setting: "volume".into(),
        value: 0.0,
        ..ValueMoveSettings::default()
    };
    s.timing.duration_ms = 200;
    s.chain.start_trigger = StartTrigger::Enable;
    let id = rt
        .create_value_move("Fade", "Mic", s, ValueKind::Audio)
        .unwrap();

    assert_eq!(rt.tick_filter(id, 0.3).unwrap(), StepOutcome::Completed);
    assert_eq!(rt.host().setting_value("Mic", "volume"), Some(0.0));
    assert!(rt.is_enabled(id).unwrap());
    assert_eq!(rt.value_move(id).unwrap().kind, ValueKind::Audio);
    assert!(rt.transform_move(id).is_err());
}

#[test]
fn property_callbacks_reach_the_filter() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(10.0, 0.0, StartTrigger::None, ""))
        .unwrap();

    assert!(rt.capture_transform(id).unwrap());
    assert_eq!(
        rt.transform_move(id).unwrap().settings.target,
        TransformSnapshot::identity()
    );
    assert!(!rt.transform_text_changed(id, "pos: x 5 y 6 rot: 0 scale: x 1 y 1 bounds: x 0 y 0 crop: l 0 t 0 r 0 b 0").unwrap());
    assert_eq!(
        rt.transform_move(id).unwrap().settings.target.position,
        Vec2f::new(5.0, 6.0)
    );
    assert!(rt.relative_changed(id, true).unwrap());
    assert!(rt.transform_move(id).unwrap().settings.relative);
    assert_eq!(rt.next_move_candidates(id).unwrap(), vec!["", "Reverse", "Slide"]);
}

#[test]
fn huge_relative_crop_saturates_instead_of_panicking() {
    let mut host = MemoryHost::new(Canvas::default());
    let item = host.add_item(
        "Main",
        "Box",
        TransformSnapshot {
            crop: Crop::new(10, 0, 0, 0),
            ..TransformSnapshot::identity()
        },
    );
    let mut rt = MoveRuntime::new(host);
    let mut s = slide(0.0, 0.0, StartTrigger::None, "");
    s.relative = true;
    s.target.scale = Vec2f::ZERO;
    s.target.crop = Crop::new(i32::MAX, 0, 0, 0);
    let id = rt.create_transform_move("Crop", "Main", s).unwrap();

    assert_eq!(rt.start_manual(id).unwrap(), StartOutcome::Started);
    assert_eq!(rt.transform_move(id).unwrap().to.crop.left, i32::MAX);
    rt.tick(1.0);
    assert_eq!(rt.host().transform(item).unwrap().crop.left, i32::MAX);
}

#[test]
fn unbounded_end_delay_keeps_ticking() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let mut s = slide(100.0, 0.0, StartTrigger::None, "");
    s.timing.end_delay_ms = u64::MAX;
    let id = rt.create_transform_move("Slide", "Main", s).unwrap();
    rt.start_manual(id).unwrap();

    rt.tick(0.1);
    assert_eq!(rt.tick_filter(id, 0.3).unwrap(), StepOutcome::Advanced);
    assert_eq!(position(&rt, item), Vec2f::new(100.0, 0.0));
    assert!(rt.state(id).unwrap().moving);
}

#[test]
fn out_of_range_summary_is_regenerated() {
    let (host, item) = host();
    let mut rt = MoveRuntime::new(host);
    let id = rt
        .create_transform_move("Slide", "Main", slide(10.0, 0.0, StartTrigger::None, ""))
        .unwrap();

    let text = "pos: x 1e40 y 0 rot: 0 scale: x 1 y 1 bounds: x 0 y 0 crop: l 0 t 0 r 0 b 0";
    assert!(rt.transform_text_changed(id, text).unwrap());
    let settings = &rt.transform_move(id).unwrap().settings;
    assert_eq!(settings.target.position, Vec2f::new(10.0, 0.0));
    assert_eq!(settings.transform_text, format_summary(&settings.target));
    assert!(settings.validate().is_ok());

    rt.start_manual(id).unwrap();
    rt.tick(1.0);
    assert_eq!(position(&rt, item), Vec2f::new(10.0, 0.0));
}

#[test]
fn duplicate_names_are_rejected() {
    let (host, _) = host();
    let mut rt = MoveRuntime::new(host);
    rt.create_transform_move("Slide", "Main", MoveSettings::default())
        .unwrap();
    assert!(rt
        .create_transform_move("Slide", "Main", MoveSettings::default())
        .is_err());
}
