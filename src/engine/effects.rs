use crate::{
    config::model::{OrderMode, VisibilityChange},
    foundation::ids::ItemId,
    host::scene::{OrderStep, SceneHost},
};

/// Apply an order change: absolute sets the z-position, relative issues `|position|` unit steps
/// (up for positive, down for negative).
pub fn apply_order<H: SceneHost + ?Sized>(
    host: &mut H,
    item: ItemId,
    mode: OrderMode,
    position: i32,
) {
    match mode {
        OrderMode::Absolute => host.set_order_position(item, position),
        OrderMode::Relative => {
            let step = if position > 0 {
                OrderStep::Up
            } else {
                OrderStep::Down
            };
            for _ in 0..position.unsigned_abs() {
                host.move_order(item, step);
            }
        }
    }
}

/// Start-phase visibility: show and toggle make a hidden item visible.
///
/// Returns whether the item was made visible here.
pub fn show_at_start<H: SceneHost + ?Sized>(
    host: &mut H,
    item: ItemId,
    change: VisibilityChange,
) -> bool {
    let shows = matches!(change, VisibilityChange::Show | VisibilityChange::Toggle);
    if shows && !host.visible(item) {
        host.set_visible(item, true);
        true
    } else {
        false
    }
}

/// Whether a visibility action still needs the move to run, even without any transform change.
pub fn visibility_pending<H: SceneHost + ?Sized>(
    host: &H,
    item: ItemId,
    change: VisibilityChange,
    toggled: bool,
) -> bool {
    toggled
        || match change {
            VisibilityChange::Hide => host.visible(item),
            VisibilityChange::Toggle => true,
            VisibilityChange::None | VisibilityChange::Show => false,
        }
}

/// Completion-phase visibility: hide, or toggle that did not show at start, hide the item.
pub fn hide_at_end<H: SceneHost + ?Sized>(
    host: &mut H,
    item: ItemId,
    change: VisibilityChange,
    toggled: bool,
) {
    let hides = match change {
        VisibilityChange::Hide => true,
        VisibilityChange::Toggle => !toggled,
        VisibilityChange::None | VisibilityChange::Show => false,
    };
    if hides {
        host.set_visible(item, false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/effects.rs"]
mod tests;
