use tracing::{debug, trace};

use crate::{
    animation::snapshot::{Progress, TransformSnapshot},
    config::model::MoveSettings,
    engine::{
        effects,
        state::{AnimationState, Orientation, StartOutcome, StepOutcome},
        timeline::{self, Phase},
    },
    foundation::core::Canvas,
    foundation::ids::ItemId,
    host::scene::SceneHost,
};

/// A transform move: animates one scene item of the owning scene.
#[derive(Debug, Clone)]
pub struct TransformMove {
    /// Current settings.
    pub settings: MoveSettings,
    /// Run state.
    pub state: AnimationState,
    /// Resolved target item; re-resolved by name when absent.
    pub item: Option<ItemId>,
    /// Start of the current travel.
    pub from: TransformSnapshot,
    /// End of the current travel.
    pub to: TransformSnapshot,
    /// Canvas captured with `from`.
    pub canvas: Canvas,
    /// Direction the stored pair points in.
    pub orientation: Orientation,
    /// Hotkey hops already taken from this instance.
    pub hotkey_cursor: usize,
}

impl TransformMove {
    /// Idle move with the given settings.
    pub fn new(settings: MoveSettings) -> Self {
        Self {
            settings,
            state: AnimationState::default(),
            item: None,
            from: TransformSnapshot::default(),
            to: TransformSnapshot::default(),
            canvas: Canvas::default(),
            orientation: Orientation::Unset,
            hotkey_cursor: 0,
        }
    }

    /// Validate the held item, or look it up by name in `scene`.
    pub fn resolve_target<H: SceneHost + ?Sized>(
        &mut self,
        host: &H,
        scene: &str,
    ) -> Option<ItemId> {
        if let Some(item) = self.item {
            if host.item_alive(item) {
                return Some(item);
            }
            self.item = None;
        }
        if self.settings.source.is_empty() {
            return None;
        }
        self.item = host.find_item(scene, &self.settings.source);
        self.item
    }

    /// Drop the held item without touching the run state.
    pub fn forget_target(&mut self) {
        self.item = None;
    }

    /// Begin a move in the current direction.
    #[tracing::instrument(level = "debug", skip(self, host), fields(source = %self.settings.source, reverse = self.state.reverse))]
    pub fn start<H: SceneHost + ?Sized>(&mut self, host: &mut H, scene: &str) -> StartOutcome {
        let Some(item) = self.resolve_target(&*host, scene) else {
            debug!("no target item");
            return StartOutcome::NoTarget;
        };

        if let Some(mode) = self.settings.change_order.at_start() {
            effects::apply_order(host, item, mode, self.settings.order_position);
        }
        self.state.visibility_toggled =
            effects::show_at_start(host, item, self.settings.change_visibility);
        self.state.running_duration = 0.0;

        if !self.capture_pair(&*host, item) {
            return StartOutcome::NoTarget;
        }

        let pending = effects::visibility_pending(
            &*host,
            item,
            self.settings.change_visibility,
            self.state.visibility_toggled,
        );
        if self.from.differs(&self.to) || pending {
            self.state.moving = true;
            debug!(from = ?self.from.position, to = ?self.to.position, "move started");
            StartOutcome::Started
        } else {
            debug!("already at target");
            StartOutcome::Unchanged
        }
    }

    fn capture_pair<H: SceneHost + ?Sized>(&mut self, host: &H, item: ItemId) -> bool {
        let delta = self.settings.target;
        let relative = self.settings.relative;

        if !self.state.reverse || self.orientation == Orientation::Unset {
            let Some(live) = host.transform(item) else {
                return false;
            };
            self.from = live;
            self.canvas = host.canvas();
            if self.state.reverse {
                self.to = if relative {
                    live.offset(&delta, -1.0)
                } else {
                    delta
                };
                self.orientation = Orientation::Reversed;
            } else {
                self.to = if relative {
                    live.offset(&delta, 1.0)
                } else {
                    delta
                };
                self.orientation = Orientation::Forward;
            }
            return true;
        }

        if self.orientation == Orientation::Forward {
            if relative {
                self.from = self.to;
            } else {
                std::mem::swap(&mut self.from, &mut self.to);
            }
            self.orientation = Orientation::Reversed;
        }
        if relative {
            self.to = self.from.offset(&delta, -1.0);
        }
        true
    }

    /// Advance a running move by `seconds` and write the interpolated transform.
    ///
    /// On the completion tick the end-phase visibility and order changes are applied as well.
    pub fn step<H: SceneHost + ?Sized>(&mut self, host: &mut H, seconds: f32) -> StepOutcome {
        if !self.state.moving {
            return StepOutcome::Idle;
        }
        let Some(item) = self.item.filter(|&i| host.item_alive(i)) else {
            debug!(source = %self.settings.source, "target vanished, stopping");
            self.item = None;
            self.state.moving = false;
            return StepOutcome::Idle;
        };
        let timing = self.settings.timing;
        if timing.duration_ms == 0 {
            self.state.moving = false;
            return StepOutcome::Idle;
        }

        let elapsed_ms = self.state.advance(seconds);
        let (t, done) = match timeline::phase(&timing, self.state.reverse, elapsed_ms) {
            Phase::PreDelay => {
                self.hold(&*host, item);
                trace!(elapsed_ms, "waiting");
                return StepOutcome::Waiting;
            }
            Phase::Active { t, done } => (t, done),
        };

        let progress = timeline::progress(timing.easing(), self.state.reverse, t);
        self.write(host, item, progress);
        trace!(elapsed_ms, t, eased = progress.eased, "advanced");

        if !done {
            return StepOutcome::Advanced;
        }
        self.state.moving = false;
        effects::hide_at_end(
            host,
            item,
            self.settings.change_visibility,
            self.state.visibility_toggled,
        );
        if let Some(mode) = self.settings.change_order.at_end() {
            effects::apply_order(host, item, mode, self.settings.order_position);
        }
        debug!(source = %self.settings.source, reverse = self.state.reverse, "move completed");
        StepOutcome::Completed
    }

    /// Leading delay: a forward move keeps following the live item.
    fn hold<H: SceneHost + ?Sized>(&mut self, host: &H, item: ItemId) {
        let delta = self.settings.target;
        if !self.state.reverse {
            if let Some(live) = host.transform(item) {
                self.from = live;
            }
            if self.settings.relative {
                self.to = self.from.offset(&delta, 1.0);
            }
        } else if self.settings.relative {
            self.to = self.from.offset(&delta, -1.0);
        }
    }

    fn write<H: SceneHost + ?Sized>(&self, host: &mut H, item: ItemId, progress: Progress) {
        let snapshot = TransformSnapshot::interpolate(
            &self.from,
            &self.to,
            progress,
            self.settings.curve,
            self.canvas,
        );
        host.defer_update_begin(item);
        host.write_transform(item, &snapshot);
        host.defer_update_end(item);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/transform_move.rs"]
mod tests;
