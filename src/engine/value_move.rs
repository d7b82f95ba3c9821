use tracing::{debug, trace};

use crate::{
    config::model::ValueMoveSettings,
    engine::{
        state::{AnimationState, Orientation, StartOutcome, StepOutcome},
        timeline::{self, Phase},
    },
    foundation::math::lerp_f64,
    host::scene::SceneHost,
};

/// Flavor of a value move; only the type identifier differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    /// Any numeric setting.
    #[default]
    Generic,
    /// A numeric setting of an audio source.
    Audio,
}

/// A value move: animates one numeric setting of a host object.
#[derive(Debug, Clone)]
pub struct ValueMove {
    /// Current settings.
    pub settings: ValueMoveSettings,
    /// Flavor.
    pub kind: ValueKind,
    /// Run state.
    pub state: AnimationState,
    /// Start of the current travel.
    pub from: f64,
    /// End of the current travel.
    pub to: f64,
    /// Direction the stored pair points in.
    pub orientation: Orientation,
    /// Hotkey hops already taken from this instance.
    pub hotkey_cursor: usize,
}

impl ValueMove {
    /// Idle move with the given settings.
    pub fn new(settings: ValueMoveSettings, kind: ValueKind) -> Self {
        Self {
            settings,
            kind,
            state: AnimationState::default(),
            from: 0.0,
            to: 0.0,
            orientation: Orientation::Unset,
            hotkey_cursor: 0,
        }
    }

    /// Object whose setting is animated: the configured source, or `owner` when none is set.
    pub fn object<'a>(&'a self, owner: &'a str) -> &'a str {
        if self.settings.source.is_empty() {
            owner
        } else {
            &self.settings.source
        }
    }

    /// Begin a move in the current direction.
    #[tracing::instrument(level = "debug", skip(self, host), fields(setting = %self.settings.setting, reverse = self.state.reverse))]
    pub fn start<H: SceneHost + ?Sized>(&mut self, host: &H, owner: &str) -> StartOutcome {
        let object = self.object(owner).to_owned();
        let Some(current) = host.setting_value(&object, &self.settings.setting) else {
            debug!(%object, "setting not found");
            return StartOutcome::NoTarget;
        };
        self.state.running_duration = 0.0;

        let value = self.settings.value;
        let relative = self.settings.relative;
        if !self.state.reverse || self.orientation == Orientation::Unset {
            self.from = current;
            self.to = match (relative, self.state.reverse) {
                (true, false) => current + value,
                (true, true) => current - value,
                (false, _) => value,
            };
            self.orientation = if self.state.reverse {
                Orientation::Reversed
            } else {
                Orientation::Forward
            };
        } else {
            if self.orientation == Orientation::Forward {
                if relative {
                    self.from = self.to;
                } else {
                    std::mem::swap(&mut self.from, &mut self.to);
                }
                self.orientation = Orientation::Reversed;
            }
            if relative {
                self.to = self.from - value;
            }
        }

        if self.from != self.to {
            self.state.moving = true;
            debug!(from = self.from, to = self.to, "value move started");
            StartOutcome::Started
        } else {
            StartOutcome::Unchanged
        }
    }

    /// Advance a running move by `seconds` and write the interpolated value.
    pub fn step<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        owner: &str,
        seconds: f32,
    ) -> StepOutcome {
        if !self.state.moving {
            return StepOutcome::Idle;
        }
        let timing = self.settings.timing;
        let object = self.object(owner).to_owned();
        if timing.duration_ms == 0
            || host
                .setting_value(&object, &self.settings.setting)
                .is_none()
        {
            self.state.moving = false;
            return StepOutcome::Idle;
        }

        let elapsed_ms = self.state.advance(seconds);
        let (t, done) = match timeline::phase(&timing, self.state.reverse, elapsed_ms) {
            Phase::PreDelay => {
                if !self.state.reverse {
                    if let Some(v) = host.setting_value(&object, &self.settings.setting) {
                        self.from = v;
                    }
                    if self.settings.relative {
                        self.to = self.from + self.settings.value;
                    }
                } else if self.settings.relative {
                    self.to = self.from - self.settings.value;
                }
                return StepOutcome::Waiting;
            }
            Phase::Active { t, done } => (t, done),
        };

        let progress = timeline::progress(timing.easing(), self.state.reverse, t);
        let value = lerp_f64(self.from, self.to, progress.eased);
        host.set_setting_value(&object, &self.settings.setting, value);
        trace!(elapsed_ms, value, "value advanced");

        if done {
            self.state.moving = false;
            debug!(setting = %self.settings.setting, "value move completed");
            StepOutcome::Completed
        } else {
            StepOutcome::Advanced
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/value_move.rs"]
mod tests;
