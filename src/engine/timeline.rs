use crate::{
    animation::{ease::Easing, snapshot::Progress},
    config::model::MoveTiming,
    foundation::math::clamp01,
};

/// Where a running move is on its timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Inside the leading delay.
    PreDelay,
    /// Travelling; `t` is the normalized travel time, `done` marks the final tick.
    Active {
        /// Normalized travel time, clamped to `<= 1`.
        t: f32,
        /// The whole timeline, trailing delay included, has elapsed.
        done: bool,
    },
}

/// Phase at `elapsed_ms` for a move travelling in the given direction.
///
/// The leading delay is the start delay going forward and the end delay going back. `duration_ms`
/// must be non-zero.
pub fn phase(timing: &MoveTiming, reverse: bool, elapsed_ms: f32) -> Phase {
    let lead = timing.lead_delay_ms(reverse) as f32;
    if elapsed_ms < lead {
        return Phase::PreDelay;
    }
    let t = ((elapsed_ms - lead) / timing.duration_ms as f32).min(1.0);
    Phase::Active {
        t,
        done: elapsed_ms >= timing.total_ms() as f32,
    }
}

/// Interpolation parameters for normalized travel time `t`.
///
/// The stored pair always points in the direction of travel, so a reverse move samples the
/// easing curve mirrored: `1 - ease(1 - t)`. Crop follows `t` itself.
pub fn progress(easing: Easing, reverse: bool, t: f32) -> Progress {
    let eased = if reverse {
        1.0 - easing.apply(1.0 - t)
    } else {
        easing.apply(t)
    };
    Progress {
        eased,
        linear: clamp01(t),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/timeline.rs"]
mod tests;
