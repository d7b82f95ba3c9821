/// Per-instance run state shared by every move kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// A move is in progress.
    pub moving: bool,
    /// The next start travels back towards the original state.
    pub reverse: bool,
    /// Seconds since the current move started, delays included.
    pub running_duration: f32,
    /// Enabled flag observed on the previous tick.
    pub enabled_prev: bool,
    /// The current move made the item visible at start.
    pub visibility_toggled: bool,
}

impl AnimationState {
    /// Advance the clock and return the elapsed time in milliseconds.
    pub fn advance(&mut self, seconds: f32) -> f32 {
        self.running_duration += seconds;
        self.elapsed_ms()
    }

    /// Elapsed time of the current move in milliseconds.
    pub fn elapsed_ms(&self) -> f32 {
        self.running_duration * 1000.0
    }
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The move is now running.
    Started,
    /// Nothing would change; the move stays idle.
    Unchanged,
    /// No live target could be resolved.
    NoTarget,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not moving, or disabled.
    Idle,
    /// Held in the leading delay; nothing written.
    Waiting,
    /// Interpolated values written.
    Advanced,
    /// Final values written; the move just finished.
    Completed,
}

/// Which way the stored `from`/`to` pair currently points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Nothing captured yet.
    #[default]
    Unset,
    /// Captured by a forward start.
    Forward,
    /// Turned around by a reverse start.
    Reversed,
}
