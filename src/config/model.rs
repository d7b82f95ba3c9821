use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        ease::{EaseFunction, EaseMode, Easing},
        snapshot::TransformSnapshot,
        summary::{format_summary, parse_summary},
    },
    foundation::error::{MoveError, MoveResult},
    host::signals::SourceEvent,
};

/// `next_move` value that reverses the current move instead of naming another filter.
pub const NEXT_MOVE_REVERSE: &str = "Reverse";

/// Largest accepted `|order_position|`.
pub const MAX_ORDER_POSITION: i32 = 1000;

const DEFAULT_DURATION_MS: u64 = 300;

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_target() -> TransformSnapshot {
    TransformSnapshot::identity()
}

/// Timeline shared by every move kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveTiming {
    /// Travel time, excluding delays.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Wait before a forward move starts travelling.
    #[serde(default)]
    pub start_delay_ms: u64,
    /// Wait after a forward move; a reverse move waits this long before travelling.
    #[serde(default)]
    pub end_delay_ms: u64,
    /// Easing mode.
    #[serde(default)]
    pub easing: EaseMode,
    /// Easing curve family.
    #[serde(default)]
    pub easing_function: EaseFunction,
}

impl Default for MoveTiming {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            start_delay_ms: 0,
            end_delay_ms: 0,
            easing: EaseMode::default(),
            easing_function: EaseFunction::default(),
        }
    }
}

impl MoveTiming {
    /// Easing mode and function as one value.
    pub fn easing(&self) -> Easing {
        Easing::new(self.easing, self.easing_function)
    }

    /// Delay in front of the travel for the given direction, in milliseconds.
    pub fn lead_delay_ms(&self, reverse: bool) -> u64 {
        if reverse {
            self.end_delay_ms
        } else {
            self.start_delay_ms
        }
    }

    /// Full timeline length: both delays plus the travel.
    pub fn total_ms(&self) -> u64 {
        self.start_delay_ms
            .saturating_add(self.duration_ms)
            .saturating_add(self.end_delay_ms)
    }
}

/// What starts a move and what follows it. Shared by every move kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSettings {
    /// Event that starts the move.
    #[serde(default)]
    pub start_trigger: StartTrigger,
    /// Move filter to start next, [`NEXT_MOVE_REVERSE`], or empty.
    #[serde(default)]
    pub next_move: String,
    /// Whether `next_move` follows on completion or on the next hotkey press.
    #[serde(default)]
    pub next_move_on: NextMoveOn,
}

impl ChainSettings {
    /// Whether `next_move` names the reverse sentinel.
    pub fn next_is_reverse(&self) -> bool {
        self.next_move == NEXT_MOVE_REVERSE
    }
}

/// Settings of a transform move filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSettings {
    /// Name of the scene item's source to animate.
    #[serde(default)]
    pub source: String,
    /// Timeline and easing.
    #[serde(flatten)]
    pub timing: MoveTiming,
    /// Bezier curvature of the position path; `0` is a straight line.
    #[serde(default)]
    pub curve: f32,
    /// Treat `target` as a delta from the captured state.
    #[serde(default)]
    pub relative: bool,
    /// Absolute target, or the delta when `relative` is set.
    #[serde(default = "default_target")]
    pub target: TransformSnapshot,
    /// Visibility action around the move.
    #[serde(default)]
    pub change_visibility: VisibilityChange,
    /// Ordering action around the move.
    #[serde(default)]
    pub change_order: OrderChange,
    /// Z-position (absolute) or number of unit steps (relative).
    #[serde(default)]
    pub order_position: i32,
    /// Trigger and chaining.
    #[serde(flatten)]
    pub chain: ChainSettings,
    /// Human-editable rendering of `target`, kept in sync with it.
    #[serde(default)]
    pub transform_text: String,
}

impl Default for MoveSettings {
    fn default() -> Self {
        let target = default_target();
        Self {
            source: String::new(),
            timing: MoveTiming::default(),
            curve: 0.0,
            relative: false,
            transform_text: format_summary(&target),
            target,
            change_visibility: VisibilityChange::default(),
            change_order: OrderChange::default(),
            order_position: 0,
            chain: ChainSettings::default(),
        }
    }
}

impl MoveSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> MoveResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| MoveError::serde(format!("parse move settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> MoveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MoveError::serde(format!("serialize move settings: {e}")))
    }

    /// Reject values the engine cannot animate with.
    pub fn validate(&self) -> MoveResult<()> {
        if !self.curve.is_finite() {
            return Err(MoveError::validation("curve must be finite"));
        }
        validate_snapshot(&self.target)?;
        if self.order_position.abs() > MAX_ORDER_POSITION {
            return Err(MoveError::validation(format!(
                "order_position must be within +/-{MAX_ORDER_POSITION}, got {}",
                self.order_position
            )));
        }
        Ok(())
    }

    /// Take `target` from `transform_text`.
    ///
    /// Returns `true` when the text did not parse and was regenerated from `target`, so the
    /// caller knows the visible text changed.
    pub fn apply_transform_text(&mut self) -> bool {
        match parse_summary(&self.transform_text) {
            Ok(parsed) => {
                self.target = parsed;
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "transform text rejected, regenerating");
                self.refresh_transform_text();
                true
            }
        }
    }

    /// Regenerate `transform_text` from `target`.
    pub fn refresh_transform_text(&mut self) {
        self.transform_text = format_summary(&self.target);
    }
}

fn validate_snapshot(s: &TransformSnapshot) -> MoveResult<()> {
    let fields = [
        ("position.x", s.position.x),
        ("position.y", s.position.y),
        ("rotation", s.rotation),
        ("scale.x", s.scale.x),
        ("scale.y", s.scale.y),
        ("bounds.x", s.bounds.x),
        ("bounds.y", s.bounds.y),
    ];
    for (name, v) in fields {
        if !v.is_finite() {
            return Err(MoveError::validation(format!(
                "target {name} must be finite, got {v}"
            )));
        }
    }
    Ok(())
}

/// Settings of a value move filter: animates one numeric setting of a host object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMoveSettings {
    /// Object whose setting is animated; empty means the filter's parent.
    #[serde(default)]
    pub source: String,
    /// Key of the numeric setting.
    #[serde(default)]
    pub setting: String,
    /// Target value, or the delta when `relative` is set.
    #[serde(default)]
    pub value: f64,
    /// Treat `value` as a delta from the captured value.
    #[serde(default)]
    pub relative: bool,
    /// Timeline and easing.
    #[serde(flatten)]
    pub timing: MoveTiming,
    /// Trigger and chaining.
    #[serde(flatten)]
    pub chain: ChainSettings,
}

impl Default for ValueMoveSettings {
    fn default() -> Self {
        Self {
            source: String::new(),
            setting: String::new(),
            value: 0.0,
            relative: false,
            timing: MoveTiming::default(),
            chain: ChainSettings::default(),
        }
    }
}

impl ValueMoveSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> MoveResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| MoveError::serde(format!("parse value move settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the engine cannot animate with.
    pub fn validate(&self) -> MoveResult<()> {
        if !self.value.is_finite() {
            return Err(MoveError::validation(format!(
                "value must be finite, got {}",
                self.value
            )));
        }
        Ok(())
    }
}

/// Visibility action around a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityChange {
    /// Leave visibility alone.
    #[default]
    None,
    /// Make the item visible when the move starts.
    Show,
    /// Hide the item when the move completes.
    Hide,
    /// Show at start if hidden, otherwise hide at completion.
    Toggle,
}

/// Ordering action around a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderChange {
    /// Leave ordering alone.
    #[default]
    None,
    /// Set the z-position when the move starts.
    StartAbsolute,
    /// Step up/down when the move starts.
    StartRelative,
    /// Set the z-position when the move completes.
    EndAbsolute,
    /// Step up/down when the move completes.
    EndRelative,
}

/// How an order change is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// Set the z-position directly.
    Absolute,
    /// Issue unit up/down moves.
    Relative,
}

impl OrderChange {
    /// Order action to apply when the move starts, if any.
    pub fn at_start(self) -> Option<OrderMode> {
        match self {
            Self::StartAbsolute => Some(OrderMode::Absolute),
            Self::StartRelative => Some(OrderMode::Relative),
            _ => None,
        }
    }

    /// Order action to apply when the move completes, if any.
    pub fn at_end(self) -> Option<OrderMode> {
        match self {
            Self::EndAbsolute => Some(OrderMode::Absolute),
            Self::EndRelative => Some(OrderMode::Relative),
            _ => None,
        }
    }
}

/// Event that starts a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartTrigger {
    /// Only chains and hotkeys start the move.
    #[default]
    None,
    /// Only the manual start button (and chains/hotkeys).
    Manual,
    /// The owning source becomes active.
    Activate,
    /// The owning source stops being active.
    Deactivate,
    /// The owning source is shown.
    Show,
    /// The owning source is hidden.
    Hide,
    /// The filter is enabled.
    Enable,
    /// The filter is enabled, and disables itself once done.
    EnableDisable,
    /// The animated item's source becomes active.
    SourceActivate,
    /// The animated item's source stops being active.
    SourceDeactivate,
    /// The animated item's source is shown.
    SourceShow,
    /// The animated item's source is hidden.
    SourceHide,
}

impl StartTrigger {
    /// Whether an event on the filter's owning source starts the move.
    pub fn matches_owner(self, event: SourceEvent) -> bool {
        matches!(
            (self, event),
            (Self::Activate, SourceEvent::Activate)
                | (Self::Deactivate, SourceEvent::Deactivate)
                | (Self::Show, SourceEvent::Show)
                | (Self::Hide, SourceEvent::Hide)
        )
    }

    /// Whether an event on the animated item's source starts the move.
    pub fn matches_target(self, event: SourceEvent) -> bool {
        matches!(
            (self, event),
            (Self::SourceActivate, SourceEvent::Activate)
                | (Self::SourceDeactivate, SourceEvent::Deactivate)
                | (Self::SourceShow, SourceEvent::Show)
                | (Self::SourceHide, SourceEvent::Hide)
        )
    }

    /// Whether the enabled rising edge starts the move.
    pub fn on_enable(self) -> bool {
        matches!(self, Self::Enable | Self::EnableDisable)
    }
}

/// When `next_move` follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextMoveOn {
    /// As soon as this move completes.
    #[default]
    End,
    /// On the next hotkey press.
    Hotkey,
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
