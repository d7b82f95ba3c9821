use serde::{Deserialize, Serialize};

use crate::{
    config::model::{MoveSettings, ValueMoveSettings},
    foundation::error::{MoveError, MoveResult},
    host::{memory::MemoryHostDef, signals::SourceEvent},
};

const MAX_FPS: u32 = 1000;

fn default_fps() -> u32 {
    60
}

fn default_enabled() -> bool {
    true
}

/// A scripted run: a scene graph, the filters on it and the host actions to replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Initial scene graph.
    #[serde(default)]
    pub host: MemoryHostDef,
    /// Filters, registered in order.
    #[serde(default)]
    pub filters: Vec<FilterDef>,
    /// Host actions, applied on the first frame at or after their time.
    #[serde(default)]
    pub actions: Vec<TimedAction>,
    /// Ticks per second.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Length of the run.
    pub duration_ms: u64,
}

impl Scenario {
    /// Parse a scenario from JSON and validate it.
    pub fn from_json(json: &str) -> MoveResult<Self> {
        let scenario: Self = serde_json::from_str(json)
            .map_err(|e| MoveError::serde(format!("parse scenario JSON: {e}")))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the run parameters. Filter settings are validated when registered.
    pub fn validate(&self) -> MoveResult<()> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(MoveError::validation(format!(
                "fps must be in 1..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Number of ticks the run takes.
    pub fn frame_count(&self) -> u64 {
        (self.duration_ms * u64::from(self.fps)).div_ceil(1000)
    }
}

/// One filter of a [`Scenario`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDef {
    /// Filter name, unique per parent.
    pub name: String,
    /// Source (or scene) the filter is attached to.
    pub parent: String,
    /// Host enabled flag at load time.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Filter type and settings.
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// Type of a [`FilterDef`], tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterKind {
    /// Transform move.
    TransformMove {
        /// Settings.
        #[serde(default)]
        settings: MoveSettings,
    },
    /// Generic value move.
    ValueMove {
        /// Settings.
        #[serde(default)]
        settings: ValueMoveSettings,
    },
    /// Audio value move.
    AudioValueMove {
        /// Settings.
        #[serde(default)]
        settings: ValueMoveSettings,
    },
    /// Any other filter; visible to chains but never driven.
    Foreign {
        /// Host type identifier.
        kind_id: String,
    },
}

/// A host action at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedAction {
    /// Time of the action from the start of the run.
    #[serde(default)]
    pub at_ms: u64,
    /// What happens.
    #[serde(flatten)]
    pub action: Action,
}

/// Host action replayed by the simulator, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Press the manual start button of a filter.
    Start {
        /// Source the filter is attached to.
        parent: String,
        /// Filter name.
        filter: String,
    },
    /// Press the hotkey of a filter.
    Hotkey {
        /// Source the filter is attached to.
        parent: String,
        /// Filter name.
        filter: String,
    },
    /// Enable a filter.
    Enable {
        /// Source the filter is attached to.
        parent: String,
        /// Filter name.
        filter: String,
    },
    /// Disable a filter.
    Disable {
        /// Source the filter is attached to.
        parent: String,
        /// Filter name.
        filter: String,
    },
    /// Lifecycle event on the source filters are attached to.
    OwnerEvent {
        /// Source emitting the event.
        parent: String,
        /// Event.
        event: SourceEvent,
    },
    /// Lifecycle event on an animated source.
    TargetEvent {
        /// Source emitting the event.
        source: String,
        /// Event.
        event: SourceEvent,
    },
    /// Rename a source.
    Rename {
        /// Current name.
        old: String,
        /// New name.
        new: String,
    },
    /// Delete the item showing `source` from `scene`.
    RemoveItem {
        /// Scene holding the item.
        scene: String,
        /// Source the item shows.
        source: String,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/config/scenario.rs"]
mod tests;
