use serde::Serialize;
use tracing::debug;

use crate::{
    animation::snapshot::TransformSnapshot,
    config::scenario::{Action, FilterKind, Scenario, TimedAction},
    engine::{runtime::MoveRuntime, value_move::ValueKind},
    foundation::error::{MoveError, MoveResult},
    foundation::ids::FilterId,
    host::{memory::MemoryHost, scene::SceneHost},
};

/// State of one scene item after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFrame {
    /// Scene holding the item.
    pub scene: String,
    /// Source the item shows.
    pub source: String,
    /// Visibility.
    pub visible: bool,
    /// Published transform.
    pub transform: TransformSnapshot,
}

/// Every item of the host after one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Frame number, from 0.
    pub index: u64,
    /// Time at which the frame's actions were applied.
    pub time_ms: u64,
    /// Items by scene name, bottom to top.
    pub items: Vec<ItemFrame>,
}

/// A scenario being replayed.
#[derive(Debug)]
pub struct Simulation {
    runtime: MoveRuntime<MemoryHost>,
    actions: Vec<TimedAction>,
    next_action: usize,
    fps: u32,
    frames: u64,
    index: u64,
}

impl Simulation {
    /// Build the host and register every filter of `scenario`.
    pub fn new(scenario: &Scenario) -> MoveResult<Self> {
        scenario.validate()?;
        let mut runtime = MoveRuntime::new(MemoryHost::from_def(&scenario.host)?);
        for def in &scenario.filters {
            let (name, parent) = (def.name.as_str(), def.parent.as_str());
            let id = match &def.kind {
                FilterKind::TransformMove { settings } => {
                    runtime.create_transform_move(name, parent, settings.clone())?
                }
                FilterKind::ValueMove { settings } => {
                    runtime.create_value_move(name, parent, settings.clone(), ValueKind::Generic)?
                }
                FilterKind::AudioValueMove { settings } => {
                    runtime.create_value_move(name, parent, settings.clone(), ValueKind::Audio)?
                }
                FilterKind::Foreign { kind_id } => {
                    runtime.add_foreign_filter(name, parent, kind_id)?
                }
            };
            runtime.set_enabled(id, def.enabled)?;
        }

        let mut actions = scenario.actions.clone();
        actions.sort_by_key(|a| a.at_ms);
        Ok(Self {
            runtime,
            actions,
            next_action: 0,
            fps: scenario.fps,
            frames: scenario.frame_count(),
            index: 0,
        })
    }

    /// Borrow the runtime.
    pub fn runtime(&self) -> &MoveRuntime<MemoryHost> {
        &self.runtime
    }

    /// Apply the actions due at the next frame, tick once and report the items.
    ///
    /// Returns `None` once the scenario's duration has been played.
    pub fn step(&mut self) -> MoveResult<Option<Frame>> {
        if self.index >= self.frames {
            return Ok(None);
        }
        let time_ms = self.index * 1000 / u64::from(self.fps);
        while let Some(due) = self
            .actions
            .get(self.next_action)
            .filter(|a| a.at_ms <= time_ms)
        {
            let action = due.action.clone();
            self.next_action += 1;
            self.apply(&action)?;
        }

        self.runtime.tick(1.0 / self.fps as f32);
        let frame = Frame {
            index: self.index,
            time_ms,
            items: self.items(),
        };
        self.index += 1;
        Ok(Some(frame))
    }

    /// Play the remaining frames.
    pub fn run(mut self) -> MoveResult<Vec<Frame>> {
        let mut frames = Vec::new();
        while let Some(frame) = self.step()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    fn filter(&self, parent: &str, name: &str) -> MoveResult<FilterId> {
        self.runtime
            .filters()
            .find(parent, name)
            .ok_or_else(|| MoveError::validation(format!("no filter '{name}' on '{parent}'")))
    }

    fn apply(&mut self, action: &Action) -> MoveResult<()> {
        debug!(?action, frame = self.index, "action");
        match action {
            Action::Start { parent, filter } => {
                let id = self.filter(parent, filter)?;
                self.runtime.start_manual(id)?;
            }
            Action::Hotkey { parent, filter } => {
                let id = self.filter(parent, filter)?;
                self.runtime.hotkey_pressed(id)?;
            }
            Action::Enable { parent, filter } => {
                let id = self.filter(parent, filter)?;
                self.runtime.set_enabled(id, true)?;
            }
            Action::Disable { parent, filter } => {
                let id = self.filter(parent, filter)?;
                self.runtime.set_enabled(id, false)?;
            }
            Action::OwnerEvent { parent, event } => self.runtime.parent_event(parent, *event),
            Action::TargetEvent { source, event } => self.runtime.source_event(source, *event),
            Action::Rename { old, new } => {
                self.runtime.host_mut().rename_source(old, new);
                self.runtime.source_renamed(old, new);
            }
            Action::RemoveItem { scene, source } => {
                let item = self.runtime.host().find_item(scene, source).ok_or_else(|| {
                    MoveError::validation(format!("no item '{source}' in '{scene}'"))
                })?;
                self.runtime.host_mut().remove_item(item);
                self.runtime.item_removed(item);
            }
        }
        Ok(())
    }

    fn items(&self) -> Vec<ItemFrame> {
        let host = self.runtime.host();
        let mut out = Vec::new();
        for scene in host.scene_names() {
            for item in host.items(&scene) {
                let (Some(source), Some(transform)) =
                    (host.item_source_name(item), host.transform(item))
                else {
                    continue;
                };
                out.push(ItemFrame {
                    scene: scene.clone(),
                    source,
                    visible: host.visible(item),
                    transform,
                });
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/runner.rs"]
mod tests;
