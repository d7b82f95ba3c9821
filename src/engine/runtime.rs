use tracing::debug;

use crate::{
    config::model::{MoveSettings, StartTrigger, ValueMoveSettings},
    engine::{
        chain::{self, CompletionPlan},
        props,
        registry::{FilterNode, FilterSlot, FilterTable},
        state::{AnimationState, StartOutcome, StepOutcome},
        transform_move::TransformMove,
        value_move::{ValueKind, ValueMove},
    },
    foundation::error::{MoveError, MoveResult},
    foundation::ids::{FilterId, ItemId},
    host::{
        scene::SceneHost,
        signals::{SignalHub, SourceEvent},
    },
};

/// Owns every move filter and drives them against a host.
///
/// All entry points take `&mut self`; the host serializes calls. Chained moves start
/// synchronously inside the tick that completes their predecessor.
#[derive(Debug)]
pub struct MoveRuntime<H: SceneHost> {
    host: H,
    filters: FilterTable,
    signals: SignalHub,
}

impl<H: SceneHost> MoveRuntime<H> {
    /// Runtime over `host` with no filters.
    pub fn new(host: H) -> Self {
        Self {
            host,
            filters: FilterTable::new(),
            signals: SignalHub::new(),
        }
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the host, e.g. to edit the scene between ticks.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Borrow the filter table.
    pub fn filters(&self) -> &FilterTable {
        &self.filters
    }

    /// Borrow the signal hub.
    pub fn signals(&self) -> &SignalHub {
        &self.signals
    }

    /// Register a transform move filter named `name` on the scene `parent`.
    pub fn create_transform_move(
        &mut self,
        name: &str,
        parent: &str,
        settings: MoveSettings,
    ) -> MoveResult<FilterId> {
        settings.validate()?;
        let source = settings.source.clone();
        let mut mv = TransformMove::new(settings);
        mv.resolve_target(&self.host, parent);
        let id = self.filters.insert(FilterSlot {
            name: name.to_owned(),
            parent: parent.to_owned(),
            enabled: true,
            node: FilterNode::TransformMove(Box::new(mv)),
        })?;
        if !source.is_empty() {
            self.signals.connect(&source, id);
        }
        self.signals.subscribe_rename(id);
        debug!(%id, name, parent, "transform move created");
        Ok(id)
    }

    /// Register a value move filter named `name` on the source `parent`.
    pub fn create_value_move(
        &mut self,
        name: &str,
        parent: &str,
        settings: ValueMoveSettings,
        kind: ValueKind,
    ) -> MoveResult<FilterId> {
        settings.validate()?;
        let id = self.filters.insert(FilterSlot {
            name: name.to_owned(),
            parent: parent.to_owned(),
            enabled: true,
            node: FilterNode::ValueMove(Box::new(ValueMove::new(settings, kind))),
        })?;
        self.signals.subscribe_rename(id);
        debug!(%id, name, parent, "value move created");
        Ok(id)
    }

    /// Register a filter this crate does not drive, so chains can see (and skip) it.
    pub fn add_foreign_filter(
        &mut self,
        name: &str,
        parent: &str,
        kind_id: &str,
    ) -> MoveResult<FilterId> {
        self.filters.insert(FilterSlot {
            name: name.to_owned(),
            parent: parent.to_owned(),
            enabled: true,
            node: FilterNode::Foreign {
                kind_id: kind_id.to_owned(),
            },
        })
    }

    /// Unregister a filter and drop its subscriptions.
    pub fn destroy(&mut self, id: FilterId) -> MoveResult<()> {
        self.filters.remove(id)?;
        self.signals.disconnect_all(id);
        debug!(%id, "filter destroyed");
        Ok(())
    }

    /// Replace the settings of a transform move.
    ///
    /// A changed source name moves the signal subscription and drops the held item.
    pub fn update(&mut self, id: FilterId, settings: MoveSettings) -> MoveResult<()> {
        settings.validate()?;
        let slot = self.filters.get_mut(id)?;
        let FilterNode::TransformMove(mv) = &mut slot.node else {
            return Err(MoveError::validation(format!(
                "{id} is not a transform move"
            )));
        };
        let old_source = std::mem::replace(&mut mv.settings, settings).source;
        let new_source = mv.settings.source.clone();
        if old_source != new_source {
            mv.forget_target();
            mv.resolve_target(&self.host, &slot.parent);
            self.signals.disconnect(&old_source, id);
            if !new_source.is_empty() {
                self.signals.connect(&new_source, id);
            }
        }
        Ok(())
    }

    /// Replace the settings of a value move.
    pub fn update_value(&mut self, id: FilterId, settings: ValueMoveSettings) -> MoveResult<()> {
        settings.validate()?;
        let slot = self.filters.get_mut(id)?;
        let FilterNode::ValueMove(mv) = &mut slot.node else {
            return Err(MoveError::validation(format!("{id} is not a value move")));
        };
        mv.settings = settings;
        Ok(())
    }

    /// Apply persisted settings: regenerate the summary text, then update.
    pub fn load(&mut self, id: FilterId, mut settings: MoveSettings) -> MoveResult<()> {
        settings.refresh_transform_text();
        self.update(id, settings)
    }

    /// Advance every filter by `seconds`, in registration order.
    pub fn tick(&mut self, seconds: f32) {
        for id in self.filters.ids() {
            if let Err(e) = self.tick_filter(id, seconds) {
                debug!(%id, error = %e, "tick skipped");
            }
        }
    }

    /// Advance one filter by `seconds`.
    pub fn tick_filter(&mut self, id: FilterId, seconds: f32) -> MoveResult<StepOutcome> {
        let slot = self.filters.get_mut(id)?;
        let enabled = slot.enabled;
        let Some(trigger) = slot.node.chain().map(|c| c.start_trigger) else {
            return Ok(StepOutcome::Idle);
        };
        let Some(state) = slot.node.state_mut() else {
            return Ok(StepOutcome::Idle);
        };
        let rising = enabled && !state.enabled_prev;
        state.enabled_prev = enabled;
        if rising && trigger.on_enable() {
            debug!(%id, "enabled");
            self.start_filter(id)?;
        }
        if !enabled {
            return Ok(StepOutcome::Idle);
        }

        let slot = self.filters.get_mut(id)?;
        let outcome = match &mut slot.node {
            FilterNode::TransformMove(mv) => mv.step(&mut self.host, seconds),
            FilterNode::ValueMove(mv) => mv.step(&mut self.host, &slot.parent, seconds),
            FilterNode::Foreign { .. } => StepOutcome::Idle,
        };
        if outcome == StepOutcome::Completed {
            self.complete(id)?;
        }
        Ok(outcome)
    }

    /// Start a filter unconditionally, as the manual start button does.
    pub fn start_manual(&mut self, id: FilterId) -> MoveResult<StartOutcome> {
        self.start_filter(id)
    }

    /// Hotkey of filter `id` pressed: start it or the next node of its hotkey chain.
    pub fn hotkey_pressed(&mut self, id: FilterId) -> MoveResult<StartOutcome> {
        let slot = self.filters.get_mut(id)?;
        let Some(cursor) = slot.node.hotkey_cursor_mut().map(|c| *c) else {
            return Err(MoveError::validation(format!("{id} has no hotkey")));
        };
        let plan = chain::plan_hotkey(&self.filters, id, cursor);
        if let Some(c) = self.filters.get_mut(id)?.node.hotkey_cursor_mut() {
            *c = plan.cursor;
        }
        debug!(%id, start = %plan.start, cursor = plan.cursor, "hotkey");
        self.start_filter(plan.start)
    }

    /// Lifecycle event on the source filter `id` is attached to.
    pub fn owner_event(&mut self, id: FilterId, event: SourceEvent) -> MoveResult<()> {
        let trigger = self.trigger(id)?;
        if trigger.matches_owner(event) {
            self.start_filter(id)?;
        }
        Ok(())
    }

    /// Lifecycle event on `parent`, delivered to every filter attached to it.
    pub fn parent_event(&mut self, parent: &str, event: SourceEvent) {
        let ids: Vec<_> = self
            .filters
            .attached_to(parent)
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            if let Err(e) = self.owner_event(id, event) {
                debug!(%id, error = %e, "owner event skipped");
            }
        }
    }

    /// Lifecycle event on `source`, delivered to the filters animating it.
    pub fn source_event(&mut self, source: &str, event: SourceEvent) {
        for id in self.signals.subscribers(source) {
            let matches = self
                .trigger(id)
                .map(|t| t.matches_target(event))
                .unwrap_or(false);
            if matches && let Err(e) = self.start_filter(id) {
                debug!(%id, error = %e, "source event skipped");
            }
        }
    }

    /// A source was renamed: follow it in subscriptions, parents and settings.
    pub fn source_renamed(&mut self, old: &str, new: &str) {
        self.signals.rename_source(old, new);
        for (_, slot) in self.filters.iter_mut() {
            if slot.parent == old {
                slot.parent = new.to_owned();
            }
        }
        for id in self.signals.rename_subscribers().to_vec() {
            let Ok(slot) = self.filters.get_mut(id) else {
                continue;
            };
            let source = match &mut slot.node {
                FilterNode::TransformMove(mv) => &mut mv.settings.source,
                FilterNode::ValueMove(mv) => &mut mv.settings.source,
                FilterNode::Foreign { .. } => continue,
            };
            if !source.is_empty() && source.as_str() == old {
                *source = new.to_owned();
                debug!(%id, old, new, "source renamed");
            }
        }
    }

    /// A scene item was removed: drop every reference to it and stop its moves.
    pub fn item_removed(&mut self, item: ItemId) {
        for (id, slot) in self.filters.iter_mut() {
            if let FilterNode::TransformMove(mv) = &mut slot.node
                && mv.item == Some(item)
            {
                mv.forget_target();
                mv.state.moving = false;
                debug!(%id, %item, "target removed");
            }
        }
    }

    /// Set the host enabled flag; the next tick reacts to the edge.
    pub fn set_enabled(&mut self, id: FilterId, enabled: bool) -> MoveResult<()> {
        self.filters.get_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Host enabled flag.
    pub fn is_enabled(&self, id: FilterId) -> MoveResult<bool> {
        Ok(self.filters.get(id)?.enabled)
    }

    /// Run state of a move filter.
    pub fn state(&self, id: FilterId) -> MoveResult<AnimationState> {
        self.filters
            .get(id)?
            .node
            .state()
            .copied()
            .ok_or_else(|| MoveError::validation(format!("{id} is not a move filter")))
    }

    /// Borrow a transform move.
    pub fn transform_move(&self, id: FilterId) -> MoveResult<&TransformMove> {
        match &self.filters.get(id)?.node {
            FilterNode::TransformMove(mv) => Ok(&**mv),
            _ => Err(MoveError::validation(format!(
                "{id} is not a transform move"
            ))),
        }
    }

    /// Borrow a value move.
    pub fn value_move(&self, id: FilterId) -> MoveResult<&ValueMove> {
        match &self.filters.get(id)?.node {
            FilterNode::ValueMove(mv) => Ok(&**mv),
            _ => Err(MoveError::validation(format!("{id} is not a value move"))),
        }
    }

    /// Summary text edited: see [`props::transform_text_changed`].
    pub fn transform_text_changed(&mut self, id: FilterId, text: &str) -> MoveResult<bool> {
        let mv = self.transform_move_mut(id)?;
        Ok(props::transform_text_changed(mv, text))
    }

    /// "Get transform" pressed: see [`props::capture_transform`].
    pub fn capture_transform(&mut self, id: FilterId) -> MoveResult<bool> {
        let slot = self.filters.get_mut(id)?;
        let FilterNode::TransformMove(mv) = &mut slot.node else {
            return Err(MoveError::validation(format!(
                "{id} is not a transform move"
            )));
        };
        Ok(props::capture_transform(mv, &self.host, &slot.parent))
    }

    /// Relative flag toggled: see [`props::relative_changed`].
    pub fn relative_changed(&mut self, id: FilterId, relative: bool) -> MoveResult<bool> {
        let slot = self.filters.get_mut(id)?;
        let FilterNode::TransformMove(mv) = &mut slot.node else {
            return Err(MoveError::validation(format!(
                "{id} is not a transform move"
            )));
        };
        Ok(props::relative_changed(mv, &self.host, &slot.parent, relative))
    }

    /// Names offered for `next_move`: see [`props::next_move_candidates`].
    pub fn next_move_candidates(&self, id: FilterId) -> MoveResult<Vec<String>> {
        self.filters.get(id)?;
        Ok(props::next_move_candidates(&self.filters, id))
    }

    fn transform_move_mut(&mut self, id: FilterId) -> MoveResult<&mut TransformMove> {
        match &mut self.filters.get_mut(id)?.node {
            FilterNode::TransformMove(mv) => Ok(&mut **mv),
            _ => Err(MoveError::validation(format!(
                "{id} is not a transform move"
            ))),
        }
    }

    fn trigger(&self, id: FilterId) -> MoveResult<StartTrigger> {
        self.filters
            .get(id)?
            .node
            .chain()
            .map(|c| c.start_trigger)
            .ok_or_else(|| MoveError::validation(format!("{id} is not a move filter")))
    }

    fn start_filter(&mut self, id: FilterId) -> MoveResult<StartOutcome> {
        let slot = self.filters.get_mut(id)?;
        let outcome = match &mut slot.node {
            FilterNode::TransformMove(mv) => mv.start(&mut self.host, &slot.parent),
            FilterNode::ValueMove(mv) => mv.start(&self.host, &slot.parent),
            FilterNode::Foreign { .. } => {
                return Err(MoveError::validation(format!(
                    "{id} is not a move filter"
                )));
            }
        };
        let disables = slot
            .node
            .chain()
            .is_some_and(|c| c.start_trigger == StartTrigger::EnableDisable);
        if outcome == StartOutcome::Unchanged && disables {
            slot.enabled = false;
            debug!(%id, "nothing to do, disabling");
        }
        Ok(outcome)
    }

    fn complete(&mut self, id: FilterId) -> MoveResult<()> {
        let slot = self.filters.get_mut(id)?;
        let (trigger, next_is_reverse) = match slot.node.chain() {
            Some(c) => (c.start_trigger, c.next_is_reverse()),
            None => return Ok(()),
        };
        let reverse = slot.node.state().is_some_and(|s| s.reverse);
        let enable_disable = trigger == StartTrigger::EnableDisable;
        if enable_disable && (reverse || !next_is_reverse) {
            slot.enabled = false;
            debug!(%id, "completed, disabling");
        }

        match chain::plan_completion(&self.filters, id) {
            CompletionPlan::Nothing => {}
            CompletionPlan::Reverse => {
                let now_reverse = self.flip_direction(id)?;
                if now_reverse {
                    self.start_filter(id)?;
                }
            }
            CompletionPlan::FlipDirection => {
                self.flip_direction(id)?;
            }
            CompletionPlan::Start(next) => {
                if enable_disable {
                    let next_slot = self.filters.get_mut(next.id)?;
                    if !next_slot.enabled {
                        next_slot.enabled = true;
                        // The start below covers this edge.
                        if let Some(state) = next_slot.node.state_mut() {
                            state.enabled_prev = true;
                        }
                    }
                }
                self.start_filter(next.id)?;
            }
        }
        Ok(())
    }

    fn flip_direction(&mut self, id: FilterId) -> MoveResult<bool> {
        let state = self
            .filters
            .get_mut(id)?
            .node
            .state_mut()
            .ok_or_else(|| MoveError::validation(format!("{id} is not a move filter")))?;
        state.reverse = !state.reverse;
        Ok(state.reverse)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runtime.rs"]
mod tests;
