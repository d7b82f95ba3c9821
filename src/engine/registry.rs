use crate::{
    config::model::ChainSettings,
    engine::{
        chain::{ChainGraph, ChainLink, NodeKind},
        state::AnimationState,
        transform_move::TransformMove,
        value_move::{ValueKind, ValueMove},
    },
    foundation::error::{MoveError, MoveResult},
    foundation::ids::FilterId,
};

/// Type identifier of transform move filters.
pub const MOVE_SOURCE_FILTER_ID: &str = "move_source_filter";
/// Type identifier of generic value move filters.
pub const MOVE_VALUE_FILTER_ID: &str = "move_value_filter";
/// Type identifier of audio value move filters.
pub const MOVE_AUDIO_VALUE_FILTER_ID: &str = "move_audio_value_filter";

/// Behavior behind a filter slot.
#[derive(Debug, Clone)]
pub enum FilterNode {
    /// Animates a scene item's transform.
    TransformMove(Box<TransformMove>),
    /// Animates a numeric setting.
    ValueMove(Box<ValueMove>),
    /// A filter this crate does not drive; only its name and type are known.
    Foreign {
        /// Host type identifier.
        kind_id: String,
    },
}

impl FilterNode {
    /// Host type identifier.
    pub fn kind_id(&self) -> &str {
        match self {
            Self::TransformMove(_) => MOVE_SOURCE_FILTER_ID,
            Self::ValueMove(v) => match v.kind {
                ValueKind::Generic => MOVE_VALUE_FILTER_ID,
                ValueKind::Audio => MOVE_AUDIO_VALUE_FILTER_ID,
            },
            Self::Foreign { kind_id } => kind_id.as_str(),
        }
    }

    /// Chaining kind.
    pub fn node_kind(&self) -> NodeKind {
        match self {
            Self::TransformMove(_) => NodeKind::TransformMove,
            Self::ValueMove(_) => NodeKind::ValueMove,
            Self::Foreign { .. } => NodeKind::Foreign,
        }
    }

    /// Trigger and chaining settings of a move node.
    pub fn chain(&self) -> Option<&ChainSettings> {
        match self {
            Self::TransformMove(m) => Some(&m.settings.chain),
            Self::ValueMove(v) => Some(&v.settings.chain),
            Self::Foreign { .. } => None,
        }
    }

    /// Run state of a move node.
    pub fn state(&self) -> Option<&AnimationState> {
        match self {
            Self::TransformMove(m) => Some(&m.state),
            Self::ValueMove(v) => Some(&v.state),
            Self::Foreign { .. } => None,
        }
    }

    /// Mutable run state of a move node.
    pub fn state_mut(&mut self) -> Option<&mut AnimationState> {
        match self {
            Self::TransformMove(m) => Some(&mut m.state),
            Self::ValueMove(v) => Some(&mut v.state),
            Self::Foreign { .. } => None,
        }
    }

    /// Mutable hotkey cursor of a move node.
    pub fn hotkey_cursor_mut(&mut self) -> Option<&mut usize> {
        match self {
            Self::TransformMove(m) => Some(&mut m.hotkey_cursor),
            Self::ValueMove(v) => Some(&mut v.hotkey_cursor),
            Self::Foreign { .. } => None,
        }
    }
}

/// One registered filter.
#[derive(Debug, Clone)]
pub struct FilterSlot {
    /// Filter name, unique per parent.
    pub name: String,
    /// Name of the source the filter is attached to.
    pub parent: String,
    /// Host enabled flag.
    pub enabled: bool,
    /// Behavior.
    pub node: FilterNode,
}

/// All filters known to the runtime, addressed by [`FilterId`].
///
/// Ids are never reused, so a stale id reliably misses.
#[derive(Debug, Default)]
pub struct FilterTable {
    slots: Vec<Option<FilterSlot>>,
}

impl FilterTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter. Names must be unique per parent.
    pub fn insert(&mut self, slot: FilterSlot) -> MoveResult<FilterId> {
        if self.find(&slot.parent, &slot.name).is_some() {
            return Err(MoveError::validation(format!(
                "filter '{}' already exists on '{}'",
                slot.name, slot.parent
            )));
        }
        self.slots.push(Some(slot));
        Ok(FilterId(self.slots.len() - 1))
    }

    /// Unregister a filter.
    pub fn remove(&mut self, id: FilterId) -> MoveResult<FilterSlot> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(MoveError::UnknownFilter(id))
    }

    /// Borrow a filter.
    pub fn get(&self, id: FilterId) -> MoveResult<&FilterSlot> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(MoveError::UnknownFilter(id))
    }

    /// Mutably borrow a filter.
    pub fn get_mut(&mut self, id: FilterId) -> MoveResult<&mut FilterSlot> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(MoveError::UnknownFilter(id))
    }

    /// Filter named `name` attached to `parent`.
    pub fn find(&self, parent: &str, name: &str) -> Option<FilterId> {
        self.iter()
            .find(|(_, s)| s.parent == parent && s.name == name)
            .map(|(id, _)| id)
    }

    /// Live filter ids in registration order.
    pub fn ids(&self) -> Vec<FilterId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Live filters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterId, &FilterSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (FilterId(i), s)))
    }

    /// Live filters in registration order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FilterId, &mut FilterSlot)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|s| (FilterId(i), s)))
    }

    /// Filters attached to `parent`, in registration order.
    pub fn attached_to<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = (FilterId, &'a FilterSlot)> + 'a {
        self.iter().filter(move |(_, s)| s.parent == parent)
    }
}

impl ChainGraph for FilterTable {
    fn filter_by_name(&self, source: &str, name: &str) -> Option<FilterId> {
        self.find(source, name)
    }

    fn link(&self, id: FilterId) -> Option<ChainLink> {
        let slot = self.get(id).ok()?;
        let (target, chain) = match &slot.node {
            FilterNode::TransformMove(m) => (
                Some(m.settings.source.clone()).filter(|s| !s.is_empty()),
                Some(&m.settings.chain),
            ),
            FilterNode::ValueMove(v) => (None, Some(&v.settings.chain)),
            FilterNode::Foreign { .. } => (None, None),
        };
        Some(ChainLink {
            kind: slot.node.node_kind(),
            name: slot.name.clone(),
            owner: slot.parent.clone(),
            target,
            next_move: chain.map(|c| c.next_move.clone()).unwrap_or_default(),
            next_move_on: chain.map(|c| c.next_move_on).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/registry.rs"]
mod tests;
