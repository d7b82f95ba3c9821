use std::collections::BTreeMap;

use crate::foundation::ids::FilterId;

/// Lifecycle event emitted for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEvent {
    /// The source became active in the program output.
    Activate,
    /// The source left the program output.
    Deactivate,
    /// The source became visible somewhere.
    Show,
    /// The source stopped being visible anywhere.
    Hide,
}

/// Publish/subscribe hub keyed by source name.
///
/// Filters subscribe to the lifecycle events of the source they animate, and to the global
/// rename notification. Subscriptions are plain ids; delivering an event is the runtime's job.
#[derive(Debug, Default)]
pub struct SignalHub {
    by_source: BTreeMap<String, Vec<FilterId>>,
    rename: Vec<FilterId>,
}

impl SignalHub {
    /// Empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `filter` to events of `source`. Duplicate subscriptions are ignored.
    pub fn connect(&mut self, source: &str, filter: FilterId) {
        let subs = self.by_source.entry(source.to_owned()).or_default();
        if !subs.contains(&filter) {
            subs.push(filter);
        }
    }

    /// Drop the subscription of `filter` to `source`, if any.
    pub fn disconnect(&mut self, source: &str, filter: FilterId) {
        if let Some(subs) = self.by_source.get_mut(source) {
            subs.retain(|f| *f != filter);
            if subs.is_empty() {
                self.by_source.remove(source);
            }
        }
    }

    /// Drop every subscription held by `filter`, including the rename one.
    pub fn disconnect_all(&mut self, filter: FilterId) {
        self.by_source.retain(|_, subs| {
            subs.retain(|f| *f != filter);
            !subs.is_empty()
        });
        self.unsubscribe_rename(filter);
    }

    /// Filters subscribed to `source`, in subscription order.
    pub fn subscribers(&self, source: &str) -> Vec<FilterId> {
        self.by_source.get(source).cloned().unwrap_or_default()
    }

    /// Move every subscription of `old` over to `new`.
    pub fn rename_source(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        if let Some(subs) = self.by_source.remove(old) {
            for f in subs {
                self.connect(new, f);
            }
        }
    }

    /// Receive the global rename notification.
    pub fn subscribe_rename(&mut self, filter: FilterId) {
        if !self.rename.contains(&filter) {
            self.rename.push(filter);
        }
    }

    /// Stop receiving the global rename notification.
    pub fn unsubscribe_rename(&mut self, filter: FilterId) {
        self.rename.retain(|f| *f != filter);
    }

    /// Filters receiving the global rename notification.
    pub fn rename_subscribers(&self) -> &[FilterId] {
        &self.rename
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/signals.rs"]
mod tests;
