use tracing::debug;

use crate::{
    config::model::{NEXT_MOVE_REVERSE, NextMoveOn},
    foundation::ids::FilterId,
};

/// What kind of node a filter is, as far as chaining is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Transform move filter.
    TransformMove,
    /// Value move filter (either type identifier).
    ValueMove,
    /// Any other filter; never started by a chain.
    Foreign,
}

impl NodeKind {
    /// Whether chains may start this node.
    pub fn is_move(self) -> bool {
        matches!(self, Self::TransformMove | Self::ValueMove)
    }
}

/// Where a name lookup found its filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Among the filters of the node's owner.
    Owner,
    /// Among the filters of the source the node animates.
    Target,
}

/// A resolved chain successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterHandle {
    /// Filter id.
    pub id: FilterId,
    /// Node kind.
    pub kind: NodeKind,
    /// Scope the name was found in.
    pub scope: SearchScope,
}

/// Chaining view of one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    /// Node kind.
    pub kind: NodeKind,
    /// Filter name.
    pub name: String,
    /// Name of the owning source.
    pub owner: String,
    /// Source the node animates, if it has one.
    pub target: Option<String>,
    /// Successor name, sentinel or empty.
    pub next_move: String,
    /// When the successor follows.
    pub next_move_on: NextMoveOn,
}

impl ChainLink {
    /// Whether this node links to a successor through hotkey presses.
    pub fn has_hotkey_chain(&self) -> bool {
        self.next_move_on == NextMoveOn::Hotkey && !self.next_move.is_empty()
    }
}

/// Read-only filter graph the resolver walks.
pub trait ChainGraph {
    /// Filter named `name` attached to the source named `source`.
    fn filter_by_name(&self, source: &str, name: &str) -> Option<FilterId>;

    /// Chaining view of `id`, or `None` if it does not exist.
    fn link(&self, id: FilterId) -> Option<ChainLink>;
}

/// Look `name` up among the owner's filters, then among the target source's filters.
pub fn resolve_next<G: ChainGraph + ?Sized>(
    graph: &G,
    from: &ChainLink,
    name: &str,
) -> Option<FilterHandle> {
    let found = graph
        .filter_by_name(&from.owner, name)
        .map(|id| (id, SearchScope::Owner))
        .or_else(|| {
            from.target
                .as_deref()
                .and_then(|source| graph.filter_by_name(source, name))
                .map(|id| (id, SearchScope::Target))
        });
    let (id, scope) = found?;
    let kind = graph.link(id)?.kind;
    Some(FilterHandle { id, kind, scope })
}

/// What to do once a move completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPlan {
    /// Nothing follows.
    Nothing,
    /// Flip direction and restart if now reversed.
    Reverse,
    /// Flip direction only; the next hotkey press runs it.
    FlipDirection,
    /// Start another move.
    Start(FilterHandle),
}

/// Decide what follows the completion of `origin`.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn plan_completion<G: ChainGraph + ?Sized>(graph: &G, origin: FilterId) -> CompletionPlan {
    let Some(link) = graph.link(origin) else {
        return CompletionPlan::Nothing;
    };
    let next = link.next_move.as_str();
    match link.next_move_on {
        NextMoveOn::End if next.is_empty() || next == link.name => CompletionPlan::Nothing,
        NextMoveOn::End if next == NEXT_MOVE_REVERSE => CompletionPlan::Reverse,
        NextMoveOn::End => match resolve_next(graph, &link, next) {
            Some(handle) if handle.kind.is_move() => {
                debug!(next, to = %handle.id, scope = ?handle.scope, "chaining");
                CompletionPlan::Start(handle)
            }
            _ => {
                debug!(next, "next move not found");
                CompletionPlan::Nothing
            }
        },
        NextMoveOn::Hotkey if next == NEXT_MOVE_REVERSE => CompletionPlan::FlipDirection,
        NextMoveOn::Hotkey => CompletionPlan::Nothing,
    }
}

/// Outcome of a hotkey press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyPlan {
    /// Filter to start.
    pub start: FilterId,
    /// New cursor of the originating filter.
    pub cursor: usize,
    /// Nodes visited by this pass, origin first.
    pub visited: Vec<FilterId>,
}

impl HotkeyPlan {
    fn restart(origin: FilterId) -> Self {
        Self {
            start: origin,
            cursor: 1,
            visited: vec![origin],
        }
    }
}

/// Walk the hotkey chain of `origin`, which has taken `cursor` hops so far.
///
/// Only hotkey-linked hops count against the cursor; completion links are followed for free
/// since their predecessor starts them itself. An empty or sentinel name, an unresolved or
/// non-move node, or a repeated node sends the walk back to the origin. Every hop adds a new
/// node to the visited list, so a graph of N nodes is walked in at most N hops.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn plan_hotkey<G: ChainGraph + ?Sized>(
    graph: &G,
    origin: FilterId,
    cursor: usize,
) -> HotkeyPlan {
    let Some(first) = graph.link(origin) else {
        return HotkeyPlan {
            start: origin,
            cursor,
            visited: vec![origin],
        };
    };
    if !first.has_hotkey_chain() {
        return HotkeyPlan {
            start: origin,
            cursor,
            visited: vec![origin],
        };
    }
    if cursor == 0 {
        return HotkeyPlan::restart(origin);
    }

    let mut visited = vec![origin];
    let mut node = first;
    let mut hops = 0;
    while hops < cursor {
        let name = node.next_move.as_str();
        if name.is_empty() || name == NEXT_MOVE_REVERSE {
            debug!("end of hotkey chain, restarting");
            return HotkeyPlan::restart(origin);
        }
        let Some(next) = resolve_next(graph, &node, name).filter(|h| h.kind.is_move()) else {
            debug!(name, "hotkey chain broken, restarting");
            return HotkeyPlan::restart(origin);
        };
        if visited.contains(&next.id) {
            debug!(name, "hotkey chain cycle, restarting");
            return HotkeyPlan::restart(origin);
        }
        let Some(next_link) = graph.link(next.id) else {
            return HotkeyPlan::restart(origin);
        };
        visited.push(next.id);
        if node.next_move_on == NextMoveOn::Hotkey {
            hops += 1;
        }
        node = next_link;
    }

    let start = visited.last().copied().unwrap_or(origin);
    HotkeyPlan {
        start,
        cursor: cursor + 1,
        visited,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/chain.rs"]
mod tests;
