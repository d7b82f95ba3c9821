//! The move engine: per-filter state machines, the chaining protocol and the runtime that owns
//! every filter.
//!
//! Hosts drive everything through [`runtime::MoveRuntime`]. The other modules are the pieces it
//! is assembled from and are public so embedders can reuse them with their own registries.

/// Completion chaining and the hotkey walk.
pub mod chain;
/// Visibility and ordering side effects around a move.
pub mod effects;
/// Property callbacks of transform moves.
pub mod props;
/// Filter slots and the table that owns them.
pub mod registry;
/// Filter lifecycle, tick dispatch, host events and chaining.
pub mod runtime;
/// Run state shared by every move kind.
pub mod state;
/// Delay phases and eased progress.
pub mod timeline;
/// Transform moves.
pub mod transform_move;
/// Value moves.
pub mod value_move;
