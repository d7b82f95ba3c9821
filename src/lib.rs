//! scene-move animates the transform, visibility and stacking order of items in a scene graph.
//!
//! A host registers move filters with a [`MoveRuntime`] and forwards its ticks and lifecycle
//! events to it:
//!
//! - Transform moves interpolate an item from its captured state to an absolute or relative
//!   target, on a straight or curved path, with configurable easing and delays.
//! - Value moves animate one numeric setting of a source the same way.
//! - Finished moves can reverse themselves or start another move, and hotkeys walk a chain of
//!   moves one press at a time.
//!
//! The scene graph is consumed through [`SceneHost`]; [`MemoryHost`] implements it in memory and
//! backs the `scene-move` simulator.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing, snapshots and the summary text format.
pub mod animation;
/// Persisted settings and simulator scenarios.
pub mod config;
/// Move filters and the runtime that drives them.
pub mod engine;
/// Shared value types and errors.
pub mod foundation;
/// Scene graph seams and the in-memory host.
pub mod host;
/// Scenario replay.
pub mod sim;

pub use crate::animation::ease::{EaseFunction, EaseMode, Easing};
pub use crate::animation::snapshot::TransformSnapshot;
pub use crate::animation::summary::{format_summary, parse_summary};
pub use crate::config::model::{
    ChainSettings, MoveSettings, MoveTiming, NextMoveOn, OrderChange, StartTrigger,
    ValueMoveSettings, VisibilityChange,
};
pub use crate::config::scenario::Scenario;
pub use crate::engine::runtime::MoveRuntime;
pub use crate::engine::state::{AnimationState, StartOutcome, StepOutcome};
pub use crate::engine::value_move::ValueKind;
pub use crate::foundation::core::{Canvas, Crop, Vec2f};
pub use crate::foundation::error::{MoveError, MoveResult};
pub use crate::foundation::ids::{FilterId, ItemId};
pub use crate::host::memory::{MemoryHost, MemoryHostDef};
pub use crate::host::scene::SceneHost;
pub use crate::host::signals::SourceEvent;
pub use crate::sim::runner::{Frame, Simulation};
