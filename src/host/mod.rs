//! Host-facing seams: the scene graph trait, signals, and an in-memory host.

/// In-memory [`scene::SceneHost`] implementation.
pub mod memory;
/// The scene graph trait consumed by the engine.
pub mod scene;
/// Source lifecycle events and the subscription hub.
pub mod signals;
