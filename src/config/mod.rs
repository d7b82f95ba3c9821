//! Filter settings as persisted by the host.

/// Settings models for transform and value moves.
pub mod model;
/// Scripted runs for the simulator.
pub mod scenario;
