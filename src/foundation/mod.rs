//! Value types shared by every layer.

/// Geometry value types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Typed ids for host objects.
pub mod ids;
pub(crate) mod math;
