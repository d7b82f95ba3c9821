//! Pure animation math: easing curves, transform snapshots and their text summary.

/// Easing modes, curve families and the quadratic Bezier evaluator.
pub mod ease;
/// Transform snapshots, relative offsets and interpolation.
pub mod snapshot;
/// Fixed-format text rendering of a snapshot and its parser.
pub mod summary;
