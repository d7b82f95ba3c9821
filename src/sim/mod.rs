//! Deterministic replay of a [`Scenario`](crate::config::scenario::Scenario) against the
//! in-memory host, one fixed-length tick per frame.

/// Frame loop and action dispatch.
pub mod runner;
