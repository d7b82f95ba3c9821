use crate::foundation::ids::FilterId;

/// Convenience result type used across the crate.
pub type MoveResult<T> = Result<T, MoveError>;

/// Error taxonomy for the host-facing APIs.
///
/// The engine itself never fails a tick: unresolved names, zero durations and chain cycles all
/// degrade to "stay idle". These variants only surface at configuration and lookup boundaries.
#[derive(thiserror::Error, Debug)]
pub enum MoveError {
    /// Invalid user-provided settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Transform summary text that does not match the summary format.
    #[error("summary parse error: {0}")]
    Summary(String),

    /// A filter id that does not (or no longer) refer to a live filter.
    #[error("unknown filter: {0}")]
    UnknownFilter(FilterId),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MoveError {
    /// Build a [`MoveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MoveError::Summary`] value.
    pub fn summary(msg: impl Into<String>) -> Self {
        Self::Summary(msg.into())
    }

    /// Build a [`MoveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
