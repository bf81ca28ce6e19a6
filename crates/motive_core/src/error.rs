//! Error taxonomy for the motivation model.
//!
//! Lookups of unknown names and invalid catalog entries are fatal to the
//! calling operation. Numeric edge cases (zero weights, empty ranges) are not
//! errors; they are guarded where they occur and yield a boundary value.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotiveError {
    /// A need was referenced by a name absent from the registry.
    #[error("Unknown need: {0}")]
    UnknownNeed(String),

    /// A consumption was referenced by a name absent from the registry.
    #[error("Unknown consumption: {0}")]
    UnknownConsumption(String),

    /// A modulator was referenced by a name absent from the registry.
    #[error("Unknown modulator: {0}")]
    UnknownModulator(String),

    /// An anticipated event id is not registered.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// An anticipated event with this id already exists.
    #[error("Duplicate event: {0}")]
    DuplicateEvent(String),

    /// Catalog or settings rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `advance()` was called after the configured tick budget was spent.
    #[error("Simulation finished after {0} ticks")]
    SimulationFinished(u64),
}

pub type MotiveResult<T> = Result<T, MotiveError>;

/// Shorthand for building an `InvalidConfig` error.
pub(crate) fn invalid(msg: impl Into<String>) -> MotiveError {
    MotiveError::InvalidConfig(msg.into())
}
