//! Error types for the Drape engine.
//!
//! All crates return `DrapeResult<T>` from fallible operations.

use thiserror::Error;

use crate::ids::ColliderId;

/// Unified error type for the Drape engine.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// Configuration value is invalid (degenerate grid, zero spacing, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A collider id was used that is not (or no longer) registered.
    #[error("Collider {0:?} is not registered")]
    ColliderNotRegistered(ColliderId),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;
