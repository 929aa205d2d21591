//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported synchronously by the engine.
///
/// Nothing here is fatal: a rejected start leaves all observable state
/// untouched, and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any state mutation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<algovis_structures::Error> for Error {
    fn from(e: algovis_structures::Error) -> Self {
        Error::InvalidInput(e.to_string())
    }
}
