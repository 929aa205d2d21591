//! Error types for structure operations.

use thiserror::Error;

/// Result type for structure operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when operating on a structure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Removal or peek attempted on a container with no items
    #[error("{0} is empty")]
    Empty(&'static str),
}
