//! Navigation Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A navigation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for navigation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The listing for the requested folder could not be fetched. The
    /// storage error it was raised from says why.
    #[display("could not list folder")]
    Fetch,
    /// Only files can be opened.
    #[display("not a file: {_0}")]
    NotAFile(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch)
    }
}
