//! Address Resolution Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An address resolution error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for address resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a user-supplied endpoint could not be turned into a container
/// address. No listing is ever fetched for any of these.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not a well-formed absolute URL.
    #[display("malformed URL: {_0}")]
    MalformedUrl(#[error(not(source))] String),
    /// Host is not a storage account's blob service endpoint.
    #[display("not a blob storage endpoint: {_0}")]
    NotABlobEndpoint(#[error(not(source))] String),
    /// URL path does not name a container.
    #[display("no container in URL: {_0}")]
    MissingContainer(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The same input will always fail the same way.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::NotABlobEndpoint("example.com".to_string()).to_string(),
            "not a blob storage endpoint: example.com"
        );
        assert_eq!(
            ErrorKind::MissingContainer("https://acct.blob.core.windows.net/".to_string()).to_string(),
            "no container in URL: https://acct.blob.core.windows.net/"
        );
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::MalformedUrl("::".to_string()).is_retryable());
    }
}
