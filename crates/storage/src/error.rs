//! Listing Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! The `Display` strings double as the message shown to the user, so keep
//! them short and free of internal detail.

use derive_more::{Display, Error};

/// A listing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Container does not exist, or exists but does not allow anonymous listing
    #[display("container not found or not public")]
    NotFound,
    /// Listing was refused
    #[display("access denied, container must be public")]
    Forbidden,
    /// Anything else between us and a parsed listing: connection failures,
    /// unexpected HTTP statuses, unreadable response bodies.
    #[display("network error: {_0}")]
    Transport(#[error(not(source))] String),
}

impl ErrorKind {
    /// Classify an HTTP status from the listing endpoint.
    ///
    /// Returns `None` for success statuses.
    pub fn from_status(code: u16, reason: Option<&str>) -> Option<Self> {
        match code {
            200..=299 => None,
            404 => Some(Self::NotFound),
            403 => Some(Self::Forbidden),
            _ => Some(Self::Transport(match reason {
                Some(reason) => format!("{code} {reason}"),
                None => code.to_string(),
            })),
        }
    }

    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in this workspace retries automatically; this only informs
    /// whoever reports the error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, None)]
    #[case(206, None)]
    #[case(404, Some(ErrorKind::NotFound))]
    #[case(403, Some(ErrorKind::Forbidden))]
    #[case(500, Some(ErrorKind::Transport("500 Internal Server Error".to_string())))]
    fn test_from_status(#[case] code: u16, #[case] expected: Option<ErrorKind>) {
        let reason = match code {
            500 => Some("Internal Server Error"),
            _ => None,
        };
        assert_eq!(ErrorKind::from_status(code, reason), expected);
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "container not found or not public");
        assert_eq!(ErrorKind::Forbidden.to_string(), "access denied, container must be public");
        assert_eq!(
            ErrorKind::Transport("503 Service Unavailable".to_string()).to_string(),
            "network error: 503 Service Unavailable"
        );
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::Forbidden.is_retryable());
        assert!(ErrorKind::Transport("reset".to_string()).is_retryable());
    }
}
