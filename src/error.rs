//! Command-line Error Types

use derive_more::{Display, Error};

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not set up logging")]
    Logging,
    #[display("no endpoint given on the command line or in the configuration")]
    NoEndpoint,
    #[display("could not resolve endpoint")]
    Resolve,
    #[display("could not set up listing backend")]
    Backend,
    #[display("navigation failed")]
    Navigate,
    #[display("could not read command")]
    Input,
}
