use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const FILTER_VARS: [&str; 2] = ["BLOBNAV_LOG", "RUST_LOG"];

/// Pick the filter directive: `-v` flags win, then the environment, then the
/// configured default.
fn directive(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => FILTER_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|directive| !directive.trim().is_empty())
            .unwrap_or_else(|| configured.to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr so listings on stdout
/// stay pipeable.
pub fn init(verbose: u8, configured: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive(verbose, configured)).or_raise(|| ErrorKind::Logging)?;
    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
        .or_raise(|| ErrorKind::Logging)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "debug")]
    #[case(2, "trace")]
    #[case(5, "trace")]
    fn test_verbosity_overrides_everything(#[case] verbose: u8, #[case] expected: &str) {
        assert_eq!(directive(verbose, "warn"), expected);
    }
}
