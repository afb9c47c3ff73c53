//! Layered configuration for blobnav.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. `config.toml`, `config.yaml` and `config.json` in the user's config
//!    directory (e.g. `~/.config/blobnav/` on Linux),
//! 3. a file passed explicitly (format picked by extension, TOML otherwise),
//! 4. `BLOBNAV_*` environment variables (`BLOBNAV_PAGINATION=single-page`).
//!
//! Command-line flags are applied on top by the binary.

pub mod error;

use crate::error::{ErrorKind, Result};
use blobnav_browser::StalePolicy;
use blobnav_storage::Pagination;
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "BLOBNAV_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint to browse when none is given on the command line
    pub endpoint: Option<String>,
    pub pagination: Pagination,
    pub stale_policy: StalePolicy,
    /// Default tracing filter directive, used when neither `BLOBNAV_LOG`
    /// nor `RUST_LOG` is set
    pub log_level: String,
    /// Per-request timeout for listing requests
    pub timeout_secs: u64,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            pagination: Pagination::default(),
            stale_policy: StalePolicy::default(),
            log_level: "info".to_string(),
            timeout_secs: 30,
        }
    }
}
impl Config {
    /// Load configuration from every source.
    ///
    /// # Errors
    /// - [`MissingFile`](ErrorKind::MissingFile) if `explicit` doesn't exist.
    /// - [`Load`](ErrorKind::Load) if a source holds a value of the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_dir = ProjectDirs::from("", "", "blobnav").map(|dirs| dirs.config_dir().to_path_buf());
        let figment = layered(user_dir.as_deref(), explicit)?.merge(Env::prefixed(ENV_PREFIX));
        figment.extract().or_raise(|| ErrorKind::Load)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Defaults plus file sources, without the environment.
fn layered(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(dir) = user_dir {
        tracing::trace!(dir = %dir.display(), "Looking for user configuration");
        // Each of these is optional; only the ones present are merged.
        let (toml, yaml, json) = (dir.join("config.toml"), dir.join("config.yaml"), dir.join("config.json"));
        if toml.is_file() {
            figment = figment.merge(Toml::file_exact(toml));
        }
        if yaml.is_file() {
            figment = figment.merge(Yaml::file_exact(yaml));
        }
        if json.is_file() {
            figment = figment.merge(Json::file_exact(json));
        }
    }
    if let Some(path) = explicit {
        if !path.is_file() {
            exn::bail!(ErrorKind::MissingFile(PathBuf::from(path)));
        }
        tracing::debug!(path = %path.display(), "Loading explicit configuration file");
        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
            Some("json") => figment.merge(Json::file_exact(path)),
            _ => figment.merge(Toml::file_exact(path)),
        };
    }
    Ok(figment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn extract(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Config> {
        layered(user_dir, explicit)?.extract().or_raise(|| ErrorKind::Load)
    }

    #[test]
    fn test_defaults() {
        let config = extract(None, None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pagination, Pagination::Follow);
        assert_eq!(config.stale_policy, StalePolicy::LastResponseWins);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_empty_user_dir() {
        let dir = TempDir::new().unwrap();
        let config = extract(Some(dir.path()), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_user_dir_yaml_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "endpoint: https://acct.blob.core.windows.net/box\n").unwrap();
        let config = extract(Some(dir.path()), None).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("https://acct.blob.core.windows.net/box"));
    }

    #[test]
    fn test_user_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "pagination = \"single-page\"\n").unwrap();
        let config = extract(Some(dir.path()), None).unwrap();
        assert_eq!(config.pagination, Pagination::SinglePage);
        assert_eq!(config.log_level, "info");
    }

    #[rstest]
    #[case("override.toml", "stale_policy = \"latest-request-wins\"\ntimeout_secs = 5\n")]
    #[case("override.yaml", "stale_policy: latest-request-wins\ntimeout_secs: 5\n")]
    #[case("override.json", "{\"stale_policy\": \"latest-request-wins\", \"timeout_secs\": 5}")]
    fn test_explicit_file_formats(#[case] name: &str, #[case] contents: &str) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        let config = extract(None, Some(&path)).unwrap();
        assert_eq!(config.stale_policy, StalePolicy::LatestRequestWins);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_explicit_overrides_user_dir() {
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "log_level = \"debug\"\ntimeout_secs = 10\n").unwrap();
        let other = TempDir::new().unwrap();
        let explicit = other.path().join("blobnav.toml");
        fs::write(&explicit, "timeout_secs = 60\n").unwrap();
        let config = extract(Some(user.path()), Some(&explicit)).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = extract(None, Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingFile(_)));
    }

    #[test]
    fn test_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "pagination = \"sometimes\"\n").unwrap();
        let err = extract(None, Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load));
    }
}
