use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::Deserialize;
use url::Url;
use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Runtime configuration of the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the task service.
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long an error notification stays on screen in the TUI.
    pub toast_duration: Duration,
}

/// On-disk representation of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    toast_secs: Option<u64>,
}

/// Returns the path to the configuration file.
///
/// The path is determined in the following order:
/// 1. `TODOUST_CONFIG` environment variable.
/// 2. `~/.config/todoust/config.toml` (on Linux).
/// 3. `./config.toml` (fallback).
pub fn config_path() -> PathBuf {
    std::env::var("TODOUST_CONFIG").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("todoust");
        p.push("config.toml");
        p
    })
}

impl Config {
    /// Loads the configuration file (if present) and applies `api_url_override`
    /// on top, typically taken from `--api-url` / `TODOUST_API_URL`.
    pub fn load(api_url_override: Option<&str>) -> Result<Config, ConfigError> {
        Self::load_from(&config_path(), api_url_override)
    }

    pub fn load_from(path: &Path, api_url_override: Option<&str>) -> Result<Config, ConfigError> {
        let file = if path.exists() {
            let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str::<ConfigFile>(&s).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            ConfigFile::default()
        };

        let timeout_secs = match file.timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout { path: path.to_path_buf() }),
            Some(secs) => secs,
            None => 10,
        };

        let raw_url = api_url_override
            .map(str::to_string)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_base_url(&raw_url)?;

        Ok(Config {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            toast_duration: Duration::from_secs(file.toast_secs.unwrap_or(4)),
        })
    }
}

/// Parses a base URL, making sure it ends with `/` so relative joins keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let with_slash = if raw.ends_with('/') { raw.to_string() } else { format!("{}/", raw) };
    Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml"), None).unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://localhost:8080/");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn file_values_are_read_and_override_wins() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "api_url = \"http://tasks.local/api\"\ntimeout_secs = 3").unwrap();

        let cfg = Config::load_from(f.path(), None).unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://tasks.local/api/");
        assert_eq!(cfg.timeout, Duration::from_secs(3));

        let cfg = Config::load_from(f.path(), Some("http://other:9000")).unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://other:9000/");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "api_url = [").unwrap();
        assert!(matches!(Config::load_from(f.path(), None), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let res = Config::load_from(&dir.path().join("none.toml"), Some("not a url"));
        assert!(matches!(res, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "timeout_secs = 0").unwrap();
        assert!(matches!(Config::load_from(f.path(), None), Err(ConfigError::ZeroTimeout { .. })));
    }
}
