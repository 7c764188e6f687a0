//! Configuration structures and loading logic.

use crate::config::target::Target;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of concurrent download workers.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default number of attempts per media request.
pub const DEFAULT_MAX_REQUEST_RETRIES: u32 = 5;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Feed targeting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// User whose submissions were crawled.
    #[serde(default)]
    pub user: Option<String>,

    /// Subreddit that was crawled.
    #[serde(default)]
    pub subreddit: Option<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Only download animated media.
    #[serde(default)]
    pub only_videos: bool,

    /// Maximum number of candidate links to consume.
    #[serde(default)]
    pub max_files: Option<usize>,

    /// Number of concurrent download workers.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Attempts per media request before giving up.
    #[serde(default = "default_max_request_retries")]
    pub max_request_retries: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to show skipped downloads.
    #[serde(default)]
    pub show_skipped_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            only_videos: false,
            max_files: None,
            concurrency: DEFAULT_CONCURRENCY,
            max_request_retries: DEFAULT_MAX_REQUEST_RETRIES,
            request_timeout_seconds: default_request_timeout(),
            user_agent: default_user_agent(),
            show_downloads: true,
            show_skipped_downloads: false,
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_max_request_retries() -> u32 {
    DEFAULT_MAX_REQUEST_RETRIES
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// The crawl target. A user wins over a subreddit when both are set.
    pub fn target(&self) -> Option<Target> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        non_empty(&self.target.user)
            .map(Target::User)
            .or_else(|| non_empty(&self.target.subreddit).map(Target::Subreddit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.options.concurrency, 8);
        assert_eq!(config.options.max_request_retries, 5);
        assert!(config.options.show_downloads);
        assert!(config.target().is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
            [target]
            subreddit = "pics"

            [options]
            output_directory = "/data/grabs"
            only_videos = true
            max_files = 50
            concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.target(), Some(Target::Subreddit("pics".into())));
        assert_eq!(
            config.options.output_directory,
            Some(PathBuf::from("/data/grabs"))
        );
        assert!(config.options.only_videos);
        assert_eq!(config.options.max_files, Some(50));
        assert_eq!(config.options.concurrency, 4);
        assert_eq!(config.options.max_request_retries, 5);
    }

    #[test]
    fn test_user_wins_over_subreddit() {
        let mut config = Config::default();
        config.target.user = Some("someone".into());
        config.target.subreddit = Some("pics".into());
        assert_eq!(config.target(), Some(Target::User("someone".into())));

        config.target.user = Some("  ".into());
        assert_eq!(config.target(), Some(Target::Subreddit("pics".into())));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("grabber.toml");
        fs::write(&path, "[target]\nuser = \"someone\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.target(), Some(Target::User("someone".into())));
    }
}
