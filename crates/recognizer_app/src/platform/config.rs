use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use app_logging::{default_level, parse_level};
use log::LevelFilter;
use recognizer_client::{ApiError, ClientSettings, Deployment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;
use super::logging::LogDestination;

const CONFIG_DIR: &str = "action-recognizer";
const CONFIG_FILENAME: &str = "config.ron";
const DEFAULT_LOG_FILE: &str = "action-recognizer.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] ApiError),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Settings read from `config.ron`, then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub deployment: Deployment,
    /// Wins over `deployment` when set.
    pub base_url: Option<String>,
    pub connect_timeout_secs: u64,
    /// `0` disables the whole-request limit.
    pub request_timeout_secs: u64,
    pub launch_player: bool,
    pub log: LogDestination,
    pub log_path: PathBuf,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deployment: Deployment::Local,
            base_url: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
            launch_player: false,
            log: LogDestination::File,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Loads the explicit file, or the per-user default location.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit.map(Path::to_path_buf).or_else(default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// A missing file yields defaults; anything unreadable or malformed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(deployment) = cli.deployment {
            self.deployment = deployment.into();
        }
        if let Some(base_url) = &cli.base_url {
            self.base_url = Some(base_url.clone());
        }
        if cli.launch_player {
            self.launch_player = true;
        }
        if let Some(log) = cli.log {
            self.log = log.into();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = Some(level.clone());
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings, ConfigError> {
        let mut settings = match &self.base_url {
            Some(base_url) => ClientSettings::with_base_url(base_url)?,
            None => ClientSettings::for_deployment(self.deployment)?,
        };
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout =
            (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs));
        Ok(settings)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match &self.log_level {
            Some(raw) => parse_level(raw).ok_or_else(|| ConfigError::LogLevel(raw.clone())),
            None => Ok(default_level()),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use log::LevelFilter;
    use pretty_assertions::assert_eq;
    use recognizer_client::Deployment;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError};
    use crate::platform::cli::{Cli, DeploymentArg, LogArg};
    use crate::platform::logging::LogDestination;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(
            &path,
            "(deployment: Service, request_timeout_secs: 0, log: Both, log_level: Some(\"warn\"))",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.deployment, Deployment::Service);
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Warn);

        let settings = config.client_settings().unwrap();
        assert_eq!(settings.base_url.as_str(), "http://autovideo:8000/");
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(deployment: Cloud").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut config = AppConfig::default();
        let cli = Cli {
            deployment: Some(DeploymentArg::Service),
            base_url: Some("http://10.1.2.3:8000".to_string()),
            launch_player: true,
            log: Some(LogArg::Terminal),
            ..Cli::default()
        };
        config.apply_cli(&cli);

        assert_eq!(config.deployment, Deployment::Service);
        assert!(config.launch_player);
        assert_eq!(config.log, LogDestination::Terminal);
        let settings = config.client_settings().unwrap();
        assert_eq!(settings.base_url.as_str(), "http://10.1.2.3:8000/");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn bad_base_url_and_level_are_reported() {
        let config = AppConfig {
            base_url: Some("ftp://nowhere".to_string()),
            log_level: Some("loud".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.client_settings(),
            Err(ConfigError::BaseUrl(_))
        ));
        assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(_))));
    }
}
