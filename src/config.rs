use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// Program configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// LibreOffice binary used for headless conversion
    pub soffice_binary: String,
    /// Upper bound for one document conversion, in seconds
    pub convert_timeout_secs: u64,
    /// Whether to show verbose logs
    pub verbose_logging: bool,
    /// Session log file written at startup
    pub session_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            soffice_binary: "soffice".to_string(),
            convert_timeout_secs: 120,
            verbose_logging: false,
            session_log_file: "conversion_log.txt".to_string(),
        }
    }
}

/// Optional on-disk overrides, all fields may be omitted.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    soffice_binary: Option<String>,
    convert_timeout_secs: Option<u64>,
    verbose_logging: Option<bool>,
    session_log_file: Option<String>,
}

impl Config {
    /// Defaults, then `config.toml` if present, then environment variables.
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();
        let path = Path::new("config.toml");
        if path.exists() {
            config = config.apply_file(path)?;
        }
        Ok(config.apply_env())
    }

    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    fn apply_file(self, path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: FileConfig = toml::from_str(&text).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            soffice_binary: file.soffice_binary.unwrap_or(self.soffice_binary),
            convert_timeout_secs: file.convert_timeout_secs.unwrap_or(self.convert_timeout_secs),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
            session_log_file: file.session_log_file.unwrap_or(self.session_log_file),
        })
    }

    fn apply_env(self) -> Self {
        Self {
            soffice_binary: std::env::var("SOFFICE_BINARY").unwrap_or(self.soffice_binary),
            convert_timeout_secs: std::env::var("CONVERT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.convert_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
            session_log_file: std::env::var("SESSION_LOG_FILE").unwrap_or(self.session_log_file),
        }
    }
}
