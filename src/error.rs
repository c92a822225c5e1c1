use std::fmt;
use std::path::{Path, PathBuf};

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Local filesystem errors
    File(FileError),
    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::File(e) => write!(f, "file error: {}", e),
            AppError::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

/// Local filesystem errors
#[derive(Debug)]
pub enum FileError {
    /// Writing a file failed
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Deleting a pre-existing output file failed
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            FileError::DeleteFailed { path, source } => {
                write!(
                    f,
                    "failed to remove existing output {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::WriteFailed { source, .. } | FileError::DeleteFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

impl FileError {
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn delete_failed(path: &Path, source: std::io::Error) -> Self {
        FileError::DeleteFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be parsed
    ParseFailed { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseFailed { path, message } => {
                write!(f, "cannot parse {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== conversions ==========
// anyhow already blanket-covers anything implementing std::error::Error, so
// only the inward conversions are spelled out.

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

// ========== Result alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
