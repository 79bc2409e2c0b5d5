use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading or saving persisted settings
#[derive(Error, Debug, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum StoreError {
    /// The file exists but could not be read or written
    #[error("{}", t!("settings.errors.io", path = path, error = error))]
    Io { path: String, error: String },

    /// The file content is not valid for the expected shape
    #[error("{}", t!("settings.errors.serde", path = path, error = error))]
    Serde { path: String, error: String },

    /// No per-user configuration directory on this platform
    #[error("{}", t!("settings.errors.config_dir"))]
    ConfigDir,
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, error: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    pub(crate) fn serde(path: &std::path::Path, error: serde_json::Error) -> Self {
        StoreError::Serde {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
