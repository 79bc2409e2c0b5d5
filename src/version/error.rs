//! Error types for version resolution

use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur while resolving a version
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "details", rename_all = "camelCase")]
pub enum VersionError {
    /// Remote request failed
    #[error("{}", t!("version.errors.http", error = _0.to_string()))]
    Http(#[from] HttpError),

    /// Local file exists but could not be read
    #[error("{}", t!("version.errors.io", path = path, error = error))]
    Io { path: String, error: String },

    /// Local file is not a JSON object
    #[error("{}", t!("version.errors.malformed", path = path, error = error))]
    Malformed { path: String, error: String },

    /// Expected key is absent, `null` or not a scalar
    #[error("{}", t!("version.errors.missing_field", path = path, field = field))]
    MissingField { path: String, field: String },
}

pub type Result<T> = std::result::Result<T, VersionError>;
