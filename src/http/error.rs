use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

/// HTTP module error types
#[derive(Error, Debug, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum HttpError {
    /// Request could not be sent or did not complete
    #[error("{0}")]
    Request(String),
    /// Response body could not be read
    #[error("{0}")]
    Response(String),
    /// Non-2xx status
    #[error("{}", t!("http.bad_status", status = _0))]
    Status(u16),
    /// Body is not the JSON we expect
    #[error("{0}")]
    Decode(String),
    /// Client configuration error
    #[error("{0}")]
    Config(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Request(t!("http.request_timeout").to_string())
        } else if err.is_connect() {
            HttpError::Request(t!("http.connection_failed", error = err.to_string()).to_string())
        } else if err.is_builder() {
            HttpError::Config(t!("http.client_build_failed", error = err.to_string()).to_string())
        } else if let Some(status) = err.status() {
            HttpError::Status(status.as_u16())
        } else if err.is_decode() {
            HttpError::Decode(t!("http.decode_failed", error = err.to_string()).to_string())
        } else {
            HttpError::Request(t!("http.request_failed", error = err.to_string()).to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Decode(t!("http.decode_failed", error = err.to_string()).to_string())
    }
}

pub type HttpResult<T> = Result<T, HttpError>;
