use serde::Serialize;
use thiserror::Error;

/// The single, unified error type for the entire application.
///
/// This enum wraps all module-specific errors, providing a consistent structure
/// for error handling in the core and for serialization to a UI shell.
/// The `#[serde(tag = "module", content = "details")]` attribute ensures that
/// the JSON output is clean and predictable.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "module", content = "details")]
pub enum AppError {
    /// Errors originating from the HTTP module.
    #[error(transparent)]
    Http(#[from] crate::http::HttpError),

    #[error(transparent)]
    Version(#[from] crate::version::VersionError),

    #[error(transparent)]
    Settings(#[from] crate::settings::StoreError),

    #[error(transparent)]
    Connect(#[from] crate::connect::BindingError),

    #[error("{message}")]
    General { message: String },
}

// This allows a UI bridge to hand errors over as JSON strings.
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        let error_message = error.to_string();

        match serde_json::to_value(&error) {
            Ok(mut value) => {
                if let Some(obj) = value.as_object_mut() {
                    obj.insert(
                        "message".to_string(),
                        serde_json::Value::String(error_message),
                    );
                }
                // This final serialization should ideally not fail if `to_value` succeeded.
                serde_json::to_string(&value).unwrap_or_else(|e| {
                    serde_json::json!({
                        "module": "Internal",
                        "details": {
                            "kind": "SerializationFailed",
                            "message": format!("Failed to re-serialize error value: {}", e)
                        },
                        "message": "An unexpected error occurred during error handling.".to_string()
                    })
                    .to_string()
                })
            }
            Err(e) => {
                // Fallback if the initial serialization to `Value` fails.
                serde_json::json!({
                    "module": "Internal",
                    "details": {
                        "kind": "SerializationFailed",
                        "message": format!("Failed to serialize error: {}", e)
                    },
                    "message": error_message
                })
                .to_string()
            }
        }
    }
}

/// A universal Result type for fallible functions of the application core.
pub type Result<T> = std::result::Result<T, AppError>;
