//! Shape of the persisted settings file

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::libs::lang::get_system_locale;

/// Application settings as stored in `settings.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    /// Interface language; the system locale when unset
    pub interface_language: Option<String>,
    /// NapCat install directory override
    pub napcat_path: Option<PathBuf>,
    /// QQ install directory override
    pub qq_path: Option<PathBuf>,
    /// Remote endpoint overrides
    pub endpoints: EndpointSettings,
    /// Total request timeout; the transport default when unset
    pub request_timeout_secs: Option<u64>,
}

impl AppSettings {
    pub fn language(&self) -> String {
        self.interface_language
            .clone()
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(get_system_locale)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Optional replacements for the built-in release endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointSettings {
    pub napcat_release: Option<String>,
    pub ncd_release: Option<String>,
    pub qq_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"qqPath": "D:/QQ", "requestTimeoutSecs": 0}"#).unwrap();
        assert_eq!(settings.qq_path, Some(PathBuf::from("D:/QQ")));
        assert_eq!(settings.napcat_path, None);
        assert_eq!(settings.endpoints, EndpointSettings::default());
        // zero means "not configured"
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn test_explicit_language_wins() {
        let settings = AppSettings {
            interface_language: Some("zh-Hans".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.language(), "zh-Hans");
    }
}
