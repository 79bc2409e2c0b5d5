//! Type definitions for version resolution

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::constants::{NAPCAT_RELEASE_API, NCD_RELEASE_API, QQ_VERSION_API};
use crate::settings::EndpointSettings;

/// Software whose versions are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Product {
    #[strum(serialize = "NapCat")]
    NapCat,
    #[strum(serialize = "QQ")]
    Qq,
    /// NapCat Desktop, this application
    #[strum(serialize = "NCD")]
    Ncd,
}

/// Remote endpoints queried by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// NapCat latest release, read for `tag_name` and `body`
    pub napcat_release: String,
    /// NCD latest release, read for `tag_name` and `body`
    pub ncd_release: String,
    /// QQ version info, read for `version` and `verHash`
    pub qq_version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            napcat_release: NAPCAT_RELEASE_API.to_string(),
            ncd_release: NCD_RELEASE_API.to_string(),
            qq_version: QQ_VERSION_API.to_string(),
        }
    }
}

impl Endpoints {
    /// Built-in endpoints with the configured overrides applied
    pub fn from_settings(overrides: &EndpointSettings) -> Self {
        let defaults = Self::default();
        Self {
            napcat_release: overrides
                .napcat_release
                .clone()
                .unwrap_or(defaults.napcat_release),
            ncd_release: overrides.ncd_release.clone().unwrap_or(defaults.ncd_release),
            qq_version: overrides.qq_version.clone().unwrap_or(defaults.qq_version),
        }
    }
}

/// Outcome of comparing an installed version with the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum UpdateStatus {
    UpToDate,
    UpdateAvailable,
    NotInstalled,
    /// Latest release unknown, or a version could not be compared
    Unknown,
}

/// Installed and latest version of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionReport {
    pub product: Product,
    pub local: Option<String>,
    pub remote: Option<String>,
    pub status: UpdateStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_display() {
        assert_eq!(Product::NapCat.to_string(), "NapCat");
        assert_eq!(Product::Qq.to_string(), "QQ");
        assert_eq!(Product::Ncd.to_string(), "NCD");
    }

    #[test]
    fn test_endpoint_overrides() {
        let overrides = EndpointSettings {
            qq_version: Some("http://mirror.local/qq".to_string()),
            ..Default::default()
        };
        let endpoints = Endpoints::from_settings(&overrides);
        assert_eq!(endpoints.qq_version, "http://mirror.local/qq");
        assert_eq!(endpoints.napcat_release, NAPCAT_RELEASE_API);
    }
}
