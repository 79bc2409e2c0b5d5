//! Version resolver implementation
//!
//! Provides lookups of remote (latest) and local (installed) versions.

use log::{debug, error, info, warn};
use rust_i18n::t;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use strum::IntoEnumIterator;

use super::compare::compare_versions;
use super::error::{Result, VersionError};
use super::types::{Endpoints, Product, UpdateStatus, VersionReport};
use crate::constants::{
    KEY_BODY, KEY_CUR_VERSION, KEY_TAG_NAME, KEY_VERSION, KEY_VER_HASH, NAPCAT_PACKAGE_FILE,
    QQ_DOWNLOAD_URL_TEMPLATE, QQ_VERSIONS_DIR, QQ_VERSION_CONFIG_FILE,
};
use crate::http::{HttpClient, JsonObject};
use crate::notify::Notifier;
use crate::paths::PathResolver;

/// Builds the QQ installer URL; dashes in the version become dots
pub fn build_qq_download_url(version: &str, ver_hash: &str) -> String {
    QQ_DOWNLOAD_URL_TEMPLATE
        .replace("{hash}", ver_hash)
        .replace("{version}", &version.replace('-', "."))
}

/// Resolves versions, changelogs and the QQ download URL.
///
/// Stateless between calls; every remote lookup is a fresh blocking GET.
pub struct VersionResolver<P: PathResolver> {
    client: HttpClient,
    paths: P,
    notifier: Arc<dyn Notifier>,
    endpoints: Endpoints,
}

impl<P: PathResolver> VersionResolver<P> {
    pub fn new(
        client: HttpClient,
        paths: P,
        notifier: Arc<dyn Notifier>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            client,
            paths,
            notifier,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches `endpoint` and reads top-level `field` from the JSON object.
    ///
    /// Transport errors, non-2xx statuses and non-JSON bodies notify the
    /// user once and log once at error level. A missing field only warns.
    pub fn fetch_remote(&self, endpoint: &str, field: &str, subject: &str) -> Option<String> {
        info!("Fetching {}", subject);
        let value = match self.client.get_json_object(endpoint) {
            Ok(object) => {
                let value = object.get_string(field);
                if value.is_none() {
                    warn!("Field '{}' is missing from the {} response", field, subject);
                }
                value
            }
            Err(e) => {
                self.report_failure(subject, &e);
                None
            }
        };
        info!("Fetching {} finished", subject);
        value
    }

    /// Latest released version
    pub fn remote_version(&self, product: Product) -> Option<String> {
        match product {
            Product::NapCat => self.fetch_remote(
                &self.endpoints.napcat_release,
                KEY_TAG_NAME,
                &t!("version.subject.napcat_version"),
            ),
            Product::Qq => self.fetch_remote(
                &self.endpoints.qq_version,
                KEY_VERSION,
                &t!("version.subject.qq_version"),
            ),
            Product::Ncd => self.fetch_remote(
                &self.endpoints.ncd_release,
                KEY_TAG_NAME,
                &t!("version.subject.ncd_version"),
            ),
        }
    }

    /// Release notes of the latest release; QQ publishes none
    pub fn remote_changelog(&self, product: Product) -> Option<String> {
        match product {
            Product::NapCat => self.fetch_remote(
                &self.endpoints.napcat_release,
                KEY_BODY,
                &t!("version.subject.napcat_changelog"),
            ),
            Product::Ncd => self.fetch_remote(
                &self.endpoints.ncd_release,
                KEY_BODY,
                &t!("version.subject.ncd_changelog"),
            ),
            Product::Qq => {
                debug!("QQ has no changelog source");
                None
            }
        }
    }

    /// Installer URL for the latest QQ release
    pub fn download_url(&self) -> Option<String> {
        let subject = t!("version.subject.qq_download_url");
        info!("Fetching {}", subject);

        let endpoint = &self.endpoints.qq_version;
        let result = self
            .client
            .get_json_object(endpoint)
            .map_err(VersionError::from)
            .and_then(|object| {
                let version = required_field(&object, KEY_VERSION, endpoint)?;
                let ver_hash = required_field(&object, KEY_VER_HASH, endpoint)?;
                Ok(build_qq_download_url(&version, &ver_hash))
            });

        let url = match result {
            Ok(url) => Some(url),
            Err(e) => {
                self.report_failure(&subject, &e);
                None
            }
        };
        info!("Fetching {} finished", subject);
        url
    }

    /// Installed version.
    ///
    /// NCD is never read locally and is always `Ok(None)`. A missing install or version file is `Ok(None)`. A file that exists
    /// but cannot be read, is not JSON or lacks the key is an error.
    pub fn local_version(&self, product: Product) -> Result<Option<String>> {
        match product {
            Product::NapCat => {
                let path = self.paths.napcat_path().join(NAPCAT_PACKAGE_FILE);
                Ok(read_local_field(&path, KEY_VERSION)?.map(|v| format!("v{}", v)))
            }
            Product::Qq => {
                let Some(qq_path) = self.paths.qq_path() else {
                    debug!("QQ install path is not resolved");
                    return Ok(None);
                };
                let path = qq_path.join(QQ_VERSIONS_DIR).join(QQ_VERSION_CONFIG_FILE);
                read_local_field(&path, KEY_CUR_VERSION)
            }
            Product::Ncd => {
                debug!("NCD has no local version source");
                Ok(None)
            }
        }
    }

    /// Installed and latest version of `product`, compared
    pub fn report(&self, product: Product) -> VersionReport {
        let remote = self.remote_version(product);
        let (local, status) = match self.local_version(product) {
            Ok(local) => {
                let status = compare_versions(local.as_deref(), remote.as_deref());
                (local, status)
            }
            Err(e) => {
                warn!("Unable to read the installed {} version: {}", product, e);
                (None, UpdateStatus::Unknown)
            }
        };

        VersionReport {
            product,
            local,
            remote,
            status,
        }
    }

    /// Reports for every tracked product
    pub fn reports(&self) -> Vec<VersionReport> {
        Product::iter().map(|product| self.report(product)).collect()
    }

    fn report_failure(&self, subject: &str, err: &dyn Display) {
        self.notifier
            .error(&t!("version.fetch_failed", subject = subject));
        error!("Failed to fetch {}: {}", subject, err);
    }
}

fn required_field(object: &JsonObject, field: &str, source: &str) -> Result<String> {
    object
        .get_string(field)
        .ok_or_else(|| VersionError::MissingField {
            path: source.to_string(),
            field: field.to_string(),
        })
}

/// Reads `field` from a local JSON file, `Ok(None)` when the file is absent
fn read_local_field(path: &Path, field: &str) -> Result<Option<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{:?} does not exist", path);
            return Ok(None);
        }
        Err(e) => {
            return Err(VersionError::Io {
                path: path.display().to_string(),
                error: e.to_string(),
            })
        }
    };

    let object = match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(serde_json::Value::Object(map)) => JsonObject(map),
        Ok(_) => {
            return Err(VersionError::Malformed {
                path: path.display().to_string(),
                error: t!("http.not_an_object").to_string(),
            })
        }
        Err(e) => {
            return Err(VersionError::Malformed {
                path: path.display().to_string(),
                error: e.to_string(),
            })
        }
    };

    object
        .get_string(field)
        .map(Some)
        .ok_or_else(|| VersionError::MissingField {
            path: path.display().to_string(),
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationLevel;
    use crate::paths::InstallPaths;
    use crate::test::{
        spawn_test_server, take_error_logs, RecordingNotifier, TestRoute, TestServer,
    };
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    const NAPCAT_RELEASE: &str = r#"{"tag_name": "v4.1.0", "body": "- fixed login"}"#;
    const QQ_VERSION: &str = r#"{"version": "1.2.3-4", "verHash": "abcd1234"}"#;

    fn server() -> TestServer {
        spawn_test_server(vec![
            TestRoute::json("/napcat", NAPCAT_RELEASE),
            TestRoute::json("/ncd", r#"{"tag_name": "v1.5.0", "body": "ncd notes"}"#),
            TestRoute::json("/qq", QQ_VERSION),
            TestRoute::json("/empty", "{}"),
            TestRoute::status("/down", 500),
            TestRoute::text("/html", "<html>rate limited</html>"),
        ])
    }

    fn resolver_with(
        endpoints: Endpoints,
        paths: InstallPaths,
    ) -> (VersionResolver<InstallPaths>, Arc<RecordingNotifier>) {
        let notifier = RecordingNotifier::new();
        let client = HttpClient::new_with_timeout(Some(Duration::from_secs(5))).unwrap();
        let resolver = VersionResolver::new(client, paths, notifier.clone(), endpoints);
        (resolver, notifier)
    }

    fn endpoints(server: &TestServer) -> Endpoints {
        Endpoints {
            napcat_release: server.url("/napcat"),
            ncd_release: server.url("/ncd"),
            qq_version: server.url("/qq"),
        }
    }

    fn no_install() -> InstallPaths {
        InstallPaths::new("/nonexistent/napcat", None)
    }

    #[test]
    fn test_remote_versions_and_changelogs() {
        let server = server();
        let (resolver, notifier) = resolver_with(endpoints(&server), no_install());

        assert_eq!(resolver.remote_version(Product::NapCat), Some("v4.1.0".to_string()));
        assert_eq!(resolver.remote_version(Product::Ncd), Some("v1.5.0".to_string()));
        assert_eq!(resolver.remote_version(Product::Qq), Some("1.2.3-4".to_string()));
        assert_eq!(
            resolver.remote_changelog(Product::NapCat),
            Some("- fixed login".to_string())
        );
        assert_eq!(
            resolver.remote_changelog(Product::Ncd),
            Some("ncd notes".to_string())
        );
        assert_eq!(resolver.remote_changelog(Product::Qq), None);
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_missing_field_is_absent_without_notification() {
        let server = server();
        let (resolver, notifier) = resolver_with(endpoints(&server), no_install());

        assert_eq!(
            resolver.fetch_remote(&server.url("/empty"), KEY_TAG_NAME, "test"),
            None
        );
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_transport_failures_notify_once() {
        let server = server();
        let (resolver, notifier) = resolver_with(endpoints(&server), no_install());

        for url in [
            server.url("/down"),
            server.url("/html"),
            "http://127.0.0.1:1/".to_string(),
        ] {
            let before = notifier.count();
            assert_eq!(resolver.fetch_remote(&url, KEY_TAG_NAME, "test"), None);
            assert_eq!(notifier.count(), before + 1, "{}", url);
        }

        let received = notifier.received();
        assert!(received.iter().all(|n| n.level == NotificationLevel::Error));
        assert!(received[0].content.contains("test"));
    }

    #[test]
    fn test_remote_failures_log_one_error_each() {
        let server = server();
        let (resolver, _) = resolver_with(endpoints(&server), no_install());
        take_error_logs();

        for url in [
            server.url("/down"),
            server.url("/html"),
            "http://127.0.0.1:1/".to_string(),
        ] {
            assert_eq!(resolver.fetch_remote(&url, KEY_TAG_NAME, "test"), None);
            let logs = take_error_logs();
            assert_eq!(logs.len(), 1, "{}: {:?}", url, logs);
            assert!(logs[0].contains("Failed to fetch test"), "{:?}", logs);
        }

        // a missing field only warns
        assert_eq!(
            resolver.fetch_remote(&server.url("/empty"), KEY_TAG_NAME, "test"),
            None
        );
        assert!(take_error_logs().is_empty());

        for qq_version in [server.url("/down"), server.url("/empty")] {
            let mut endpoints = endpoints(&server);
            endpoints.qq_version = qq_version.clone();
            let (resolver, notifier) = resolver_with(endpoints, no_install());

            assert_eq!(resolver.download_url(), None);
            assert_eq!(take_error_logs().len(), 1, "{}", qq_version);
            assert_eq!(notifier.count(), 1, "{}", qq_version);
        }

        assert!(resolver.download_url().is_some());
        assert!(take_error_logs().is_empty());
    }

    #[test]
    fn test_download_url() {
        let server = server();
        let (resolver, notifier) = resolver_with(endpoints(&server), no_install());

        assert_eq!(
            resolver.download_url(),
            Some("https://dldir1.qq.com/qqfile/qq/QQNT/abcd1234/QQ1.2.3.4_x64.exe".to_string())
        );
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_download_url_missing_hash() {
        let server = server();
        let mut endpoints = endpoints(&server);
        endpoints.qq_version = server.url("/empty");
        let (resolver, notifier) = resolver_with(endpoints, no_install());

        assert_eq!(resolver.download_url(), None);
        assert_eq!(notifier.count(), 1);
    }

    #[test]
    fn test_build_qq_download_url() {
        assert_eq!(
            build_qq_download_url("1.2.3-4", "abcd1234"),
            "https://dldir1.qq.com/qqfile/qq/QQNT/abcd1234/QQ1.2.3.4_x64.exe"
        );
    }

    #[test]
    fn test_local_versions_absent() {
        let dir = TempDir::new().unwrap();
        let paths = InstallPaths::new(dir.path().join("NapCat"), Some(dir.path().join("QQ")));
        let (resolver, notifier) = resolver_with(Endpoints::default(), paths);

        assert_eq!(resolver.local_version(Product::NapCat).unwrap(), None);
        assert_eq!(resolver.local_version(Product::Qq).unwrap(), None);

        let (resolver, _) = resolver_with(Endpoints::default(), no_install());
        assert_eq!(resolver.local_version(Product::Qq).unwrap(), None);
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_local_versions_present() {
        let dir = TempDir::new().unwrap();
        let napcat = dir.path().join("NapCat");
        let qq = dir.path().join("QQ");
        std::fs::create_dir_all(&napcat).unwrap();
        std::fs::create_dir_all(qq.join("versions")).unwrap();
        std::fs::write(napcat.join("package.json"), r#"{"name": "napcat", "version": "4.0.3"}"#)
            .unwrap();
        std::fs::write(
            qq.join("versions").join("config.json"),
            r#"{"curVersion": "9.9.15-28131"}"#,
        )
        .unwrap();

        let (resolver, _) = resolver_with(Endpoints::default(), InstallPaths::new(napcat, Some(qq)));
        assert_eq!(
            resolver.local_version(Product::NapCat).unwrap(),
            Some("v4.0.3".to_string())
        );
        assert_eq!(
            resolver.local_version(Product::Qq).unwrap(),
            Some("9.9.15-28131".to_string())
        );
        assert_eq!(resolver.local_version(Product::Ncd).unwrap(), None);
    }

    #[test]
    fn test_local_version_malformed_is_an_error() {
        let dir = TempDir::new().unwrap();
        let napcat = dir.path().to_path_buf();
        std::fs::write(napcat.join("package.json"), "{ broken").unwrap();
        let (resolver, notifier) = resolver_with(Endpoints::default(), InstallPaths::new(&napcat, None));
        assert!(matches!(
            resolver.local_version(Product::NapCat),
            Err(VersionError::Malformed { .. })
        ));

        std::fs::write(napcat.join("package.json"), r#"{"name": "napcat"}"#).unwrap();
        assert!(matches!(
            resolver.local_version(Product::NapCat),
            Err(VersionError::MissingField { ref field, .. }) if field == "version"
        ));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_report() {
        let server = server();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"version": "4.0.3"}"#).unwrap();
        let paths = InstallPaths::new(PathBuf::from(dir.path()), None);
        let (resolver, _) = resolver_with(endpoints(&server), paths);

        let napcat = resolver.report(Product::NapCat);
        assert_eq!(napcat.local.as_deref(), Some("v4.0.3"));
        assert_eq!(napcat.remote.as_deref(), Some("v4.1.0"));
        assert_eq!(napcat.status, UpdateStatus::UpdateAvailable);

        let qq = resolver.report(Product::Qq);
        assert_eq!(qq.status, UpdateStatus::NotInstalled);

        let ncd = resolver.report(Product::Ncd);
        assert_eq!(ncd.local, None);
        assert_eq!(ncd.remote.as_deref(), Some("v1.5.0"));
        assert_eq!(ncd.status, UpdateStatus::NotInstalled);

        assert_eq!(resolver.reports().len(), 3);
    }
}
