// modules
pub mod connect;
pub mod constants;
pub mod error;
pub mod http;
mod libs;
mod logger;
pub mod notify;
pub mod paths;
pub mod settings;
pub mod version;


use rust_i18n::{i18n, set_locale};
use std::sync::Arc;

use crate::error::Result;
use crate::http::HttpClient;
use crate::libs::lang::resolve_language;
use crate::logger::setup_logger;
use crate::notify::NotificationCenter;
use crate::paths::InstallPaths;
use crate::settings::SettingsStore;
use crate::version::{Endpoints, VersionReport, VersionResolver};

pub use crate::libs::lang::{get_available_lang, get_system_locale};

// Initialize internationalization with the "i18n" directory
// - Base directory is the crate root, so this will look for translations in i18n/
i18n!("i18n", fallback = "en");

/// Everything a UI shell needs, wired from the persisted settings
pub struct AppContext {
    pub settings: SettingsStore,
    pub notifications: Arc<NotificationCenter>,
    pub resolver: VersionResolver<InstallPaths>,
}

impl AppContext {
    /// Builds the context from an opened settings store.
    ///
    /// Applies the interface language and creates the version resolver with
    /// the configured paths, endpoints and timeout.
    pub fn new(settings: SettingsStore) -> Result<Self> {
        let language = resolve_language(&settings.settings().language());
        set_locale(&language);
        log::info!("Interface language set to {}", language);

        let notifications = Arc::new(NotificationCenter::new());
        let client = HttpClient::new_with_timeout(settings.settings().request_timeout())?;
        let resolver = VersionResolver::new(
            client,
            InstallPaths::from_settings(settings.settings()),
            notifications.clone(),
            Endpoints::from_settings(&settings.settings().endpoints),
        );

        Ok(Self {
            settings,
            notifications,
            resolver,
        })
    }
}

/// The entry point for the headless application.
///
/// Loads settings, sets up logging, then prints the installed and latest
/// versions of every product and the QQ installer URL.
pub fn run() -> Result<()> {
    let settings = SettingsStore::load_default()?;
    setup_logger(&settings.data_dir().join("logs"))?;
    log::info!("Settings loaded from {:?}", settings.path());

    let context = AppContext::new(settings)?;
    for report in context.resolver.reports() {
        println!("{}", format_report(&report));
    }
    if let Some(url) = context.resolver.download_url() {
        println!("QQ installer: {}", url);
    }

    for notification in context.notifications.drain() {
        eprintln!("[{}] {}", notification.title, notification.content);
    }
    Ok(())
}

fn format_report(report: &VersionReport) -> String {
    format!(
        "{:<8} installed: {:<16} latest: {:<16} {}",
        report.product.to_string(),
        report.local.as_deref().unwrap_or("-"),
        report.remote.as_deref().unwrap_or("-"),
        report.status
    )
}
