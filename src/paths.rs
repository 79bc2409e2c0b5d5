//! Install path resolution for NapCat and QQ
//!
//! The version resolver only sees the [`PathResolver`] trait, so the shell
//! can hand it configured paths, detected paths or, in tests, a temp dir.

use std::path::PathBuf;

use crate::constants::{DEFAULT_QQ_INSTALL_DIR, NAPCAT_DIR_NAME};
use crate::settings::AppSettings;

/// Answers where the managed products are installed
pub trait PathResolver: Send + Sync {
    /// NapCat install directory; it may not exist yet
    fn napcat_path(&self) -> PathBuf;

    /// QQ install directory, `None` when QQ is not installed
    fn qq_path(&self) -> Option<PathBuf>;
}

/// Paths fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    napcat: PathBuf,
    qq: Option<PathBuf>,
}

impl InstallPaths {
    pub fn new(napcat: impl Into<PathBuf>, qq: Option<PathBuf>) -> Self {
        Self {
            napcat: napcat.into(),
            qq,
        }
    }

    /// Uses the configured overrides, detecting whatever is not configured
    pub fn from_settings(settings: &AppSettings) -> Self {
        let napcat = settings
            .napcat_path
            .clone()
            .unwrap_or_else(default_napcat_path);
        let qq = settings.qq_path.clone().or_else(detect_qq_path);
        log::debug!("Resolved install paths: napcat={:?}, qq={:?}", napcat, qq);
        Self { napcat, qq }
    }
}

impl PathResolver for InstallPaths {
    fn napcat_path(&self) -> PathBuf {
        self.napcat.clone()
    }

    fn qq_path(&self) -> Option<PathBuf> {
        self.qq.clone()
    }
}

/// `NapCat` next to the running executable, or under the working directory
fn default_napcat_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(NAPCAT_DIR_NAME)))
        .or_else(|| {
            std::env::current_dir()
                .ok()
                .map(|dir| dir.join(NAPCAT_DIR_NAME))
        })
        .unwrap_or_else(|| PathBuf::from(NAPCAT_DIR_NAME))
}

/// The standard QQNT install location, when present
fn detect_qq_path() -> Option<PathBuf> {
    let candidate = PathBuf::from(DEFAULT_QQ_INSTALL_DIR);
    candidate.is_dir().then_some(candidate)
}
