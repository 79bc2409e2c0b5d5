use log::{debug, error, info};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::error::{StoreError, StoreResult};
use super::types::AppSettings;
use crate::connect::ConnectConfig;
use crate::constants::{APP_NAME, NAPCAT_CONFIG_DIR, SETTINGS_FILE_NAME};

/// Loads and saves [`AppSettings`] from a JSON file
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: AppSettings,
}

impl SettingsStore {
    /// `<config dir>/napcat-desktop/settings.json`
    pub fn default_path() -> StoreResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(SETTINGS_FILE_NAME))
            .ok_or(StoreError::ConfigDir)
    }

    pub fn load_default() -> StoreResult<Self> {
        Self::load(Self::default_path()?)
    }

    /// Loads the store at `path`; a missing file yields default settings
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let settings = read_json::<AppSettings>(&path)?.unwrap_or_else(|| {
            debug!("No settings file at {:?}, using defaults", path);
            AppSettings::default()
        });
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the settings file, also used for logs
    pub fn data_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Applies `change` and persists the result
    pub fn update<F>(&mut self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut AppSettings),
    {
        change(&mut self.settings);
        self.save()
    }

    pub fn save(&self) -> StoreResult<()> {
        write_json(&self.path, &self.settings)?;
        info!("Settings saved to {:?}", self.path);
        Ok(())
    }
}

/// `<napcat>/config/onebot11_<uin>.json`
pub fn onebot_config_path(napcat_path: &Path, uin: &str) -> PathBuf {
    napcat_path
        .join(NAPCAT_CONFIG_DIR)
        .join(format!("onebot11_{}.json", uin))
}

/// Reads the connection section of an account's OneBot config.
///
/// Returns `Ok(None)` when the account has no config file yet.
pub fn load_connect_config(napcat_path: &Path, uin: &str) -> StoreResult<Option<ConnectConfig>> {
    read_json::<ConnectConfig>(&onebot_config_path(napcat_path, uin))
}

/// Writes the connection section of an account's OneBot config.
///
/// Keys other than `http`, `ws` and `reverseWs` already present in the file
/// are preserved.
pub fn save_connect_config(
    napcat_path: &Path,
    uin: &str,
    config: &ConnectConfig,
) -> StoreResult<()> {
    let path = onebot_config_path(napcat_path, uin);
    let mut document = match read_json::<Value>(&path)? {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };

    if let Value::Object(section) = serde_json::to_value(config).map_err(|e| StoreError::serde(&path, e))? {
        for (key, value) in section {
            document.insert(key, value);
        }
    }

    write_json(&path, &Value::Object(document))?;
    info!("OneBot config for {} saved to {:?}", uin, path);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            error!("Failed to read {:?}: {}", path, e);
            return Err(StoreError::io(path, e));
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| {
            error!("Failed to parse {:?}: {}", path, e);
            StoreError::serde(path, e)
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let content = serde_json::to_string_pretty(value).map_err(|e| StoreError::serde(path, e))?;

    // write to a sibling first so a crash never leaves a truncated file
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, content).map_err(|e| StoreError::io(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))
}
