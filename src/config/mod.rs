mod shortcuts;

pub use shortcuts::{shortcuts_template, ShortcutMap};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::BaseDirs;

use crate::error::{NavError, Result};

const CONFIG_DIR: &str = "lot-focus";
const MAIN_CONFIG_FILE: &str = "config.toml";
const SHORTCUTS_FILE: &str = "shortcuts.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    shortcuts: ShortcutMap,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(Self::get_config_dir()?))
    }

    /// Load from an explicit directory instead of the platform default.
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let app_config = Self::load_toml_file(&config_dir.join(MAIN_CONFIG_FILE)).unwrap_or_default();
        let shortcuts: ShortcutMap =
            Self::load_toml_file(&config_dir.join(SHORTCUTS_FILE)).unwrap_or_default();

        Self {
            config_dir,
            app_config,
            shortcuts,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| NavError::Config("Could not determine config directory".to_string()))
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| NavError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    pub fn write_default_configs(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| NavError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)?;
        }

        let shortcuts_path = self.config_dir.join(SHORTCUTS_FILE);
        if !shortcuts_path.exists() {
            std::fs::write(&shortcuts_path, shortcuts_template())?;
        }

        Ok(())
    }
}

/// Strictly read a shortcut file named on the command line. Unlike the
/// config directory files, a missing or malformed file is an error.
pub fn read_shortcuts(path: &Path) -> Result<ShortcutMap> {
    if !path.exists() {
        return Err(NavError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| NavError::Config(format!("{}: {}", path.display(), e)))
}
