use crate::{logging, MappingError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = ".mapping-debug.toml";

/// Environment variable overriding the settings path.
pub const SETTINGS_ENV: &str = "MAPPING_DEBUG_SETTINGS";

/// Keys stored per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKey {
    /// Path of the line map last loaded for the context.
    SourceMap,
    /// Root folder of the original, untransformed sources.
    RootPath,
}

/// Settings persisted for one generated script or page, keyed by URL.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContextSettings {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,
}

impl ContextSettings {
    pub fn get(&self, key: ContextKey) -> Option<&str> {
        match key {
            ContextKey::SourceMap => self.source_map.as_deref(),
            ContextKey::RootPath => self.root_path.as_deref(),
        }
    }

    fn slot_mut(&mut self, key: ContextKey) -> &mut Option<String> {
        match key {
            ContextKey::SourceMap => &mut self.source_map,
            ContextKey::RootPath => &mut self.root_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputSettings {
    /// Default output format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,
}

/// Settings object passed to whatever needs it; nothing is cached globally.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default, rename = "context")]
    pub contexts: Vec<ContextSettings>,
}

impl Settings {
    /// Resolve the settings path: explicit path, then the environment, then
    /// the project file if present, then the user config directory.
    pub fn default_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return PathBuf::from(path);
        }

        let local = PathBuf::from(DEFAULT_SETTINGS_FILE);
        if local.exists() {
            return local;
        }

        dirs::config_dir()
            .map(|dir| dir.join("mapping-debug").join("settings.toml"))
            .unwrap_or(local)
    }

    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MappingError::FileError(format!("Failed to read settings file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            MappingError::ConfigError(format!(
                "Failed to parse TOML settings from {:?}: {}",
                path, e
            ))
        })
    }

    /// Load settings, falling back to defaults when the file is unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Warning: Failed to load settings: {}. Using defaults.", e);
                Settings::default()
            }
        }
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), MappingError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                MappingError::FileError(format!(
                    "Failed to create settings directory {:?}: {}",
                    parent, e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MappingError::ConfigError(format!("Failed to serialize settings: {}", e))
        })?;
        fs::write(path, content).map_err(|e| {
            MappingError::FileError(format!("Failed to write settings file {:?}: {}", path, e))
        })?;

        logging::log_settings_saved(&path.to_string_lossy());
        Ok(())
    }

    pub fn context(&self, url: &str) -> Option<&ContextSettings> {
        self.contexts.iter().find(|block| block.url == url)
    }

    /// Settings block for `url`, created empty if missing.
    pub fn context_mut(&mut self, url: &str) -> &mut ContextSettings {
        let index = match self.contexts.iter().position(|block| block.url == url) {
            Some(index) => index,
            None => {
                self.contexts.push(ContextSettings {
                    url: url.to_string(),
                    ..ContextSettings::default()
                });
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[index]
    }

    pub fn get_for_context(&self, url: &str, key: ContextKey) -> Option<&str> {
        self.context(url).and_then(|block| block.get(key))
    }

    /// Set (or clear, with `None`) a value. Returns whether anything changed.
    pub fn set_for_context(&mut self, url: &str, key: ContextKey, value: Option<String>) -> bool {
        let slot = self.context_mut(url).slot_mut(key);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }
}
