//! Configuration store for window settings and persisted key bindings.
//!
//! The whole file is one TOML document. Missing files and missing sections
//! fall back to defaults; saving rewrites the document in full.

use crate::keys::{KeyBindings, KeyboardControllerConfig};
use panelpop_core::{PanelPopError, Player, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "panelpop";
const CONFIG_FILE: &str = "config.toml";

/// Supplies and persists per-player key bindings
pub trait ConfigService {
    fn key_config(&self, player: Player) -> KeyboardControllerConfig;

    /// Store and persist one player's bindings
    fn store_key_config(&mut self, player: Player, config: &KeyboardControllerConfig)
        -> Result<()>;

    /// Store and persist both players' bindings
    fn store_key_configs(&mut self, bindings: &KeyBindings) -> Result<()> {
        for player in Player::ALL {
            self.store_key_config(player, bindings.get(player))?;
        }
        Ok(())
    }
}

/// Window settings read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// TTF used for overlay and menu text, the bundled font when unset
    pub font: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "panel-pop".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
            font: None,
            font_size: 16.0,
        }
    }
}

/// On-disk layout of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub keys: KeyBindings,
}

/// `<config dir>/panelpop/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// TOML-file backed [`ConfigService`]
pub struct TomlConfigStore {
    path: PathBuf,
    file: ConfigFile,
}

impl TomlConfigStore {
    /// Load the store from `path`. A missing file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: ConfigFile = toml::from_str(&content).map_err(|e| {
                PanelPopError::ConfigError(format!(
                    "Failed to parse config {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!(path = %path.display(), "loaded config");
            file
        } else {
            info!(path = %path.display(), "no config file, using defaults");
            ConfigFile::default()
        };
        Ok(Self { path, file })
    }

    /// Open the store at [`default_config_path`]
    pub fn open_default() -> Result<Self> {
        let path = default_config_path().ok_or_else(|| {
            PanelPopError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &ConfigFile {
        &self.file
    }

    pub fn window(&self) -> &WindowConfig {
        &self.file.window
    }

    /// Write the document back to disk, creating parent directories
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.file)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

impl ConfigService for TomlConfigStore {
    fn key_config(&self, player: Player) -> KeyboardControllerConfig {
        *self.file.keys.get(player)
    }

    fn store_key_config(
        &mut self,
        player: Player,
        config: &KeyboardControllerConfig,
    ) -> Result<()> {
        self.file.keys.set(player, *config);
        self.save()
    }

    /// One write for both players, so the file never holds half an update
    fn store_key_configs(&mut self, bindings: &KeyBindings) -> Result<()> {
        self.file.keys = *bindings;
        self.save()
    }
}

/// Config service that never touches the filesystem
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfig {
    pub bindings: KeyBindings,
    /// Number of successful `store_key_config` calls
    pub stores: usize,
}

impl InMemoryConfig {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            stores: 0,
        }
    }
}

impl ConfigService for InMemoryConfig {
    fn key_config(&self, player: Player) -> KeyboardControllerConfig {
        *self.bindings.get(player)
    }

    fn store_key_config(
        &mut self,
        player: Player,
        config: &KeyboardControllerConfig,
    ) -> Result<()> {
        self.bindings.set(player, *config);
        self.stores += 1;
        Ok(())
    }
}
