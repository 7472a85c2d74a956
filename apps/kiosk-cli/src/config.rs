//! # Kiosk Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db ./kiosk.db                                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     KIOSK_DB_PATH, KIOSK_CURRENCY, KIOSK_BACKUP_DIR                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or kiosk.toml in the platform config dir          │
//! │     ~/.config/kiosk/kiosk.toml (Linux)                                 │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! db_path = "/srv/kiosk/kiosk.db"
//!
//! [display]
//! currency_symbol = "KSh"
//!
//! [backup]
//! dir = "/media/usb"
//! file_name = "kiosk-backup.json"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "kiosk.toml";
pub const DATABASE_FILE_NAME: &str = "kiosk.db";
pub const DEFAULT_BACKUP_FILE_NAME: &str = "kiosk-backup.json";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "KSh";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Default: `kiosk.db` in the platform data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for printed amounts, e.g. `"KSh"` → `KSh 12.50`.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Directory backups are written to. Default: the working directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_backup_file_name")]
    pub file_name: String,
}

fn default_backup_file_name() -> String {
    DEFAULT_BACKUP_FILE_NAME.to_string()
}

impl Default for BackupSettings {
    fn default() -> Self {
        BackupSettings {
            dir: None,
            file_name: default_backup_file_name(),
        }
    }
}

// =============================================================================
// Kiosk Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub backup: BackupSettings,
}

impl KioskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path` if given (must exist), else `kiosk.toml`
    ///    in the platform config directory (optional)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load kiosk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading kiosk config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let file_name = self.backup.file_name.trim();
        if file_name.is_empty() {
            return Err(ConfigError::Invalid(
                "backup.file_name must not be empty".into(),
            ));
        }
        if file_name.contains('/') || file_name.contains('\\') {
            return Err(ConfigError::Invalid(format!(
                "backup.file_name must be a bare file name, got: {}",
                file_name
            )));
        }
        Ok(())
    }

    /// Applies `KIOSK_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("KIOSK_DB_PATH").filter(|v| !v.is_empty()) {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("KIOSK_CURRENCY") {
            self.display.currency_symbol = symbol;
        }

        if let Some(dir) = lookup("KIOSK_BACKUP_DIR").filter(|v| !v.is_empty()) {
            debug!(dir = %dir, "Overriding backup directory from environment");
            self.backup.dir = Some(PathBuf::from(dir));
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "kiosk", "kiosk")
    }

    /// `kiosk.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolved database file.
    ///
    /// ## Platform Defaults
    /// - **Linux**: `~/.local/share/kiosk/kiosk.db`
    /// - **macOS**: `~/Library/Application Support/com.kiosk.kiosk/kiosk.db`
    /// - **Windows**: `%APPDATA%\kiosk\kiosk\data\kiosk.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Where `backup` writes when no `--out` is given.
    pub fn backup_path(&self) -> PathBuf {
        let dir = self
            .backup
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(self.backup.file_name.trim())
    }

    pub fn currency_symbol(&self) -> &str {
        &self.display.currency_symbol
    }
}
