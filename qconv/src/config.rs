//! Data directory and user settings
//!
//! Everything lives under one directory, `$QCONV_DATA_PATH` or `qconv`
//! inside the platform config directory:
//! - `settings.json`: decimal places and default currency
//! - `rates.json`: exchange-rate cache
//! - `units.txt`: custom unit definitions

use qconv_currency::{is_supported, RateCache};
use qconv_units::{UnitError, UnitRegistry};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATA_PATH_ENV: &str = "QCONV_DATA_PATH";

/// Copied to `units.txt` the first time it is needed
pub const CUSTOM_UNITS_TEMPLATE: &str = include_str!("../assets/units.txt.sample");

const SETTINGS_FILE: &str = "settings.json";
const RATES_FILE: &str = "rates.json";
const UNITS_FILE: &str = "units.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Currency not found : {0}")]
    UnknownCurrency(String),

    #[error(transparent)]
    Units(#[from] UnitError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Root of the per-user data files
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDir { root: root.into() }
    }

    /// `$QCONV_DATA_PATH`, else `qconv` under the platform config directory
    pub fn from_env() -> Self {
        let root = env::var(DATA_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_root());
        DataDir::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn rates_path(&self) -> PathBuf {
        self.root.join(RATES_FILE)
    }

    pub fn units_path(&self) -> PathBuf {
        self.root.join(UNITS_FILE)
    }

    /// Exchange-rate cache backed by `rates.json`
    pub fn rate_cache(&self) -> RateCache {
        RateCache::new(self.rates_path())
    }

    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Settings::load(&self.settings_path())
    }

    /// Path of the custom units file, creating it from the template if missing.
    pub fn provision_units(&self) -> Result<PathBuf, ConfigError> {
        let path = self.units_path();
        if !path.exists() {
            fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
            fs::write(&path, CUSTOM_UNITS_TEMPLATE).map_err(io_error(&path))?;
            tracing::info!("created custom units file {}", path.display());
        }
        Ok(path)
    }

    /// Built-in units plus the user's custom definitions.
    pub fn unit_registry(&self) -> Result<UnitRegistry, ConfigError> {
        let mut registry = UnitRegistry::new();
        let path = self.provision_units()?;
        registry.load_definitions_file(&path)?;
        Ok(registry)
    }
}

fn default_root() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("qconv"))
        .unwrap_or_else(|| PathBuf::from(".qconv"))
}

/// Persisted user preferences; missing fields take their defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Digits after the decimal point in formatted results
    pub decimal_places: u32,
    /// Target used when a currency query names no target
    pub default_currency: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            decimal_places: crate::DEFAULT_DECIMAL_PLACES,
            default_currency: None,
        }
    }
}

impl Settings {
    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(path).map_err(io_error(path))?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write pretty JSON, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_error(path))
    }

    /// Set (or with "none", clear) the default target currency.
    pub fn set_default_currency(&mut self, code: &str) -> Result<Option<&str>, ConfigError> {
        let code = code.trim().to_uppercase();
        if code == "NONE" {
            self.default_currency = None;
        } else if is_supported(&code) {
            self.default_currency = Some(code);
        } else {
            return Err(ConfigError::UnknownCurrency(code));
        }
        tracing::debug!("default currency: {:?}", self.default_currency);
        Ok(self.default_currency.as_deref())
    }
}
