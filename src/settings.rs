use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LibraryError, Result};

/// Settings file used when `LIBRARY_CONFIG` is unset
const DEFAULT_CONFIG_FILE: &str = "config/library.toml";
/// Environment variable naming an alternative settings file
const CONFIG_FILE_ENV: &str = "LIBRARY_CONFIG";
/// Prefix of environment overrides, e.g. `LIBRARY_HISTORY_LIMIT`
const ENV_PREFIX: &str = "LIBRARY";

/// Runtime settings, layered from an optional TOML file and the environment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibrarySettings {
    /// Maximum number of loan records kept in the history
    #[serde(default = "LibrarySettings::default_history_limit")]
    pub history_limit: usize,
    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "LibrarySettings::default_log_filter")]
    pub log_filter: String,
}

impl LibrarySettings {
    /// Load settings from `LIBRARY_CONFIG` (or `config/library.toml`) and `LIBRARY_*` variables
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if a source cannot be read or holds a value of the wrong type.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_FILE_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        Self::load_from(&path)
    }

    /// Load settings from `path`, which may be missing, then apply `LIBRARY_*` variables
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if a source cannot be read or holds a value of the wrong type.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layered(path, Some(Self::environment()))
    }

    /// Overrides taken from `LIBRARY_*` process environment variables
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)
    }

    /// Layer the optional file at `path` under `environment`, if given
    fn load_layered(path: &Path, environment: Option<config::Environment>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false));
        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }

        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Self>())
            .map_err(|e| LibraryError::Config(e.to_string()))
    }

    /// Default history size
    fn default_history_limit() -> usize {
        100
    }

    /// Default tracing filter
    fn default_log_filter() -> String {
        "info".to_string()
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            history_limit: Self::default_history_limit(),
            log_filter: Self::default_log_filter(),
        }
    }
}
