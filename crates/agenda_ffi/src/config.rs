//! Process-wide FFI configuration.
//!
//! Resolved once from the environment on first use; later changes to the
//! environment are not observed.

use agenda_core::default_log_level;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_PATH_ENV: &str = "INSTAGENDA_DB_PATH";
const LOG_LEVEL_ENV: &str = "INSTAGENDA_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "instagenda.sqlite3";

static CONFIG: OnceLock<AgendaConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// SQLite file backing every DB-touching call.
    pub db_path: PathBuf,
    /// Level used when `init_logging` is called without one.
    pub log_level: String,
}

impl AgendaConfig {
    /// Builds a config from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

/// Returns the process config, reading the environment on first call.
pub fn config() -> &'static AgendaConfig {
    CONFIG.get_or_init(|| AgendaConfig::from_lookup(|key| std::env::var(key).ok()))
}
