//! Centralized path utilities
//!
//! All application paths in one place for consistency

use std::path::PathBuf;

use crate::constants::{storage, ui};

/// Get the loftbook config directory (~/.loftbook)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ui::CONFIG_DIR_NAME)
}

/// Get the logs directory (~/.loftbook/logs)
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Get the skills database path (~/.loftbook/loftbook.db)
pub fn database_path() -> PathBuf {
    config_dir().join("loftbook.db")
}

/// Get the on-device row cache path (~/.loftbook/skills-table-v1.json)
pub fn cache_path() -> PathBuf {
    config_dir().join(format!("{}.json", storage::CACHE_KEY))
}
