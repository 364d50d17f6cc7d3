mod config;
pub mod database;

pub use config::{Config, DisplayConfig, NotificationsConfig, StorageConfig, TimerConfig};
pub use database::{Database, KvSlot};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `STUDYREST_DATA_DIR` wins when set. Otherwise `~/.config/studyrest`, or
/// `~/.config/studyrest-dev` with `STUDYREST_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYREST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYREST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyrest-dev")
            } else {
                base_dir.join("studyrest")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
