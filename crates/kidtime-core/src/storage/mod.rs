mod config;
pub mod database;
mod store;

pub use config::{Config, ReminderConfig, TickerConfig};
pub use database::Database;
pub use store::{HistoryStore, MemoryStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the directory holding `kidtime.db` and `config.toml`.
///
/// `KIDTIME_HOME` wins when set. Otherwise `~/.config/kidtime[-dev]/`,
/// with the `-dev` suffix when `KIDTIME_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("KIDTIME_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("KIDTIME_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("kidtime-dev")
            } else {
                base_dir.join("kidtime")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
