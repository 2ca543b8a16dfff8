//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the state database file.
    pub database_path: PathBuf,
    /// How often `tenk watch` redraws, in milliseconds.
    pub refresh_interval_ms: u64,
    /// Practice goal in hours.
    pub goal_hours: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("refresh_interval_ms", &self.refresh_interval_ms)
            .field("goal_hours", &self.goal_hours)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("tenk.db"),
            refresh_interval_ms: 250,
            goal_hours: 10_000,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TENK_*)
        figment = figment.merge(Env::prefixed("TENK_"));

        figment.extract()
    }

    /// The goal expressed in seconds.
    pub const fn goal_seconds(&self) -> u64 {
        self.goal_hours.saturating_mul(3600)
    }
}

/// Returns the platform-specific config directory for tenk.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tenk"))
}

/// Returns the platform-specific data directory for tenk.
///
/// On Linux: `~/.local/share/tenk`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("tenk"))
}
