//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where `export` writes the customer CSV unless `--output` is given.
    pub export_path: PathBuf,

    /// `chrono` format string for session dates in the training list.
    pub date_format: String,

    /// Skip the confirmation prompt before deletes.
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from("customers.csv"),
            date_format: "%d.%m.%Y %H:%M".to_string(),
            assume_yes: false,
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

        // Load from environment variables (PT_*)
        figment = figment.merge(Env::prefixed("PT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for pt.
///
/// On Linux: `~/.config/pt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pt"))
}
