//! Configuration loading.
//!
//! Settings live in a TOML file, by default `~/.config/weekly-report.toml`.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    GitLabSettings, ReportSettings, Settings, SmtpSettings, DEFAULT_SUBJECT_FORMAT,
    GITLAB_TOKEN_ENV, SMTP_PASSWORD_ENV,
};

use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the configuration inside `~/.config`.
pub const CONFIG_FILE_NAME: &str = "weekly-report.toml";

/// Returns `~/.config/weekly-report.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory is unknown.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".config").join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Loads settings from `path`, or from [`default_config_path`] when `None`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be loaded or is invalid.
pub fn load_settings(
    path: Option<&Path>,
    token_override: Option<&str>,
) -> Result<Settings, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    info!(path = %path.display(), "Loading configuration");
    Settings::load(&path, token_override)
}

/// Renders [`Settings::example`] as TOML.
#[must_use]
pub fn example_config() -> String {
    toml::to_string_pretty(&Settings::example()).unwrap_or_default()
}
