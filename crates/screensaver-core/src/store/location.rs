//! Resolution of the per-user settings location.
//!
//! The settings file lives in the platform config directory for the
//! application, namespaced by publisher and application name:
//!
//! - Windows:  `%APPDATA%\Jonathan's Programma's\SpaceScreensaver\config\settings.json`
//! - Linux:    `$XDG_CONFIG_HOME/spacescreensaver/settings.json` (or `~/.config/...`)
//! - macOS:    `~/Library/Application Support/<bundle id>/settings.json`
//!
//! The resolved directory is returned as a plain value and passed into
//! [`ConfigStore::open`](super::config_store::ConfigStore::open) by the
//! caller.  Nothing here is cached in a global, so tests can point the store
//! at a temporary directory instead.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::config_store::ConfigError;

/// Application name used for the config directory.
pub const APP_NAME: &str = "SpaceScreensaver";
/// Publisher namespace used for the config directory.
pub const PUBLISHER: &str = "Jonathan's Programma's";
/// File name of the settings record inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Determines the platform-appropriate config directory for the screensaver.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when no home directory can be
/// determined from the environment.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", PUBLISHER, APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Full path of the settings file inside `dir`.
pub fn settings_file_in(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE_NAME)
}
