//! Configuration file handling for calmjs
//!
//! This module contains:
//! - [`Settings`], the contents of `calmjs.yaml`
//! - [`RegistryConfig`], module registries declared statically in that file
//! - [`locate`], the lookup of the settings file

pub mod registries;
pub mod settings;

use std::path::{Path, PathBuf};

pub use registries::RegistryConfig;
pub use settings::Settings;

use crate::error::{Result, config_not_found};

/// Settings file name
pub const CONFIG_FILE: &str = "calmjs.yaml";

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "CALMJS_CONFIG";

/// Find the settings file to load
///
/// An explicit path must exist. Otherwise `./calmjs.yaml` is tried, then
/// `calmjs/calmjs.yaml` under the user config directory. `Ok(None)` means
/// no file was found and defaults apply.
///
/// # Errors
///
/// Returns [`crate::error::CalmjsError::ConfigNotFound`] when an explicit
/// path does not exist.
pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(config_not_found(path.display().to_string()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("calmjs").join(CONFIG_FILE);
        if user.is_file() {
            return Ok(Some(user));
        }
    }

    Ok(None)
}

/// Locate and load settings, falling back to defaults
///
/// # Errors
///
/// Fails when an explicit path is missing or the file found cannot be read,
/// parsed, or validated.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Settings> {
    match locate(explicit, cwd)? {
        Some(path) => {
            tracing::debug!("loading settings from '{}'", path.display());
            Settings::load(&path)
        }
        None => {
            tracing::debug!("no {} found; using defaults", CONFIG_FILE);
            Ok(Settings::default())
        }
    }
}
