//! Command helper utilities

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cli::GlobalArgs;
use crate::config::{self, Settings};
use crate::environment::{WorkingSet, discovery};
use crate::error::{Result, io_error};
use crate::metadata::{to_stable_json, write_json_file};
use crate::registry::RegistryContext;
use crate::requirement::convert_package_names;

/// Everything a command needs: settings, the environment and registries
#[derive(Debug)]
pub struct Session {
    pub settings: Settings,
    pub working_set: WorkingSet,
    pub registries: RegistryContext,
}

impl Session {
    /// Load settings and scan the configured site-packages directories
    ///
    /// Directories given on the command line are scanned after the
    /// configured ones.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let cwd = resolve_current_dir()?;
        let settings = config::load(global.config.as_deref(), &cwd)?;

        let mut site_packages = settings.site_packages.clone();
        site_packages.extend(global.site_packages.iter().map(|dir| absolutize(&cwd, dir)));
        if site_packages.is_empty() {
            tracing::warn!("no site-packages directories configured; the environment is empty");
        }

        let working_set =
            discovery::discover(&site_packages).with_markers(settings.markers.clone());
        tracing::debug!("{} distributions found", working_set.len());
        let registries = settings.registry_context();

        Ok(Self {
            settings,
            working_set,
            registries,
        })
    }
}

/// The working directory settings are looked up from
///
/// # Errors
///
/// Returns [`crate::error::CalmjsError::IoError`] when it cannot be read.
pub fn resolve_current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| io_error(format!("Failed to get current directory: {}", e)))
}

fn absolutize(cwd: &Path, dir: &Path) -> PathBuf {
    let dir = if dir.is_relative() {
        cwd.join(dir)
    } else {
        dir.to_path_buf()
    };
    dunce::canonicalize(&dir).unwrap_or(dir)
}

/// Keep the package names that parse as requirements, warning about the rest
pub fn package_names(names: &[String]) -> Vec<String> {
    let (valid, invalid) = convert_package_names(names);
    if !invalid.is_empty() {
        tracing::warn!("ignoring invalid package names: {}", invalid.join(", "));
    }
    valid
}

/// Print `value` as stable JSON, or write it to `output`
///
/// With `output`, a `None` value removes the file.
pub fn emit(value: Option<&Value>, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_json_file(path, value)?;
            match value {
                Some(_) => tracing::info!("wrote '{}'", path.display()),
                None => tracing::info!("nothing to write; removed '{}'", path.display()),
            }
        }
        None => {
            let empty = Value::Object(serde_json::Map::new());
            println!("{}", to_stable_json(value.unwrap_or(&empty))?);
        }
    }
    Ok(())
}
