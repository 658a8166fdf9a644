//! Settings file (calmjs.yaml) data structures

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::RegistryConfig;
use crate::error::{Result, config_invalid, config_parse_failed, config_read_failed};
use crate::metadata::{DEFAULT_JSON, DEP_KEYS};
use crate::registry::{EXTRAS_KEYS_REGISTRY, ExtrasKeysRegistry, NODE_MODULES, RegistryContext};
use crate::requirement::MarkerEnvironment;

fn default_filename() -> String {
    DEFAULT_JSON.to_string()
}

fn default_dep_keys() -> Vec<String> {
    DEP_KEYS.iter().map(|key| (*key).to_string()).collect()
}

fn default_extras_keys() -> Vec<String> {
    vec![NODE_MODULES.to_string()]
}

/// Settings (calmjs.yaml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directories scanned for installed distributions, earliest first
    #[serde(default)]
    pub site_packages: Vec<PathBuf>,

    /// Metadata file holding each package's dependency document
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Dependency groups flattened by default
    #[serde(default = "default_dep_keys")]
    pub dep_keys: Vec<String>,

    /// Groups merged when flattening extras
    #[serde(default = "default_extras_keys")]
    pub extras_keys: Vec<String>,

    /// Statically declared registries, by key
    #[serde(default)]
    pub registries: BTreeMap<String, RegistryConfig>,

    /// Interpreter that environment markers are evaluated against
    #[serde(default)]
    pub markers: MarkerEnvironment,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_packages: Vec::new(),
            filename: default_filename(),
            dep_keys: default_dep_keys(),
            extras_keys: default_extras_keys(),
            registries: BTreeMap::new(),
            markers: MarkerEnvironment::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML string
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CalmjsError::ConfigParseFailed`] for malformed
    /// YAML or an unknown field, and
    /// [`crate::error::CalmjsError::ConfigInvalid`] when validation fails.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `path`
    ///
    /// Relative `site_packages` entries are taken relative to the directory
    /// holding the file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, parsed, or validated; the error
    /// names the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        let mut settings: Self = serde_yaml::from_str(&contents)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        settings.validate()?;

        if let Some(base) = path.parent() {
            settings.site_packages = settings
                .site_packages
                .into_iter()
                .map(|dir| if dir.is_relative() { base.join(dir) } else { dir })
                .map(|dir| dunce::canonicalize(&dir).unwrap_or(dir))
                .collect();
        }
        Ok(settings)
    }

    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CalmjsError::ConfigInvalid`] describing the
    /// first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(config_invalid("filename cannot be empty"));
        }
        if self.filename.contains(['/', '\\']) {
            return Err(config_invalid(format!(
                "filename '{}' must be a bare file name",
                self.filename
            )));
        }
        if let Some(key) = self.dep_keys.iter().find(|key| key.trim().is_empty()) {
            return Err(config_invalid(format!("invalid dependency key '{key}'")));
        }
        if self.registries.contains_key(EXTRAS_KEYS_REGISTRY) {
            return Err(config_invalid(format!(
                "'{EXTRAS_KEYS_REGISTRY}' is built from extras_keys and cannot be declared"
            )));
        }
        Ok(())
    }

    /// Build the registry context declared by these settings
    ///
    /// Always holds the default registries; declared registries are added
    /// on top.
    pub fn registry_context(&self) -> RegistryContext {
        let mut context = RegistryContext::with_defaults();
        context.register(
            EXTRAS_KEYS_REGISTRY,
            ExtrasKeysRegistry::new(self.extras_keys.iter().cloned()),
        );
        for (key, registry) in &self.registries {
            registry.register_into(&mut context, key);
        }
        context
    }
}
