//! Registries declared in the settings file

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{ModuleRegistry, RegistryContext};

/// A statically declared module registry
///
/// The extras keys registry is not declared here; it is built from the
/// `extras_keys` setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Python module name to JavaScript module name to location
    #[serde(default)]
    pub modules: BTreeMap<String, BTreeMap<String, String>>,

    /// Package name to the Python modules it provides
    #[serde(default)]
    pub packages: BTreeMap<String, Vec<String>>,
}

impl RegistryConfig {
    pub fn to_registry(&self) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        for (module, exports) in &self.modules {
            registry.add_module(module.clone(), exports.clone());
        }
        for (package, modules) in &self.packages {
            registry.add_package(package, modules.iter().cloned());
        }
        registry
    }

    pub(crate) fn register_into(&self, context: &mut RegistryContext, key: &str) {
        context.register(key, self.to_registry());
    }
}
