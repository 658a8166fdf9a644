//! Named registries consulted during flattening
//!
//! This module provides:
//! - [`RegistryContext`], the explicit collection of registries passed into
//!   every call that needs one
//! - [`RegistryEntry`] and the optional [`PackageRecordsProvider`] capability
//! - [`ModuleRegistry`] and [`ExtrasKeysRegistry`]
//! - The bridge functions merging per-package records over a closure

pub mod bridge;
pub mod extras;
pub mod module;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub use bridge::{flatten_registry_dependencies, registry_dependencies};
pub use extras::ExtrasKeysRegistry;
pub use module::ModuleRegistry;

/// Default key of the module registry
pub const MODULE_REGISTRY: &str = "calmjs.module";
/// Key of the registry listing the extras keys to flatten
pub const EXTRAS_KEYS_REGISTRY: &str = "calmjs.extras_keys";
/// Extras key seeded into the default extras keys registry
pub const NODE_MODULES: &str = "node_modules";

/// A registry of string records
pub trait RegistryEntry: fmt::Debug {
    /// Record keys in a stable order
    fn iter_records(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Per-package record lookup, for registries that support it
    fn as_package_records(&self) -> Option<&dyn PackageRecordsProvider> {
        None
    }
}

/// Registries that can report the records contributed by a package
pub trait PackageRecordsProvider {
    /// Records contributed by `package`, empty when it contributes nothing
    fn records_for_package(&self, package: &str) -> BTreeMap<String, String>;
}

/// Registries keyed by name
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct RegistryContext {
    entries: Vec<(String, Box<dyn RegistryEntry>)>,
    by_key: HashMap<String, usize>,
}

impl RegistryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context holding an empty module registry and the default extras keys
    pub fn with_defaults() -> Self {
        let mut context = Self::new();
        context.register(MODULE_REGISTRY, ModuleRegistry::new());
        context.register(EXTRAS_KEYS_REGISTRY, ExtrasKeysRegistry::new([NODE_MODULES]));
        context
    }

    /// Register `entry` under `key`, replacing any registry already there
    pub fn register(&mut self, key: impl Into<String>, entry: impl RegistryEntry + 'static) {
        let key = key.into();
        let entry: Box<dyn RegistryEntry> = Box::new(entry);
        if let Some(&idx) = self.by_key.get(&key) {
            tracing::debug!("replacing registry '{}'", key);
            self.entries[idx].1 = entry;
        } else {
            tracing::debug!("registering registry '{}'", key);
            self.by_key.insert(key.clone(), self.entries.len());
            self.entries.push((key, entry));
        }
    }

    /// Look up a registry by key
    pub fn get(&self, key: &str) -> Option<&dyn RegistryEntry> {
        self.by_key
            .get(key)
            .and_then(|&idx| self.entries.get(idx))
            .map(|(_, entry)| &**entry)
    }

    /// Registry keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}
