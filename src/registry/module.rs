//! Registry of JavaScript module locations exported by Python packages

use std::collections::BTreeMap;

use super::{PackageRecordsProvider, RegistryEntry};
use crate::requirement::safe_key;

/// Module records keyed by Python module name
///
/// Each Python module maps the JavaScript module names it exports to their
/// source locations. Packages are linked to the modules they own, in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    records: BTreeMap<String, BTreeMap<String, String>>,
    package_modules: BTreeMap<String, Vec<String>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the exports of one Python module, merged over any already present
    pub fn with_module<I, K, V>(mut self, module: impl Into<String>, exports: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.add_module(module, exports);
        self
    }

    /// Link `package` to the Python modules it provides
    pub fn with_package<I, S>(mut self, package: &str, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_package(package, modules);
        self
    }

    pub fn add_module<I, K, V>(&mut self, module: impl Into<String>, exports: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.records
            .entry(module.into())
            .or_default()
            .extend(exports.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn add_package<I, S>(&mut self, package: &str, modules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_modules
            .entry(safe_key(package))
            .or_default()
            .extend(modules.into_iter().map(Into::into));
    }

    /// Exports of a single Python module
    pub fn get_record(&self, module: &str) -> Option<&BTreeMap<String, String>> {
        self.records.get(module)
    }

    /// Python modules linked to `package`
    pub fn modules_for_package(&self, package: &str) -> &[String] {
        self.package_modules
            .get(&safe_key(package))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl RegistryEntry for ModuleRegistry {
    fn iter_records(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.records.keys().map(String::as_str))
    }

    fn as_package_records(&self) -> Option<&dyn PackageRecordsProvider> {
        Some(self)
    }
}

impl PackageRecordsProvider for ModuleRegistry {
    fn records_for_package(&self, package: &str) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        for module in self.modules_for_package(package) {
            match self.records.get(module) {
                Some(exports) => {
                    result.extend(exports.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                None => tracing::debug!("'{}' declares module '{}' with no records", package, module),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_for_package() {
        let registry = ModuleRegistry::new()
            .with_module("widget", [("widget/ui", "/home/src/widget/ui.js")])
            .with_module("widget.extra", [("widget/extra", "/home/src/widget/extra.js")])
            .with_package("widget", ["widget", "widget.extra", "widget.missing"]);

        let records = registry.records_for_package("widget");
        assert_eq!(records.len(), 2);
        assert_eq!(records["widget/extra"], "/home/src/widget/extra.js");

        assert!(registry.records_for_package("forms").is_empty());
    }

    #[test]
    fn test_later_modules_override() {
        let registry = ModuleRegistry::new()
            .with_module("a", [("shared", "/a.js")])
            .with_module("b", [("shared", "/b.js")])
            .with_package("pkg", ["a", "b"]);
        assert_eq!(registry.records_for_package("pkg")["shared"], "/b.js");
    }

    #[test]
    fn test_package_names_are_normalized() {
        let registry = ModuleRegistry::new()
            .with_module("jquery_ui", [("jquery-ui", "/ui.js")])
            .with_package("jquery_ui", ["jquery_ui"]);
        assert_eq!(registry.modules_for_package("Jquery-UI"), ["jquery_ui"]);
    }

    #[test]
    fn test_iter_records() {
        let registry = ModuleRegistry::new()
            .with_module("widget", [("widget/ui", "/ui.js")])
            .with_module("forms", [("forms/ui", "/forms.js")]);
        let modules: Vec<&str> = registry.iter_records().collect();
        assert_eq!(modules, ["forms", "widget"]);
        assert!(registry.get_record("widget").is_some());
    }
}
