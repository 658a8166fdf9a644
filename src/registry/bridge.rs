//! Merging of per-package registry records
//!
//! A registry that is missing, or that cannot report records per package,
//! reads as an empty mapping.

use std::collections::BTreeMap;

use super::{PackageRecordsProvider, RegistryContext};
use crate::environment::{WorkingSet, find_packages_requirements_dists};
use crate::error::Result;

fn package_records<'a>(
    context: &'a RegistryContext,
    registry_key: &str,
) -> Option<&'a dyn PackageRecordsProvider> {
    let Some(registry) = context.get(registry_key) else {
        tracing::debug!("no registry '{}'", registry_key);
        return None;
    };
    let provider = registry.as_package_records();
    if provider.is_none() {
        tracing::debug!("registry '{}' has no per-package records", registry_key);
    }
    provider
}

/// Records of just the named packages, later names winning
pub fn registry_dependencies<S: AsRef<str>>(
    context: &RegistryContext,
    names: &[S],
    registry_key: &str,
) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    let Some(provider) = package_records(context, registry_key) else {
        return result;
    };
    for name in names {
        result.extend(provider.records_for_package(name.as_ref()));
    }
    result
}

/// Records of the named packages and their whole dependency closure
///
/// Merged ancestor first, so a package overrides what it depends on.
///
/// # Errors
///
/// Fails when the dependency graph is broken.
pub fn flatten_registry_dependencies<S: AsRef<str>>(
    context: &RegistryContext,
    working_set: &WorkingSet,
    names: &[S],
    registry_key: &str,
) -> Result<BTreeMap<String, String>> {
    let mut result = BTreeMap::new();
    let Some(provider) = package_records(context, registry_key) else {
        return Ok(result);
    };
    for dist in find_packages_requirements_dists(working_set, names)? {
        let records = provider.records_for_package(dist.name());
        if records.is_empty() {
            tracing::debug!("'{}' has no records in '{}'", dist, registry_key);
        }
        result.extend(records);
    }
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::{EXTRAS_KEYS_REGISTRY, ModuleRegistry};
    use crate::test_fixtures::site_working_set;

    const DUMMY: &str = "calmjs.module.dummy.test";

    fn context() -> RegistryContext {
        let registry = ModuleRegistry::new()
            .with_module("site", [("site/config", "/home/src/site/config.js")])
            .with_module(
                "widget",
                [
                    ("widget/ui", "/home/src/widget/ui.js"),
                    ("widget/widget", "/home/src/widget/widget.js"),
                ],
            )
            .with_module("forms", [("forms/ui", "/home/src/forms/ui.js")])
            .with_module("service", [("service/lib", "/home/src/forms/lib.js")])
            .with_package("site", ["site"])
            .with_package("widget", ["widget"])
            .with_package("forms", ["forms"])
            .with_package("service", ["service"]);

        let mut context = RegistryContext::with_defaults();
        context.register(DUMMY, registry);
        context
    }

    fn pairs(records: &BTreeMap<String, String>) -> Vec<(&str, &str)> {
        records
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_no_registry() {
        let context = RegistryContext::new();
        let working_set = site_working_set();
        assert!(
            flatten_registry_dependencies(&context, &working_set, &["calmjs"], "calmjs.no_reg")
                .expect("empty")
                .is_empty()
        );
        assert!(registry_dependencies(&context, &["calmjs"], "calmjs.no_reg").is_empty());
    }

    #[test]
    fn test_registry_without_package_records() {
        let context = context();
        let working_set = site_working_set();
        assert!(
            flatten_registry_dependencies(&context, &working_set, &["site"], EXTRAS_KEYS_REGISTRY)
                .expect("empty")
                .is_empty()
        );
    }

    #[test]
    fn test_flatten_site() {
        let context = context();
        let working_set = site_working_set();
        let site = flatten_registry_dependencies(&context, &working_set, &["site"], DUMMY)
            .expect("flatten");
        assert_eq!(
            pairs(&site),
            [
                ("forms/ui", "/home/src/forms/ui.js"),
                ("service/lib", "/home/src/forms/lib.js"),
                ("site/config", "/home/src/site/config.js"),
                ("widget/ui", "/home/src/widget/ui.js"),
                ("widget/widget", "/home/src/widget/widget.js"),
            ]
        );
    }

    #[test]
    fn test_flatten_partial() {
        let context = context();
        let working_set = site_working_set();

        let service = flatten_registry_dependencies(&context, &working_set, &["service"], DUMMY)
            .expect("flatten");
        assert_eq!(pairs(&service), [("service/lib", "/home/src/forms/lib.js")]);

        let forms = flatten_registry_dependencies(&context, &working_set, &["forms"], DUMMY)
            .expect("flatten");
        assert_eq!(
            pairs(&forms),
            [
                ("forms/ui", "/home/src/forms/ui.js"),
                ("widget/ui", "/home/src/widget/ui.js"),
                ("widget/widget", "/home/src/widget/widget.js"),
            ]
        );

        let merged =
            flatten_registry_dependencies(&context, &working_set, &["forms", "service"], DUMMY)
                .expect("flatten");
        assert_eq!(merged.len(), 4);
        assert_eq!(merged["service/lib"], "/home/src/forms/lib.js");
    }

    #[test]
    fn test_flatten_nothing_declared() {
        let context = context();
        let working_set = site_working_set();

        let security = flatten_registry_dependencies(&context, &working_set, &["security"], DUMMY)
            .expect("flatten");
        assert!(security.is_empty());

        let missing =
            flatten_registry_dependencies(&context, &working_set, &["missing_pkg"], DUMMY)
                .expect("flatten");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_direct() {
        let context = context();
        assert_eq!(
            pairs(&registry_dependencies(&context, &["site"], DUMMY)),
            [("site/config", "/home/src/site/config.js")]
        );
        assert!(registry_dependencies(&context, &["security"], DUMMY).is_empty());
        assert!(registry_dependencies(&context, &["missing"], DUMMY).is_empty());
    }

    #[test]
    fn test_direct_later_names_win() {
        let mut context = RegistryContext::new();
        context.register(
            DUMMY,
            ModuleRegistry::new()
                .with_module("a", [("shared", "/a.js")])
                .with_module("b", [("shared", "/b.js")])
                .with_package("a", ["a"])
                .with_package("b", ["b"]),
        );
        assert_eq!(registry_dependencies(&context, &["a", "b"], DUMMY)["shared"], "/b.js");
        assert_eq!(registry_dependencies(&context, &["b", "a"], DUMMY)["shared"], "/a.js");
    }

    #[test]
    fn test_flatten_descendant_overrides_ancestor() {
        let mut context = RegistryContext::new();
        context.register(
            DUMMY,
            ModuleRegistry::new()
                .with_module("framework", [("shared/ui", "/home/src/framework/ui.js")])
                .with_module("site", [("shared/ui", "/home/src/site/ui.js")])
                .with_package("framework", ["framework"])
                .with_package("site", ["site"]),
        );
        let working_set = site_working_set();

        let site = flatten_registry_dependencies(&context, &working_set, &["site"], DUMMY)
            .expect("flatten");
        assert_eq!(pairs(&site), [("shared/ui", "/home/src/site/ui.js")]);

        let widget = flatten_registry_dependencies(&context, &working_set, &["widget"], DUMMY)
            .expect("flatten");
        assert_eq!(pairs(&widget), [("shared/ui", "/home/src/framework/ui.js")]);
    }
}
