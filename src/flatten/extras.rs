//! Flattening of the extras documents
//!
//! Same merge as the dependency documents, but the group keys come from the
//! extras keys registry and the file is always `extras_calmjs.json`.

use std::collections::BTreeSet;

use crate::environment::{WorkingSet, find_packages_requirements_dists, pkg_names_to_dists};
use crate::error::Result;
use crate::flatten::flatten_dist_json;
use crate::metadata::{EXTRAS_CALMJS_JSON, JsonObject};
use crate::registry::{EXTRAS_KEYS_REGISTRY, RegistryContext};

fn extras_keys(context: &RegistryContext) -> BTreeSet<String> {
    match context.get(EXTRAS_KEYS_REGISTRY) {
        Some(registry) => registry.iter_records().map(str::to_string).collect(),
        None => {
            tracing::debug!("no '{}' registry; no extras keys", EXTRAS_KEYS_REGISTRY);
            BTreeSet::new()
        }
    }
}

/// Extras of just the named packages
///
/// # Errors
///
/// Fails on an unparseable name or a version conflict.
pub fn get_extras<S: AsRef<str>>(
    context: &RegistryContext,
    working_set: &WorkingSet,
    names: &[S],
) -> Result<JsonObject> {
    let keys: Vec<String> = extras_keys(context).into_iter().collect();
    let dists = pkg_names_to_dists(working_set, names)?;
    Ok(flatten_dist_json(dists.into_iter().flatten(), EXTRAS_CALMJS_JSON, &keys))
}

/// Extras of the named packages and everything they depend on
///
/// # Errors
///
/// Fails when the dependency graph is broken.
pub fn flatten_extras<S: AsRef<str>>(
    context: &RegistryContext,
    working_set: &WorkingSet,
    names: &[S],
) -> Result<JsonObject> {
    let keys: Vec<String> = extras_keys(context).into_iter().collect();
    let dists = find_packages_requirements_dists(working_set, names)?;
    Ok(flatten_dist_json(dists, EXTRAS_CALMJS_JSON, &keys))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::ExtrasKeysRegistry;
    use crate::test_fixtures::dist_with_files;
    use serde_json::{Value, json};

    fn working_set() -> WorkingSet {
        [
            dist_with_files(
                "lib",
                "1.0.0",
                &[],
                &[(
                    EXTRAS_CALMJS_JSON,
                    json!({
                        "node_modules": {
                            "jquery": "jquery/dist/jquery.js",
                            "underscore": "underscore/underscore-min.js",
                        },
                        "something_else": {"parent": "lib"},
                    }),
                )],
            ),
            dist_with_files(
                "app",
                "2.0",
                &["lib>=1.0.0"],
                &[(
                    EXTRAS_CALMJS_JSON,
                    json!({
                        "node_modules": {"jquery": "jquery/dist/jquery.min.js"},
                        "something_else": {"child": "named"},
                    }),
                )],
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_node_modules_single() {
        let context = RegistryContext::with_defaults();
        let single = get_extras(&context, &working_set(), &["app"]).expect("extras");
        assert_eq!(
            single.get("node_modules"),
            Some(&json!({"jquery": "jquery/dist/jquery.min.js"}))
        );
    }

    #[test]
    fn test_node_modules_flattened() {
        let context = RegistryContext::with_defaults();
        let results = flatten_extras(&context, &working_set(), &["app"]).expect("extras");
        assert_eq!(
            results.get("node_modules"),
            Some(&json!({
                "jquery": "jquery/dist/jquery.min.js",
                "underscore": "underscore/underscore-min.js",
            }))
        );
        // not an extras key, so only the most specific document counts
        assert_eq!(results.get("something_else"), Some(&json!({"child": "named"})));
    }

    #[test]
    fn test_declared_keys_are_merged() {
        let mut context = RegistryContext::new();
        context.register(
            EXTRAS_KEYS_REGISTRY,
            ExtrasKeysRegistry::new(["node_modules", "something_else"]),
        );
        let results = flatten_extras(&context, &working_set(), &["app"]).expect("extras");
        assert_eq!(
            results.get("something_else"),
            Some(&json!({"parent": "lib", "child": "named"}))
        );
    }

    #[test]
    fn test_no_extras_registry() {
        let context = RegistryContext::new();
        let results = flatten_extras(&context, &working_set(), &["app"]).expect("extras");
        assert_eq!(
            Value::Object(results),
            json!({
                "node_modules": {"jquery": "jquery/dist/jquery.min.js"},
                "something_else": {"child": "named"},
            })
        );
    }

    #[test]
    fn test_unknown_names() {
        let context = RegistryContext::with_defaults();
        let results = get_extras(&context, &working_set(), &["missing"]).expect("extras");
        assert_eq!(Value::Object(results), json!({"node_modules": {}}));
    }
}
