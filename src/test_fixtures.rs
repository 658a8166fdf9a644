//! Test fixtures for building in-memory environments.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{dist, site_working_set};
//!
//! #[test]
//! fn my_test() {
//!     // One distribution with a default.json
//!     let app = dist("app", "2.0", &["lib>=1.0"], Some(json!({"dependencies": {}})));
//!
//!     // security -> framework -> widget, forms, service -> site
//!     let working_set = site_working_set();
//! }
//! ```

use serde_json::{Value, json};

use crate::environment::{Distribution, MemoryMetadata, WorkingSet};
use crate::metadata::DEFAULT_JSON;

/// A distribution with the given requirements and optional `default.json`
pub fn dist(name: &str, version: &str, requires: &[&str], document: Option<Value>) -> Distribution {
    match document {
        Some(document) => dist_with_files(name, version, requires, &[(DEFAULT_JSON, document)]),
        None => dist_with_files(name, version, requires, &[]),
    }
}

/// A distribution carrying arbitrary JSON metadata files
pub fn dist_with_files(
    name: &str,
    version: &str,
    requires: &[&str],
    files: &[(&str, Value)],
) -> Distribution {
    let metadata = files
        .iter()
        .fold(MemoryMetadata::new(), |metadata, (filename, document)| {
            metadata.with_file(*filename, document.to_string())
        });
    Distribution::new(name, version, metadata).with_requires(requires.iter().copied())
}

/// The six package site scenario
///
/// `security` carries a `default.json` that is not valid JSON.
pub fn site_working_set() -> WorkingSet {
    let security = Distribution::new(
        "security",
        "9999",
        MemoryMetadata::new().with_file(DEFAULT_JSON, "This is very NOT a package.json."),
    );

    [
        security,
        dist(
            "framework",
            "2.4",
            &["security"],
            Some(json!({
                "name": "framework",
                "description": "some framework",
                "dependencies": {"left-pad": "~1.1.1"},
                "devDependencies": {"sinon": "~1.15.0"},
            })),
        ),
        dist(
            "widget",
            "1.1",
            &["framework>=2.1"],
            Some(json!({
                "dependencies": {"jquery": "~2.0.0", "underscore": "~1.7.0"},
            })),
        ),
        dist(
            "forms",
            "1.6",
            &["framework>=2.2", "widget>=1.0"],
            Some(json!({
                "dependencies": {"backbone": "~1.3.0", "jquery-ui": "~1.12.0"},
            })),
        ),
        dist(
            "service",
            "1.1",
            &["framework>=2.1"],
            Some(json!({
                "dependencies": {"underscore": "~1.8.0"},
                "devDependencies": {"sinon": "~1.17.0"},
            })),
        ),
        dist(
            "site",
            "2.0",
            &["framework>=2.1", "widget>=1.1", "forms>=1.6", "service>=1.1"],
            Some(json!({
                "name": "site",
                "dependencies": {"underscore": "~1.8.0", "jquery": "~1.9.0"},
            })),
        ),
    ]
    .into_iter()
    .collect()
}
