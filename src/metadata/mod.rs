//! JSON documents embedded in distribution metadata
//!
//! Reading is fail-soft: a missing file, an I/O failure, invalid JSON and a
//! non-object top level all read as `None`, i.e. "this package declares
//! nothing". Only the missing case is quiet; the others are logged as errors.

pub mod validate;
pub mod writer;

use serde_json::{Map, Value};

use crate::environment::{Distribution, WorkingSet, find_pkg_dist};

pub use validate::{is_json_compatible, is_json_compatible_str, validate_json_field};
pub use writer::{to_stable_json, write_json_file};

/// A JSON object as read from or written to metadata
pub type JsonObject = Map<String, Value>;

/// Default package definition filename
pub const DEFAULT_JSON: &str = "default.json";
/// Metadata file carrying the extras keys documents
pub const EXTRAS_CALMJS_JSON: &str = "extras_calmjs.json";
/// Field name the extras document is declared under
pub const EXTRAS_CALMJS_FIELD: &str = "extras_calmjs";
/// Dependency groups flattened by default
pub const DEP_KEYS: [&str; 2] = ["dependencies", "devDependencies"];

/// Read and parse `filename` from a distribution's metadata
pub fn read_dist_json(dist: &Distribution, filename: &str) -> Option<JsonObject> {
    if !dist.has_metadata(filename) {
        tracing::debug!("no '{}' for '{}'", filename, dist);
        return None;
    }

    let contents = match dist.get_metadata(filename) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!("I/O error on reading of '{}' for '{}': {}", filename, dist, e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(obj)) => {
            tracing::debug!("found '{}' for '{}'", filename, dist);
            Some(obj)
        }
        Ok(_) => {
            tracing::error!("the '{}' found in '{}' is not a JSON object", filename, dist);
            None
        }
        Err(e) => {
            tracing::error!("the '{}' found in '{}' is not a valid json: {}", filename, dist, e);
            None
        }
    }
}

/// Read a document from an installed package located by name
///
/// A package that is not installed, or whose name does not resolve
/// cleanly, reads as `None`.
pub fn read_package_json(
    working_set: &WorkingSet,
    name: &str,
    filename: &str,
) -> Option<JsonObject> {
    match find_pkg_dist(working_set, name) {
        Ok(Some(dist)) => read_dist_json(dist, filename),
        Ok(None) => {
            tracing::debug!("package '{}' not found", name);
            None
        }
        Err(e) => {
            tracing::error!("cannot look up '{}': {}", name, e);
            None
        }
    }
}
