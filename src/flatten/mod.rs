//! Layering of per-package dependency documents
//!
//! Packages are visited ancestor first. For each dependency group the entries
//! of later packages overwrite those of earlier ones, `null` included; once
//! every package is merged the `null` entries are dropped. Fields outside the
//! groups come from the last package with a non-empty document.
//!
//! ```text
//! framework  {dependencies: {left-pad: ~1.1.1}}
//! widget     {dependencies: {jquery: ~2.0.0}}
//! site       {name: site, dependencies: {jquery: ~1.9.0, left-pad: null}}
//!
//! result     {name: site, dependencies: {jquery: ~1.9.0}}
//! ```

pub mod extras;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::environment::{Distribution, WorkingSet, find_packages_requirements_dists};
use crate::error::Result;
use crate::metadata::{JsonObject, read_dist_json};

pub use extras::{flatten_extras, get_extras};

/// Flatten the documents named `filename` across `dists`
///
/// The result always carries every key of `dep_keys`, mapped to an empty
/// object when nothing declared it.
pub fn flatten_dist_json<'a, I, S>(dists: I, filename: &str, dep_keys: &[S]) -> JsonObject
where
    I: IntoIterator<Item = &'a Distribution>,
    S: AsRef<str>,
{
    let mut depends: BTreeMap<&str, JsonObject> = dep_keys
        .iter()
        .map(|key| (key.as_ref(), JsonObject::new()))
        .collect();
    let mut base: Option<JsonObject> = None;

    for dist in dists {
        let Some(obj) = read_dist_json(dist, filename).filter(|obj| !obj.is_empty()) else {
            continue;
        };

        tracing::debug!("merging '{}' for required '{}'", filename, dist);
        for (key, merged) in &mut depends {
            match obj.get(*key) {
                Some(Value::Object(entries)) => {
                    merged.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Some(Value::Null) | None => {}
                Some(_) => {
                    tracing::warn!(
                        "'{}' in '{}' for '{}' is not an object; ignoring",
                        key,
                        filename,
                        dist
                    );
                }
            }
        }
        base = Some(obj);
    }

    let mut result = base.unwrap_or_default();
    for (key, mut merged) in depends {
        merged.retain(|_, value| !value.is_null());
        result.insert(key.to_string(), Value::Object(merged));
    }
    result
}

/// Flatten the documents of `names` and their whole dependency closure
///
/// Names that are not installed are ignored.
///
/// # Errors
///
/// Fails when the dependency graph of an installed name is broken, for
/// instance by a requirement that no installed distribution satisfies.
pub fn flatten_json<N, S>(
    working_set: &WorkingSet,
    names: &[N],
    filename: &str,
    dep_keys: &[S],
) -> Result<JsonObject>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    let dists = find_packages_requirements_dists(working_set, names)?;
    Ok(flatten_dist_json(dists, filename, dep_keys))
}
