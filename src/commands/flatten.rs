//! Flatten command implementation

use serde_json::Value;

use crate::cli::{FlattenArgs, GlobalArgs};
use crate::commands::helpers::{Session, emit, package_names};
use crate::environment::pkg_names_to_dists;
use crate::error::Result;
use crate::flatten::{flatten_dist_json, flatten_json};

/// Run flatten command
pub fn run(global: &GlobalArgs, args: FlattenArgs) -> Result<()> {
    let session = Session::load(global)?;
    let names = package_names(&args.packages);
    let filename = args.filename.unwrap_or_else(|| session.settings.filename.clone());
    let dep_keys = if args.dep_keys.is_empty() {
        session.settings.dep_keys.clone()
    } else {
        args.dep_keys
    };

    let document = if args.direct {
        let dists = pkg_names_to_dists(&session.working_set, &names)?;
        flatten_dist_json(dists.into_iter().flatten(), &filename, &dep_keys)
    } else {
        flatten_json(&session.working_set, &names, &filename, &dep_keys)?
    };

    emit(Some(&Value::Object(document)), args.output.as_deref())
}
