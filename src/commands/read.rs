//! Read command implementation

use serde_json::Value;

use crate::cli::{GlobalArgs, ReadArgs};
use crate::commands::helpers::{Session, emit};
use crate::error::Result;
use crate::metadata::read_package_json;

/// Run read command
pub fn run(global: &GlobalArgs, args: ReadArgs) -> Result<()> {
    let session = Session::load(global)?;
    let filename = args.filename.unwrap_or_else(|| session.settings.filename.clone());

    match read_package_json(&session.working_set, &args.package, &filename) {
        Some(document) => emit(Some(&Value::Object(document)), None),
        None => {
            eprintln!("No valid '{}' found for '{}'", filename, args.package);
            Ok(())
        }
    }
}
