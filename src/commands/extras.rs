//! Extras command implementation

use serde_json::Value;

use crate::cli::{ExtrasArgs, GlobalArgs};
use crate::commands::helpers::{Session, emit, package_names};
use crate::error::Result;
use crate::flatten::{flatten_extras, get_extras};
use crate::metadata::JsonObject;

/// A document whose every field is an empty object declares nothing
fn is_empty(document: &JsonObject) -> bool {
    document
        .values()
        .all(|value| value.as_object().is_some_and(serde_json::Map::is_empty))
}

/// Run extras command
pub fn run(global: &GlobalArgs, args: ExtrasArgs) -> Result<()> {
    let session = Session::load(global)?;
    let names = package_names(&args.packages);

    let document = if args.direct {
        get_extras(&session.registries, &session.working_set, &names)?
    } else {
        flatten_extras(&session.registries, &session.working_set, &names)?
    };

    let value = (!is_empty(&document)).then(|| Value::Object(document));
    emit(value.as_ref(), args.output.as_deref())
}
