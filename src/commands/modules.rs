//! Modules command implementation

use serde_json::Value;

use crate::cli::{GlobalArgs, ModulesArgs};
use crate::commands::helpers::{Session, emit, package_names};
use crate::error::Result;
use crate::registry::{flatten_registry_dependencies, registry_dependencies};

/// Run modules command
pub fn run(global: &GlobalArgs, args: ModulesArgs) -> Result<()> {
    let session = Session::load(global)?;
    let names = package_names(&args.packages);

    let records = if args.direct {
        registry_dependencies(&session.registries, &names, &args.registry)
    } else {
        flatten_registry_dependencies(
            &session.registries,
            &session.working_set,
            &names,
            &args.registry,
        )?
    };

    let document: serde_json::Map<String, Value> = records
        .into_iter()
        .map(|(name, location)| (name, Value::String(location)))
        .collect();
    emit(Some(&Value::Object(document)), None)
}
