//! Validate command implementation

use std::fs;

use crate::cli::ValidateArgs;
use crate::error::{Result, io_error};
use crate::metadata::validate_json_field;

/// Run validate command
pub fn run(args: ValidateArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .map_err(|e| io_error(format!("Failed to read '{}': {}", args.file.display(), e)))?;
    let field = args.field.unwrap_or_else(|| {
        args.file
            .file_name()
            .map_or_else(|| args.file.display().to_string(), |name| name.to_string_lossy().into_owned())
    });

    validate_json_field(&field, contents.as_str())?;
    println!("'{}' holds a valid JSON object", field);
    Ok(())
}
