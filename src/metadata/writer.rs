//! Stable serialization of merged documents
//!
//! Output is pretty printed with a four-space indent and sorted keys so that
//! regenerating an unchanged document gives a byte-identical file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::error::{Result, file_write_failed, json_encode_failed};

/// Serialize `value` with sorted keys and a four-space indent
///
/// # Errors
///
/// Returns [`crate::error::CalmjsError::JsonEncodeFailed`] if serde rejects
/// the value.
pub fn to_stable_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| json_encode_failed(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| json_encode_failed(e.to_string()))
}

/// Write `value` to `path`, or remove `path` when `value` is `None`
///
/// The document is written to a temporary file beside the target and moved
/// into place, so readers never see a partial file. Removing a file that does
/// not exist is not an error.
///
/// # Errors
///
/// Returns [`crate::error::CalmjsError::FileWriteFailed`] on I/O failure.
pub fn write_json_file(path: &Path, value: Option<&Value>) -> Result<()> {
    let Some(value) = value else {
        return match fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!("removed '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(file_write_failed(path.display().to_string(), e.to_string())),
        };
    };

    let contents = to_stable_json(value)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |e: std::io::Error| file_write_failed(path.display().to_string(), e.to_string());

    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(contents.as_bytes()).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!("wrote '{}'", path.display());
    Ok(())
}
