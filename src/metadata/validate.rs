//! Validation of user supplied JSON fields
//!
//! A field may be given either as JSON text or as a serializable value. Text
//! must decode; values must encode; either way the result must be an object.

use serde::Serialize;
use serde_json::Value;

use crate::error::{
    Result, invalid_field, json_decode_failed, json_encode_failed, json_not_object,
};

/// Check that `value` is JSON text or a serializable value describing an object
///
/// A string is treated as JSON text and decoded first.
///
/// # Errors
///
/// - [`crate::error::CalmjsError::JsonDecodeFailed`] for text that is not JSON
/// - [`crate::error::CalmjsError::JsonEncodeFailed`] for values serde cannot encode
/// - [`crate::error::CalmjsError::JsonNotObject`] when the top level is not an object
pub fn is_json_compatible<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let value = serde_json::to_value(value).map_err(|e| json_encode_failed(e.to_string()))?;
    let value = match value {
        Value::String(text) => {
            serde_json::from_str(&text).map_err(|e| json_decode_failed(e.to_string()))?
        }
        other => other,
    };

    if !value.is_object() {
        return Err(json_not_object());
    }
    Ok(())
}

/// [`is_json_compatible`] for JSON text
///
/// # Errors
///
/// See [`is_json_compatible`].
pub fn is_json_compatible_str(text: &str) -> Result<()> {
    is_json_compatible(text)
}

/// Validate a named field, prefixing any error with the field name
///
/// # Errors
///
/// Returns [`crate::error::CalmjsError::InvalidField`] wrapping the
/// underlying validation failure.
pub fn validate_json_field<T: Serialize + ?Sized>(attr: &str, value: &T) -> Result<()> {
    is_json_compatible(value).map_err(|e| invalid_field(attr, e))
}
