//! JSON validation errors

use super::CalmjsError;

/// Creates a JSON decoding error
pub fn decode_failed(reason: impl Into<String>) -> CalmjsError {
    CalmjsError::JsonDecodeFailed {
        reason: reason.into(),
    }
}

/// Creates a JSON encoding error
pub fn encode_failed(reason: impl Into<String>) -> CalmjsError {
    CalmjsError::JsonEncodeFailed {
        reason: reason.into(),
    }
}

/// Creates the wrong top-level type error
pub fn not_object() -> CalmjsError {
    CalmjsError::JsonNotObject
}

/// Wraps a validation error with the name of the field that carried it
pub fn invalid_field(attr: impl Into<String>, err: CalmjsError) -> CalmjsError {
    CalmjsError::InvalidField {
        attr: attr.into(),
        message: err.to_string(),
    }
}
