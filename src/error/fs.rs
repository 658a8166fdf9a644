//! File system errors

use super::CalmjsError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> CalmjsError {
    CalmjsError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a generic IO error
pub fn io_error(message: impl Into<String>) -> CalmjsError {
    CalmjsError::IoError {
        message: message.into(),
    }
}
