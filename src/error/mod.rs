//! Error types and handling for calmjs
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`json`]: JSON validation errors
//! - [`resolve`]: Requirement parsing and dependency graph errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//!
//! Absence of metadata is never an error; the read layer returns `None` for
//! it. Only a broken dependency graph surfaces from the flattening calls.

pub mod config;
pub mod fs;
pub mod json;
pub mod resolve;

pub use config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use fs::{io_error, write_failed as file_write_failed};
pub use json::{
    decode_failed as json_decode_failed, encode_failed as json_encode_failed,
    invalid_field, not_object as json_not_object,
};
pub use resolve::{
    distribution_not_found, invalid_marker, invalid_requirement, invalid_version, unknown_extra,
    version_conflict,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for calmjs operations
#[derive(Error, Diagnostic, Debug)]
pub enum CalmjsError {
    // JSON validation errors
    #[error("JSON decoding error: {reason}")]
    #[diagnostic(code(calmjs::json::decode_failed))]
    JsonDecodeFailed { reason: String },

    #[error("must be a JSON serializable object: {reason}")]
    #[diagnostic(code(calmjs::json::encode_failed))]
    JsonEncodeFailed { reason: String },

    #[error("must be specified as a JSON serializable dict or a JSON deserializable string")]
    #[diagnostic(
        code(calmjs::json::not_object),
        help("The top level JSON value must be an object mapping keys to values")
    )]
    JsonNotObject,

    #[error("'{attr}' {message}")]
    #[diagnostic(code(calmjs::json::invalid_field))]
    InvalidField { attr: String, message: String },

    // Requirement and resolution errors
    #[error("Invalid requirement '{input}': {reason}")]
    #[diagnostic(
        code(calmjs::resolve::invalid_requirement),
        help("Requirements look like: name, name[extra], name>=1.0, name>=1.0,<2")
    )]
    InvalidRequirement { input: String, reason: String },

    #[error("Invalid environment marker '{marker}': {reason}")]
    #[diagnostic(
        code(calmjs::resolve::invalid_marker),
        help("Markers compare variables such as python_version or sys_platform to quoted strings")
    )]
    InvalidMarker { marker: String, reason: String },

    #[error("Invalid version '{input}'")]
    #[diagnostic(code(calmjs::resolve::invalid_version))]
    InvalidVersion { input: String },

    #[error("The '{requirement}' distribution was not found and is required by {required_by}")]
    #[diagnostic(
        code(calmjs::resolve::distribution_not_found),
        help("The Python environment is incomplete; install the missing distribution")
    )]
    DistributionNotFound {
        requirement: String,
        required_by: String,
    },

    #[error("Version conflict: found {found}, but '{requirement}' is required")]
    #[diagnostic(code(calmjs::resolve::version_conflict))]
    VersionConflict { found: String, requirement: String },

    #[error("{package} has no such extra feature '{extra}'")]
    #[diagnostic(code(calmjs::resolve::unknown_extra))]
    UnknownExtra { package: String, extra: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(calmjs::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(calmjs::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(calmjs::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(calmjs::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(calmjs::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(calmjs::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for CalmjsError {
    fn from(err: std::io::Error) -> Self {
        CalmjsError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CalmjsError {
    fn from(err: serde_yaml::Error) -> Self {
        CalmjsError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CalmjsError {
    fn from(err: serde_json::Error) -> Self {
        CalmjsError::JsonDecodeFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CalmjsError>;
