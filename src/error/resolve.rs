//! Requirement parsing and dependency graph errors

use super::CalmjsError;

/// Creates an invalid requirement error
pub fn invalid_requirement(input: impl Into<String>, reason: impl Into<String>) -> CalmjsError {
    CalmjsError::InvalidRequirement {
        input: input.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a marker that cannot be parsed or evaluated
pub fn invalid_marker(marker: impl Into<String>, reason: impl Into<String>) -> CalmjsError {
    CalmjsError::InvalidMarker {
        marker: marker.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid version error
pub fn invalid_version(input: impl Into<String>) -> CalmjsError {
    CalmjsError::InvalidVersion {
        input: input.into(),
    }
}

/// Creates a missing distribution error for a transitive requirement
pub fn distribution_not_found(
    requirement: impl Into<String>,
    required_by: impl Into<String>,
) -> CalmjsError {
    CalmjsError::DistributionNotFound {
        requirement: requirement.into(),
        required_by: required_by.into(),
    }
}

/// Creates a version conflict error
pub fn version_conflict(found: impl Into<String>, requirement: impl Into<String>) -> CalmjsError {
    CalmjsError::VersionConflict {
        found: found.into(),
        requirement: requirement.into(),
    }
}

/// Creates an unknown extra error
pub fn unknown_extra(package: impl Into<String>, extra: impl Into<String>) -> CalmjsError {
    CalmjsError::UnknownExtra {
        package: package.into(),
        extra: extra.into(),
    }
}
