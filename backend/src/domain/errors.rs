//! Failure taxonomy shared by the domain services.
//!
//! Services never translate failures into responses themselves; every
//! variant travels up to the REST boundary unchanged.

use std::fmt;

/// Kind of resource named in a not-found failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Patient,
    BloodSugarReading,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Patient => f.write_str("Patient"),
            ResourceKind::BloodSugarReading => f.write_str("BloodSugarReading"),
        }
    }
}

/// A single violated field rule. The display string is what callers see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldViolation {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("First name must be between 1 and 100 characters")]
    FirstNameSize,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Last name must be between 1 and 100 characters")]
    LastNameSize,
    #[error("Date of birth is required")]
    DateOfBirthRequired,
    #[error("Date of birth must be in the past or present")]
    DateOfBirthInFuture,
    #[error("Timestamp is required")]
    TimestampRequired,
    #[error("Timestamp must be in the past or present")]
    TimestampInFuture,
    #[error("Level is required")]
    LevelRequired,
    #[error("Level must be a positive number")]
    LevelNegative,
    #[error("Level must be less than or equal to 1000")]
    LevelTooHigh,
    #[error("Unit is required")]
    UnitRequired,
    #[error("Unit must be either 'mg/dL' or 'mmol/L'")]
    UnitPattern,
    #[error("Patient ID is required")]
    PatientIdRequired,
}

/// Cross-resource contract violations detected before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    #[error("ID in path does not match ID in request body")]
    IdMismatch,
    #[error("patientId in path does not match patientId in request body")]
    PatientIdMismatch,
    #[error("Reading does not belong to the specified patient")]
    ReadingNotOwned,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
    #[error("{resource} not found with id : '{id}'")]
    NotFound { resource: ResourceKind, id: i64 },
    #[error(transparent)]
    Conflict(#[from] Conflict),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(resource: ResourceKind, id: i64) -> Self {
        ServiceError::NotFound { resource, id }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
