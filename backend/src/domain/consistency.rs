//! Cross-resource checks run by the services before any mutation.

use super::errors::{Conflict, ResourceKind, ServiceError, ServiceResult};
use super::models::BloodSugarReading;

/// The identifier in the request body must equal the one in the path.
/// A body without an identifier never matches.
pub fn ensure_ids_match(path_id: i64, body_id: Option<i64>) -> ServiceResult<()> {
    if body_id == Some(path_id) {
        Ok(())
    } else {
        Err(Conflict::IdMismatch.into())
    }
}

/// The owning patient named in a reading body must equal the path patient.
pub fn ensure_patient_ids_match(path_patient_id: i64, body_patient_id: Option<i64>) -> ServiceResult<()> {
    if body_patient_id == Some(path_patient_id) {
        Ok(())
    } else {
        Err(Conflict::PatientIdMismatch.into())
    }
}

/// Unwrap a lookup result or report which resource was missing.
pub fn require_found<T>(found: Option<T>, resource: ResourceKind, id: i64) -> ServiceResult<T> {
    found.ok_or_else(|| ServiceError::not_found(resource, id))
}

/// A mutation that touched no row lost a race with a delete.
pub fn require_affected(affected: bool, resource: ResourceKind, id: i64) -> ServiceResult<()> {
    if affected {
        Ok(())
    } else {
        Err(ServiceError::not_found(resource, id))
    }
}

/// The stored owner of `reading` must be the patient from the path.
pub fn ensure_reading_owned_by(reading: &BloodSugarReading, patient_id: i64) -> ServiceResult<()> {
    if reading.belongs_to(patient_id) {
        Ok(())
    } else {
        Err(Conflict::ReadingNotOwned.into())
    }
}
