//! Patient service domain logic.
//!
//! Every operation runs its checks in a fixed order: payload validation,
//! path/body identity, then existence. Readings are never touched here
//! except through the store's cascade on delete.

use anyhow::anyhow;
use std::sync::Arc;
use tracing::{info, warn};

use super::consistency::{ensure_ids_match, require_affected, require_found};
use super::errors::{ResourceKind, ServiceError, ServiceResult};
use super::models::Patient;
use super::validation::validate_patient;
use crate::io::rest::mappers::PatientMapper;
use crate::storage::{Connection, PatientStorage};
use shared::PatientDto;

#[derive(Clone)]
pub struct PatientService<C: Connection> {
    patient_repository: C::PatientRepository,
}

impl<C: Connection> PatientService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let patient_repository = connection.create_patient_repository();
        Self { patient_repository }
    }

    /// Create a new patient with no readings
    pub async fn create_patient(&self, request: PatientDto) -> ServiceResult<Patient> {
        info!("Creating patient");

        validate_patient(&request)?;
        let patient = PatientMapper::to_domain(request)
            .ok_or_else(|| anyhow!("Validated patient payload is incomplete"))?;

        let stored = self.patient_repository.store_patient(&patient).await?;
        info!("Created patient with ID: {:?}", stored.id);
        Ok(stored)
    }

    /// List all patients with their readings, in storage order
    pub async fn list_patients(&self) -> ServiceResult<Vec<Patient>> {
        let patients = self.patient_repository.list_patients().await?;
        info!("Found {} patients", patients.len());
        Ok(patients)
    }

    pub async fn get_patient(&self, patient_id: i64) -> ServiceResult<Patient> {
        let patient = self.patient_repository.get_patient(patient_id).await?;
        if patient.is_none() {
            warn!("Patient not found: {}", patient_id);
        }
        require_found(patient, ResourceKind::Patient, patient_id)
    }

    /// Replace first name, last name and date of birth
    pub async fn update_patient(&self, patient_id: i64, request: PatientDto) -> ServiceResult<Patient> {
        info!("Updating patient: {}", patient_id);

        validate_patient(&request)?;
        ensure_ids_match(patient_id, request.id)?;

        let mut patient = self.get_patient(patient_id).await?;
        let changes = PatientMapper::to_domain(request)
            .ok_or_else(|| anyhow!("Validated patient payload is incomplete"))?;

        patient.first_name = changes.first_name;
        patient.last_name = changes.last_name;
        patient.date_of_birth = changes.date_of_birth;

        let updated = self.patient_repository.update_patient(&patient).await?;
        require_affected(updated, ResourceKind::Patient, patient_id)?;
        info!("Updated patient: {}", patient_id);
        Ok(patient)
    }

    /// Delete a patient together with all of its readings
    pub async fn delete_patient(&self, patient_id: i64) -> ServiceResult<()> {
        info!("Deleting patient: {}", patient_id);

        if !self.patient_repository.patient_exists(patient_id).await? {
            warn!("Patient not found: {}", patient_id);
            return Err(ServiceError::not_found(ResourceKind::Patient, patient_id));
        }

        let deleted = self.patient_repository.delete_patient(patient_id).await?;
        require_affected(deleted, ResourceKind::Patient, patient_id)?;
        info!("Deleted patient: {}", patient_id);
        Ok(())
    }
}
