//! Blood-sugar reading service domain logic.
//!
//! Readings are always addressed through their owning patient. Before any
//! read or mutation of a single reading the service confirms that the path
//! patient exists and that the stored owner of the reading is that patient.

use anyhow::anyhow;
use std::sync::Arc;
use tracing::{info, warn};

use super::consistency::{
    ensure_ids_match, ensure_patient_ids_match, ensure_reading_owned_by, require_affected,
    require_found,
};
use super::errors::{ResourceKind, ServiceError, ServiceResult};
use super::models::BloodSugarReading;
use super::validation::validate_reading;
use crate::io::rest::mappers::ReadingMapper;
use crate::storage::{Connection, PatientStorage, ReadingStorage};
use shared::BloodSugarReadingDto;

#[derive(Clone)]
pub struct ReadingService<C: Connection> {
    patient_repository: C::PatientRepository,
    reading_repository: C::ReadingRepository,
}

impl<C: Connection> ReadingService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            patient_repository: connection.create_patient_repository(),
            reading_repository: connection.create_reading_repository(),
        }
    }

    /// Record a new reading for `patient_id`
    pub async fn create_reading(
        &self,
        patient_id: i64,
        request: BloodSugarReadingDto,
    ) -> ServiceResult<BloodSugarReading> {
        info!("Creating reading for patient {}", patient_id);

        self.ensure_patient_exists(patient_id).await?;
        validate_reading(&request)?;

        let reading = ReadingMapper::to_domain(request, patient_id)
            .ok_or_else(|| anyhow!("Validated reading payload is incomplete"))?;
        let stored = self.reading_repository.store_reading(&reading).await?;

        info!("Created reading {:?} for patient {}", stored.id, patient_id);
        Ok(stored)
    }

    pub async fn list_readings(&self, patient_id: i64) -> ServiceResult<Vec<BloodSugarReading>> {
        self.ensure_patient_exists(patient_id).await?;

        let readings = self
            .reading_repository
            .list_readings_for_patient(patient_id)
            .await?;
        info!("Found {} readings for patient {}", readings.len(), patient_id);
        Ok(readings)
    }

    pub async fn get_reading(&self, patient_id: i64, reading_id: i64) -> ServiceResult<BloodSugarReading> {
        self.ensure_patient_exists(patient_id).await?;
        self.find_owned_reading(patient_id, reading_id).await
    }

    /// Replace timestamp, level and unit. Ownership is re-verified, never changed.
    pub async fn update_reading(
        &self,
        patient_id: i64,
        reading_id: i64,
        request: BloodSugarReadingDto,
    ) -> ServiceResult<BloodSugarReading> {
        info!("Updating reading {} for patient {}", reading_id, patient_id);

        validate_reading(&request)?;
        ensure_ids_match(reading_id, request.id)?;
        ensure_patient_ids_match(patient_id, request.patient_id)?;
        self.ensure_patient_exists(patient_id).await?;

        let mut reading = self.find_owned_reading(patient_id, reading_id).await?;
        let changes = ReadingMapper::to_domain(request, patient_id)
            .ok_or_else(|| anyhow!("Validated reading payload is incomplete"))?;

        reading.timestamp = changes.timestamp;
        reading.level = changes.level;
        reading.unit = changes.unit;

        let updated = self.reading_repository.update_reading(&reading).await?;
        require_affected(updated, ResourceKind::BloodSugarReading, reading_id)?;
        info!("Updated reading {}", reading_id);
        Ok(reading)
    }

    pub async fn delete_reading(&self, patient_id: i64, reading_id: i64) -> ServiceResult<()> {
        info!("Deleting reading {} for patient {}", reading_id, patient_id);

        self.ensure_patient_exists(patient_id).await?;
        self.find_owned_reading(patient_id, reading_id).await?;

        let deleted = self.reading_repository.delete_reading(reading_id).await?;
        require_affected(deleted, ResourceKind::BloodSugarReading, reading_id)?;
        info!("Deleted reading {}", reading_id);
        Ok(())
    }

    async fn ensure_patient_exists(&self, patient_id: i64) -> ServiceResult<()> {
        if self.patient_repository.patient_exists(patient_id).await? {
            Ok(())
        } else {
            warn!("Patient not found: {}", patient_id);
            Err(ServiceError::not_found(ResourceKind::Patient, patient_id))
        }
    }

    /// Fetch a reading and check that `patient_id` owns it
    async fn find_owned_reading(&self, patient_id: i64, reading_id: i64) -> ServiceResult<BloodSugarReading> {
        let reading = self.reading_repository.get_reading(reading_id).await?;
        if reading.is_none() {
            warn!("Reading not found: {}", reading_id);
        }
        let reading = require_found(reading, ResourceKind::BloodSugarReading, reading_id)?;

        if let Err(e) = ensure_reading_owned_by(&reading, patient_id) {
            warn!(
                "Reading {} is owned by patient {}, not {}",
                reading_id, reading.patient_id, patient_id
            );
            return Err(e);
        }
        Ok(reading)
    }
}
