//! # Storage Traits
//!
//! Abstractions that let the services run against any backend that can
//! create, read, update and delete by primary key and look readings up by
//! their owning patient.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{BloodSugarReading, Patient};

#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Insert a new patient and return it with its assigned identifier
    async fn store_patient(&self, patient: &Patient) -> Result<Patient>;

    /// Fetch a patient together with its readings
    async fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>>;

    /// Cheap existence check that skips loading readings
    async fn patient_exists(&self, patient_id: i64) -> Result<bool>;

    /// List all patients with their readings, in storage order
    async fn list_patients(&self) -> Result<Vec<Patient>>;

    /// Overwrite the scalar fields of an existing patient.
    /// Returns false if no such patient existed.
    async fn update_patient(&self, patient: &Patient) -> Result<bool>;

    /// Delete a patient and, by cascade, all of its readings.
    /// Returns false if no such patient existed.
    async fn delete_patient(&self, patient_id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ReadingStorage: Send + Sync {
    /// Insert a new reading and return it with its assigned identifier
    async fn store_reading(&self, reading: &BloodSugarReading) -> Result<BloodSugarReading>;

    async fn get_reading(&self, reading_id: i64) -> Result<Option<BloodSugarReading>>;

    /// Readings owned by `patient_id`, in storage order
    async fn list_readings_for_patient(&self, patient_id: i64) -> Result<Vec<BloodSugarReading>>;

    /// Overwrite timestamp, level and unit. The owner is never changed.
    /// Returns false if no such reading existed.
    async fn update_reading(&self, reading: &BloodSugarReading) -> Result<bool>;

    async fn delete_reading(&self, reading_id: i64) -> Result<bool>;
}

/// Factory for the repositories of one storage backend.
pub trait Connection: Send + Sync + Clone {
    type PatientRepository: PatientStorage + Clone;
    type ReadingRepository: ReadingStorage + Clone;

    fn create_patient_repository(&self) -> Self::PatientRepository;

    fn create_reading_repository(&self) -> Self::ReadingRepository;
}
