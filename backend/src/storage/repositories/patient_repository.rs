use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashMap;

use super::reading_repository::{reading_from_row, ReadingRepository};
use crate::domain::models::{BloodSugarReading, Patient};
use crate::storage::connection::DbConnection;
use crate::storage::traits::{PatientStorage, ReadingStorage};

/// Repository for patient operations
#[derive(Clone)]
pub struct PatientRepository {
    db: DbConnection,
}

impl PatientRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn readings_for(&self, patient_id: i64) -> Result<Vec<BloodSugarReading>> {
        ReadingRepository::new(self.db.clone())
            .list_readings_for_patient(patient_id)
            .await
    }
}

fn patient_from_row(row: &SqliteRow) -> Result<Patient> {
    Ok(Patient {
        id: Some(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        readings: Vec::new(),
    })
}

#[async_trait]
impl PatientStorage for PatientRepository {
    async fn store_patient(&self, patient: &Patient) -> Result<Patient> {
        let result = sqlx::query(
            r#"
            INSERT INTO patients (first_name, last_name, date_of_birth)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.date_of_birth)
        .execute(self.db.pool())
        .await?;

        Ok(Patient {
            id: Some(result.last_insert_rowid()),
            readings: Vec::new(),
            ..patient.clone()
        })
    }

    async fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, date_of_birth
            FROM patients
            WHERE id = ?
            "#,
        )
        .bind(patient_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => {
                let mut patient = patient_from_row(&r)?;
                patient.readings = self.readings_for(patient_id).await?;
                Ok(Some(patient))
            }
            None => Ok(None),
        }
    }

    async fn patient_exists(&self, patient_id: i64) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1 FROM patients WHERE id = ?
            "#,
        )
        .bind(patient_id)
        .fetch_optional(self.db.pool())
        .await?
        .is_some();
        Ok(exists)
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, date_of_birth
            FROM patients
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let reading_rows = sqlx::query(
            r#"
            SELECT id, patient_id, timestamp, level, unit
            FROM blood_sugar_readings
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut readings_by_patient: HashMap<i64, Vec<BloodSugarReading>> = HashMap::new();
        for row in &reading_rows {
            let reading = reading_from_row(row)?;
            readings_by_patient
                .entry(reading.patient_id)
                .or_default()
                .push(reading);
        }

        rows.iter()
            .map(|row| -> Result<Patient> {
                let mut patient = patient_from_row(row)?;
                if let Some(id) = patient.id {
                    patient.readings = readings_by_patient.remove(&id).unwrap_or_default();
                }
                Ok(patient)
            })
            .collect()
    }

    async fn update_patient(&self, patient: &Patient) -> Result<bool> {
        let patient_id = patient
            .id
            .ok_or_else(|| anyhow!("Cannot update a patient that was never stored"))?;

        let result = sqlx::query(
            r#"
            UPDATE patients
            SET first_name = ?, last_name = ?, date_of_birth = ?
            WHERE id = ?
            "#,
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.date_of_birth)
        .bind(patient_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_patient(&self, patient_id: i64) -> Result<bool> {
        // Readings go with it through ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM patients WHERE id = ?
            "#,
        )
        .bind(patient_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
