use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{BloodSugarReading, GlucoseUnit};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ReadingStorage;

/// Repository for blood-sugar reading operations
#[derive(Clone)]
pub struct ReadingRepository {
    db: DbConnection,
}

impl ReadingRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

/// Decode one `blood_sugar_readings` row
pub(crate) fn reading_from_row(row: &SqliteRow) -> Result<BloodSugarReading> {
    let unit: String = row.try_get("unit")?;
    let unit = unit
        .parse::<GlucoseUnit>()
        .map_err(|e| anyhow!("Corrupt reading row: {}", e))?;

    Ok(BloodSugarReading {
        id: Some(row.try_get("id")?),
        patient_id: row.try_get("patient_id")?,
        timestamp: row.try_get("timestamp")?,
        level: row.try_get("level")?,
        unit,
    })
}

#[async_trait]
impl ReadingStorage for ReadingRepository {
    async fn store_reading(&self, reading: &BloodSugarReading) -> Result<BloodSugarReading> {
        let result = sqlx::query(
            r#"
            INSERT INTO blood_sugar_readings (patient_id, timestamp, level, unit)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(reading.patient_id)
        .bind(reading.timestamp)
        .bind(reading.level)
        .bind(reading.unit.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(BloodSugarReading {
            id: Some(result.last_insert_rowid()),
            ..reading.clone()
        })
    }

    async fn get_reading(&self, reading_id: i64) -> Result<Option<BloodSugarReading>> {
        let row = sqlx::query(
            r#"
            SELECT id, patient_id, timestamp, level, unit
            FROM blood_sugar_readings
            WHERE id = ?
            "#,
        )
        .bind(reading_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(reading_from_row).transpose()
    }

    async fn list_readings_for_patient(&self, patient_id: i64) -> Result<Vec<BloodSugarReading>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, timestamp, level, unit
            FROM blood_sugar_readings
            WHERE patient_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(patient_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(reading_from_row).collect()
    }

    async fn update_reading(&self, reading: &BloodSugarReading) -> Result<bool> {
        let reading_id = reading
            .id
            .ok_or_else(|| anyhow!("Cannot update a reading that was never stored"))?;

        let result = sqlx::query(
            r#"
            UPDATE blood_sugar_readings
            SET timestamp = ?, level = ?, unit = ?
            WHERE id = ?
            "#,
        )
        .bind(reading.timestamp)
        .bind(reading.level)
        .bind(reading.unit.as_str())
        .bind(reading_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_reading(&self, reading_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blood_sugar_readings WHERE id = ?
            "#,
        )
        .bind(reading_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
