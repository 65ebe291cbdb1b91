use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::repositories::{PatientRepository, ReadingRepository};
use super::traits::Connection;
use crate::config::DatabaseSettings;

/// DbConnection owns the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and set up the schema
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database url: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the database described by the settings
    pub async fn init(settings: &DatabaseSettings) -> Result<Self> {
        info!("Opening database at {}", settings.url);
        Self::new(&settings.url, settings.max_connections).await
    }

    /// Initialize a private in-memory database for tests.
    ///
    /// A single connection keeps the in-memory database alive for the
    /// lifetime of the pool.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        Self::new("sqlite::memory:", 1).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS patients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                date_of_birth TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blood_sugar_readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                patient_id INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                level REAL NOT NULL,
                unit TEXT NOT NULL DEFAULT 'mg/dL',
                FOREIGN KEY (patient_id) REFERENCES patients (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Readings are always looked up by owner
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_blood_sugar_readings_patient_id
            ON blood_sugar_readings(patient_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type PatientRepository = PatientRepository;
    type ReadingRepository = ReadingRepository;

    fn create_patient_repository(&self) -> Self::PatientRepository {
        PatientRepository::new(self.clone())
    }

    fn create_reading_repository(&self) -> Self::ReadingRepository {
        ReadingRepository::new(self.clone())
    }
}
