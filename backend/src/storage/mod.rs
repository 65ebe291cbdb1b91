//! # Storage Module
//!
//! Persistence for patients and their readings.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! implementation lives in [`connection`] and [`repositories`]. The store
//! owns identifier generation and cascade deletion of readings.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{PatientRepository, ReadingRepository};
pub use traits::{Connection, PatientStorage, ReadingStorage};
