//! # Domain Module
//!
//! Business rules for patients and their blood-sugar readings.
//!
//! - **models**: `Patient` and `BloodSugarReading` entities
//! - **validation**: field rules applied to inbound transfer objects
//! - **consistency**: identity, existence and ownership checks
//! - **errors**: the failure taxonomy every service returns
//! - **patient_service** / **reading_service**: request orchestration
//!
//! Services are generic over a storage [`Connection`](crate::storage::Connection)
//! and never produce HTTP responses themselves.

pub mod consistency;
pub mod errors;
pub mod models;
pub mod patient_service;
pub mod reading_service;
pub mod validation;

pub use errors::{Conflict, FieldViolation, ResourceKind, ServiceError, ServiceResult};
pub use patient_service::PatientService;
pub use reading_service::ReadingService;
