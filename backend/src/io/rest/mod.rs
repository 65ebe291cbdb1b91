//! # REST API Interface Layer
//!
//! - **patient_apis**: `/api/patients` collection and items
//! - **reading_apis**: `/api/patients/{patientId}/readings`, nested under a patient
//! - **mappers**: entity to transfer object conversion
//! - **error**: boundary translation of failures into the error envelope

pub mod error;
pub mod mappers;
pub mod patient_apis;
pub mod reading_apis;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiError;
pub use patient_apis::*;
pub use reading_apis::*;
