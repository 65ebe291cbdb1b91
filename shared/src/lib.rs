//! Transfer objects shared between the REST layer and its clients.
//!
//! Every field that a client may omit is an `Option` so that missing values
//! reach the validation rules instead of failing deserialization. Absent
//! fields are left out of serialized output.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Unit token for milligrams per decilitre.
pub const UNIT_MG_DL: &str = "mg/dL";
/// Unit token for millimoles per litre.
pub const UNIT_MMOL_L: &str = "mmol/L";

/// Externally facing representation of a patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Ignored on input; readings are managed through their own endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_sugar_readings: Option<Vec<BloodSugarReadingDto>>,
}

/// Externally facing representation of a blood-sugar reading.
///
/// The owning patient is carried as a plain identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugarReadingDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Local date-time without offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    /// Either [`UNIT_MG_DL`] or [`UNIT_MMOL_L`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
}

/// Uniform error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: NaiveDateTime,
    pub status: u16,
    /// Short category, e.g. "Validation failed" or "Resource Not Found"
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}
