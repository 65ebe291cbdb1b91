use chrono::NaiveDate;

use super::reading::BloodSugarReading;

/// A patient and the readings it owns.
///
/// `id` is `None` until the store assigns one. Readings are never changed
/// through the patient; they are loaded alongside it for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub readings: Vec<BloodSugarReading>,
}

impl Patient {
    /// Build a patient that has not been persisted yet.
    pub fn new(first_name: String, last_name: String, date_of_birth: NaiveDate) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            date_of_birth,
            readings: Vec::new(),
        }
    }
}
