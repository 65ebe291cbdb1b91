//! Field-level rules for inbound transfer objects.
//!
//! All rules run on every call; violations are collected in rule order
//! rather than stopping at the first one.

use chrono::{Local, NaiveDate, NaiveDateTime};
use shared::{BloodSugarReadingDto, PatientDto};

use super::errors::{FieldViolation, ServiceError, ServiceResult};
use super::models::GlucoseUnit;

const NAME_MIN_UNITS: usize = 1;
const NAME_MAX_UNITS: usize = 100;
const LEVEL_MIN: f64 = 0.0;
const LEVEL_MAX: f64 = 1000.0;

pub fn validate_patient(dto: &PatientDto) -> ServiceResult<()> {
    validate_patient_at(dto, Local::now().date_naive())
}

/// Check a patient payload against `today` as the latest allowed birth date.
pub fn validate_patient_at(dto: &PatientDto, today: NaiveDate) -> ServiceResult<()> {
    let mut violations = Vec::new();

    check_name(
        dto.first_name.as_deref(),
        FieldViolation::FirstNameRequired,
        FieldViolation::FirstNameSize,
        &mut violations,
    );
    check_name(
        dto.last_name.as_deref(),
        FieldViolation::LastNameRequired,
        FieldViolation::LastNameSize,
        &mut violations,
    );

    match dto.date_of_birth {
        None => violations.push(FieldViolation::DateOfBirthRequired),
        Some(dob) if dob > today => violations.push(FieldViolation::DateOfBirthInFuture),
        Some(_) => {}
    }

    into_result(violations)
}

pub fn validate_reading(dto: &BloodSugarReadingDto) -> ServiceResult<()> {
    validate_reading_at(dto, Local::now().naive_local())
}

/// Check a reading payload against `now` as the latest allowed timestamp.
pub fn validate_reading_at(dto: &BloodSugarReadingDto, now: NaiveDateTime) -> ServiceResult<()> {
    let mut violations = Vec::new();

    match dto.timestamp {
        None => violations.push(FieldViolation::TimestampRequired),
        Some(ts) if ts > now => violations.push(FieldViolation::TimestampInFuture),
        Some(_) => {}
    }

    match dto.level {
        None => violations.push(FieldViolation::LevelRequired),
        Some(level) => {
            if level < LEVEL_MIN {
                violations.push(FieldViolation::LevelNegative);
            }
            if level > LEVEL_MAX {
                violations.push(FieldViolation::LevelTooHigh);
            }
        }
    }

    match dto.unit.as_deref() {
        None => violations.push(FieldViolation::UnitRequired),
        Some(unit) => {
            if is_blank(unit) {
                violations.push(FieldViolation::UnitRequired);
            }
            if unit.parse::<GlucoseUnit>().is_err() {
                violations.push(FieldViolation::UnitPattern);
            }
        }
    }

    if dto.patient_id.is_none() {
        violations.push(FieldViolation::PatientIdRequired);
    }

    into_result(violations)
}

fn check_name(
    value: Option<&str>,
    required: FieldViolation,
    size: FieldViolation,
    violations: &mut Vec<FieldViolation>,
) {
    let Some(value) = value else {
        violations.push(required);
        return;
    };

    if is_blank(value) {
        violations.push(required);
    }
    let len = value.encode_utf16().count();
    if !(NAME_MIN_UNITS..=NAME_MAX_UNITS).contains(&len) {
        violations.push(size);
    }
}

/// Blank means nothing but ASCII control characters and spaces.
/// Other Unicode whitespace such as U+00A0 counts as content.
fn is_blank(value: &str) -> bool {
    value.chars().all(|c| c <= '\u{20}')
}

fn into_result(violations: Vec<FieldViolation>) -> ServiceResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(violations))
    }
}
