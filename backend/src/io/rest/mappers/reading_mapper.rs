//! backend/src/io/rest/mappers/reading_mapper.rs

use crate::domain::models::{BloodSugarReading, GlucoseUnit};
use shared::BloodSugarReadingDto;

/// Mapper to convert between shared reading DTOs and domain readings.
pub struct ReadingMapper;

impl ReadingMapper {
    /// Converts a domain reading to its DTO. The owner becomes a plain id.
    pub fn to_dto(domain: BloodSugarReading) -> BloodSugarReadingDto {
        BloodSugarReadingDto {
            id: domain.id,
            timestamp: Some(domain.timestamp),
            level: Some(domain.level),
            unit: Some(domain.unit.as_str().to_string()),
            patient_id: Some(domain.patient_id),
        }
    }

    pub fn to_dto_list(domain_readings: Vec<BloodSugarReading>) -> Vec<BloodSugarReadingDto> {
        domain_readings.into_iter().map(Self::to_dto).collect()
    }

    /// Builds an unpersisted reading owned by `patient_id` from a validated
    /// DTO. The DTO's `id` and `patientId` are ignored. Returns `None` when a
    /// required field is missing or the unit is unknown.
    pub fn to_domain(dto: BloodSugarReadingDto, patient_id: i64) -> Option<BloodSugarReading> {
        let unit = match dto.unit {
            Some(unit) => Some(unit.parse::<GlucoseUnit>().ok()?),
            None => None,
        };

        Some(BloodSugarReading::new(
            patient_id,
            dto.timestamp?,
            dto.level?,
            unit,
        ))
    }
}
