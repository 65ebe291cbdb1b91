//! backend/src/io/rest/mappers/patient_mapper.rs

use super::reading_mapper::ReadingMapper;
use crate::domain::models::Patient;
use shared::PatientDto;

/// Mapper to convert between shared patient DTOs and domain patients.
pub struct PatientMapper;

impl PatientMapper {
    /// Converts a domain patient to its DTO, readings included. The reading
    /// list is always present, empty when the patient has none.
    pub fn to_dto(domain: Patient) -> PatientDto {
        PatientDto {
            id: domain.id,
            first_name: Some(domain.first_name),
            last_name: Some(domain.last_name),
            date_of_birth: Some(domain.date_of_birth),
            blood_sugar_readings: Some(ReadingMapper::to_dto_list(domain.readings)),
        }
    }

    pub fn to_dto_list(domain_patients: Vec<Patient>) -> Vec<PatientDto> {
        domain_patients.into_iter().map(Self::to_dto).collect()
    }

    /// Builds an unpersisted patient from a validated DTO. The DTO's `id`
    /// and readings are ignored.
    pub fn to_domain(dto: PatientDto) -> Option<Patient> {
        Some(Patient::new(
            dto.first_name?,
            dto.last_name?,
            dto.date_of_birth?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BloodSugarReading, GlucoseUnit};
    use chrono::NaiveDate;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 7, 20).unwrap()
    }

    #[test]
    fn test_to_dto_without_readings_has_empty_list() {
        let mut patient = Patient::new("John".to_string(), "Doe".to_string(), dob());
        patient.id = Some(1);

        let dto = PatientMapper::to_dto(patient);
        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.first_name.as_deref(), Some("John"));
        assert_eq!(dto.last_name.as_deref(), Some("Doe"));
        assert_eq!(dto.date_of_birth, Some(dob()));
        assert_eq!(dto.blood_sugar_readings, Some(Vec::new()));
    }

    #[test]
    fn test_to_dto_maps_nested_readings() {
        let mut patient = Patient::new("Jane".to_string(), "Roe".to_string(), dob());
        patient.id = Some(2);
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        patient.readings = vec![BloodSugarReading {
            id: Some(5),
            patient_id: 2,
            timestamp: ts,
            level: 5.8,
            unit: GlucoseUnit::MmolL,
        }];

        let dto = PatientMapper::to_dto(patient);
        let readings = dto.blood_sugar_readings.expect("Readings should be present");
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].id, Some(5));
        assert_eq!(readings[0].patient_id, Some(2));
        assert_eq!(readings[0].unit.as_deref(), Some("mmol/L"));
    }

    #[test]
    fn test_to_domain_never_takes_id() {
        let dto = PatientDto {
            id: Some(77),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            date_of_birth: Some(dob()),
            blood_sugar_readings: None,
        };

        let patient = PatientMapper::to_domain(dto).expect("Complete DTO should map");
        assert_eq!(patient.id, None);
        assert!(patient.readings.is_empty());
        assert_eq!(patient.first_name, "John");
    }
}
