pub mod patient_mapper;
pub mod reading_mapper;

pub use patient_mapper::PatientMapper;
pub use reading_mapper::ReadingMapper;
