// Repository modules
pub mod patient_repository;
pub mod reading_repository;

// Re-export repository types
pub use patient_repository::PatientRepository;
pub use reading_repository::ReadingRepository;
