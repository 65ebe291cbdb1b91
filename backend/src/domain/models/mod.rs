pub mod patient;
pub mod reading;

pub use patient::Patient;
pub use reading::{BloodSugarReading, GlucoseUnit};
