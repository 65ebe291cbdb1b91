use chrono::NaiveDateTime;
use shared::{UNIT_MG_DL, UNIT_MMOL_L};
use std::fmt;
use std::str::FromStr;

/// Measurement unit of a blood-sugar level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlucoseUnit {
    #[default]
    MgDl,
    MmolL,
}

impl GlucoseUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlucoseUnit::MgDl => UNIT_MG_DL,
            GlucoseUnit::MmolL => UNIT_MMOL_L,
        }
    }
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown glucose unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for GlucoseUnit {
    type Err = UnknownUnit;

    /// Tokens are matched exactly; "mg/dl" is not "mg/dL".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UNIT_MG_DL => Ok(GlucoseUnit::MgDl),
            UNIT_MMOL_L => Ok(GlucoseUnit::MmolL),
            other => Err(UnknownUnit(other.to_string())),
        }
    }
}

/// A single blood-sugar measurement.
///
/// The owner is stored as a plain patient identifier, fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BloodSugarReading {
    pub id: Option<i64>,
    pub patient_id: i64,
    pub timestamp: NaiveDateTime,
    pub level: f64,
    pub unit: GlucoseUnit,
}

impl BloodSugarReading {
    /// Build an unpersisted reading owned by `patient_id`. A missing unit
    /// falls back to mg/dL.
    pub fn new(
        patient_id: i64,
        timestamp: NaiveDateTime,
        level: f64,
        unit: Option<GlucoseUnit>,
    ) -> Self {
        Self {
            id: None,
            patient_id,
            timestamp,
            level,
            unit: unit.unwrap_or_default(),
        }
    }

    pub fn belongs_to(&self, patient_id: i64) -> bool {
        self.patient_id == patient_id
    }
}
