use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetReportError {
    #[error("Invalid report period '{0}': expected YYYY-MM or YYYY")]
    InvalidPeriod(String),

    #[error("Invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Statement does not reconcile ({check}): expected {expected}, got {actual}")]
    ReconciliationViolation {
        check: String,
        expected: f64,
        actual: f64,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FleetReportError>;
