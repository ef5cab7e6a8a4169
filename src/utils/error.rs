use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Invalid Pauli operator '{symbol}' in '{input}'")]
    PauliParseError { input: String, symbol: char },

    #[error("Invalid stabilizer '{input}': {reason}")]
    StabilizerParseError { input: String, reason: String },

    #[error("Length mismatch: expected {expected} qubits, got {actual} in '{operator}'")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        operator: String,
    },

    #[error("Non-Hermitian phase (±i) encountered multiplying {left} by {right}")]
    NonHermitianPhase { left: String, right: String },

    #[error("Invalid outcome {value} for measurement '{measurement}': must be +1 or -1")]
    InvalidOutcome { measurement: String, value: i64 },

    #[error("Archive operation failed: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Algebra,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FusionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FusionError::PauliParseError { .. }
            | FusionError::StabilizerParseError { .. }
            | FusionError::InvalidOutcome { .. }
            | FusionError::ValidationError { .. } => ErrorCategory::Input,
            FusionError::LengthMismatch { .. } | FusionError::NonHermitianPhase { .. } => {
                ErrorCategory::Algebra
            }
            FusionError::ConfigValidationError { .. }
            | FusionError::MissingConfigError { .. }
            | FusionError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FusionError::ArchiveError(_)
            | FusionError::CsvError(_)
            | FusionError::IoError(_)
            | FusionError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Algebra => ErrorSeverity::High,
            ErrorCategory::Output => match self {
                FusionError::IoError(_) => ErrorSeverity::Critical,
                _ => ErrorSeverity::Medium,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FusionError::PauliParseError { .. } => {
                "Use only the characters I, X, Y and Z in Pauli strings"
            }
            FusionError::StabilizerParseError { .. } => {
                "Write generators as a sign followed by a Pauli string, e.g. +XXI or -ZZI"
            }
            FusionError::LengthMismatch { .. } => {
                "Make every generator and measurement act on the same number of qubits"
            }
            FusionError::NonHermitianPhase { .. } => {
                "Check that the resource generators pairwise commute"
            }
            FusionError::InvalidOutcome { .. } => "Measurement outcomes must be +1 or -1",
            FusionError::ArchiveError(_) => "Disable archiving or check the output directory",
            FusionError::CsvError(_) | FusionError::SerializationError(_) => {
                "Try a different output format"
            }
            FusionError::IoError(_) => "Check that the paths exist and are writable",
            FusionError::ConfigValidationError { .. }
            | FusionError::MissingConfigError { .. }
            | FusionError::InvalidConfigValueError { .. } => {
                "Review the configuration file or command-line flags"
            }
            FusionError::ValidationError { .. } => "Correct the input and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Algebra => format!("Stabilizer update failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FusionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebra_errors_are_high_severity() {
        let err = FusionError::NonHermitianPhase {
            left: "+XI".to_string(),
            right: "+ZI".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Algebra);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Stabilizer update failed"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = FusionError::from(std::io::Error::other("disk gone"));
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
