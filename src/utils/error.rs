use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Object not found: {location}")]
    ObjectNotFound { location: String },

    #[error("Access denied for {location}: {message}")]
    AccessDenied { location: String, message: String },

    #[error("Storage {operation} failed for {location}: {message}")]
    StorageError {
        operation: &'static str,
        location: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Required column `{column}` is missing from the header")]
    MissingColumnError { column: String },

    #[error("Dataset contains no rows; average, max and min are undefined")]
    EmptyDatasetError,

    #[error("Invalid value in row {row}, column `{column}`: {value}")]
    InvalidValueError {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Source missing, destination unwritable, network or filesystem failure.
    Transport,
    /// Malformed table content or an undefined aggregate.
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ObjectNotFound { .. }
            | EtlError::AccessDenied { .. }
            | EtlError::StorageError { .. }
            | EtlError::IoError(_) => ErrorCategory::Transport,
            EtlError::CsvError(_)
            | EtlError::MissingColumnError { .. }
            | EtlError::EmptyDatasetError
            | EtlError::InvalidValueError { .. }
            | EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            EtlError::ObjectNotFound { .. }
            | EtlError::AccessDenied { .. }
            | EtlError::CsvError(_)
            | EtlError::MissingColumnError { .. }
            | EtlError::EmptyDatasetError
            | EtlError::InvalidValueError { .. } => ErrorSeverity::High,
            EtlError::StorageError { .. }
            | EtlError::IoError(_)
            | EtlError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ObjectNotFound { .. } => {
                "Check that --source_bucket and --source_file point to an existing object"
            }
            EtlError::AccessDenied { .. } => {
                "Check the credentials and bucket policy for read/write permissions"
            }
            EtlError::StorageError { .. } => {
                "Check network connectivity, region and endpoint settings"
            }
            EtlError::IoError(_) => "Check that the local storage root exists and is writable",
            EtlError::CsvError(_) => {
                "Make sure the source file is comma-separated and every payment_value is numeric"
            }
            EtlError::MissingColumnError { .. } => {
                "The source file needs order_id, payment_type, payment_value and payment_installments columns"
            }
            EtlError::EmptyDatasetError => "The source file has a header but no transactions",
            EtlError::InvalidValueError { .. } => "Fix or remove the offending row in the source file",
            EtlError::SerializationError(_) => "This is a bug; please report it with the input file",
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Storage problem: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let not_found = EtlError::ObjectNotFound {
            location: "s3://bucket/file.csv".to_string(),
        };
        assert_eq!(not_found.category(), ErrorCategory::Transport);
        assert_eq!(EtlError::EmptyDatasetError.category(), ErrorCategory::Data);

        let missing = EtlError::MissingConfigError {
            field: "source_bucket".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = vec![
            EtlError::EmptyDatasetError,
            EtlError::MissingColumnError {
                column: "payment_value".to_string(),
            },
            EtlError::StorageError {
                operation: "put",
                location: "s3://bucket/out.json".to_string(),
                message: "timeout".to_string(),
            },
            EtlError::ConfigError {
                message: "bad".to_string(),
            },
        ];

        for error in errors {
            assert_ne!(error.exit_code(), 0, "{error} must fail the run");
        }
    }

    #[test]
    fn test_user_friendly_message_mentions_cause() {
        let err = EtlError::MissingColumnError {
            column: "payment_type".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(message.starts_with("Input data problem"));
        assert!(message.contains("payment_type"));
    }
}
