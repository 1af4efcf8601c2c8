use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApollonatorError {
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read names file '{path}': {source}")]
    NamesFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Received non-200 response code: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("API rate limit reached, please try again later")]
    RateLimited,

    #[error("No API keys remain: every configured key has been exhausted")]
    CredentialsExhausted,

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to write output file '{path}': {source}")]
    OutputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Input,
    Network,
    RateLimit,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ApollonatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigReadError { .. }
            | Self::ConfigParseError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
            Self::NamesFileError { .. } => ErrorCategory::Input,
            Self::ApiError(_) | Self::UnexpectedStatus { .. } | Self::SerializationError(_) => {
                ErrorCategory::Network
            }
            Self::RateLimited | Self::CredentialsExhausted => ErrorCategory::RateLimit,
            Self::SpreadsheetError(_) | Self::CsvError(_) | Self::OutputError { .. } => {
                ErrorCategory::Output
            }
            Self::IoError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單筆查詢失敗，流程可繼續
            ErrorCategory::Network => ErrorSeverity::Low,
            ErrorCategory::RateLimit => ErrorSeverity::Medium,
            ErrorCategory::Config | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 此錯誤是否必須中止整個執行（先寫出已累積的結果）
    pub fn is_run_terminating(&self) -> bool {
        matches!(self, Self::RateLimited | Self::CredentialsExhausted)
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigReadError { .. } => "Check that the config file exists and is readable",
            Self::ConfigParseError { .. } => {
                "Make sure the config file is valid YAML (or TOML for .toml files)"
            }
            Self::MissingConfigError { .. } => {
                "Add the missing field under the 'apollonator' section of the config file"
            }
            Self::InvalidConfigValueError { .. } => "Fix the reported value and run again",
            Self::NamesFileError { .. } => "Check that the names file exists and is readable",
            Self::ApiError(_) => "Check your network connection and the API endpoint",
            Self::SerializationError(_) => "The API returned an unexpected payload",
            Self::UnexpectedStatus { .. } => "Verify the API key and organization name",
            Self::RateLimited => "Wait for the API rate limit window to reset, or add more API keys",
            Self::CredentialsExhausted => "Add fresh API keys under 'api_keys' and run again",
            Self::SpreadsheetError(_) | Self::CsvError(_) | Self::OutputError { .. } => {
                "Check that the output location is writable and not open in another program"
            }
            Self::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::RateLimited => "API limit reached. Please try again later.".to_string(),
            Self::CredentialsExhausted => {
                "All API keys have been used up for today.".to_string()
            }
            Self::MissingConfigError { field } => {
                format!("The config file is missing '{}'.", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApollonatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_terminating_errors_exit_non_zero() {
        assert!(ApollonatorError::RateLimited.is_run_terminating());
        assert!(ApollonatorError::CredentialsExhausted.is_run_terminating());
        assert_eq!(ApollonatorError::RateLimited.exit_code(), 2);
        assert_eq!(ApollonatorError::CredentialsExhausted.exit_code(), 2);
    }

    #[test]
    fn test_per_record_errors_are_not_terminating() {
        let err = ApollonatorError::UnexpectedStatus { status: 500 };
        assert!(!err.is_run_terminating());
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Received non-200 response code: 500");
    }

    #[test]
    fn test_startup_and_output_errors_exit_codes() {
        let config = ApollonatorError::MissingConfigError {
            field: "organization".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Config);
        assert_eq!(config.exit_code(), 1);

        let output = ApollonatorError::OutputError {
            path: "out.xlsx".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(output.category(), ErrorCategory::Output);
        assert_eq!(output.exit_code(), 3);
    }
}
