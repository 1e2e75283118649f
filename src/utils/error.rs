use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Exchange rate for {currency} not found")]
    RateLookupError { currency: String },

    #[error("Query failed: {query}: {message}")]
    QueryError { query: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Storage,
    Query,
}

impl EtlError {
    pub fn parse(message: impl Into<String>) -> Self {
        EtlError::ParseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::CsvError(_) | EtlError::ParseError { .. } | EtlError::RateLookupError { .. } => {
                ErrorCategory::Data
            }
            EtlError::IoError(_) | EtlError::DatabaseError(_) => ErrorCategory::Storage,
            EtlError::QueryError { .. } => ErrorCategory::Query,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 依錯誤類別決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Data => 3,
            ErrorCategory::Storage | ErrorCategory::Query => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not fetch the source page: {}", self),
            ErrorCategory::Data => format!("Input data could not be processed: {}", self),
            ErrorCategory::Storage => format!("Could not write output: {}", self),
            ErrorCategory::Query => format!("Query against the database failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and the source_url setting",
            EtlError::HttpStatusError { .. } => "Verify that source_url still points to the bank list page",
            EtlError::ParseError { .. } => "The page layout or rates file format may have changed",
            EtlError::CsvError(_) => "Check that the rates file has Currency and Rate columns",
            EtlError::RateLookupError { .. } => "Add the missing currency row to the rates file",
            EtlError::IoError(_) => "Check file paths and permissions",
            EtlError::DatabaseError(_) => "Check that database_path is writable and not locked",
            EtlError::QueryError { .. } => "Check the query text and column names",
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => "Fix the configuration file or remove the override",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
