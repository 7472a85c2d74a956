//! # API Error Type
//!
//! Unified error type for kiosk commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk CLI                          │
//! │                                                                         │
//! │  Command Function  ── Result<T, ApiError>                              │
//! │       │                                                                 │
//! │       ├── CoreError::Validation        ─► VALIDATION_ERROR             │
//! │       ├── CoreError::ProductNotFound   ─► NOT_FOUND                    │
//! │       ├── CoreError::InsufficientStock ─► INSUFFICIENT_STOCK           │
//! │       ├── DbError::*                   ─► STORAGE_ERROR                │
//! │       └── ConfigError::*               ─► CONFIG_ERROR                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  main: "error: <message>" on stderr, exit status 1                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kiosk_core::CoreError;
use kiosk_db::DbError;
use serde::Serialize;

use crate::config::ConfigError;

/// Error returned from every kiosk command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Not enough stock for Tomato: available 3, requested 5"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input failed a precondition
    ValidationError,

    /// Sale larger than stock on hand
    InsufficientStock,

    /// The ledger could not be read from or written to storage
    StorageError,

    /// Configuration file or environment is unusable
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
///
/// Every storage failure is a `STORAGE_ERROR`; the message keeps the cause
/// so the operator knows whether the disk or the file is at fault.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                ApiError::storage(format!("Could not open the kiosk database: {}", e))
            }
            DbError::MigrationFailed(e) => {
                ApiError::storage(format!("Could not prepare the kiosk database: {}", e))
            }
            DbError::PoolExhausted => ApiError::storage("Database is busy"),
            other => {
                tracing::error!(error = %other, "Storage operation failed");
                ApiError::storage(format!("Storage operation failed: {}", other))
            }
        }
    }
}

/// Converts ledger errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            e @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, e.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<kiosk_core::ValidationError> for ApiError {
    fn from(err: kiosk_core::ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
