//! # API Error Types
//!
//! Errors returned from host commands to the presentation layer.
//!
//! ## Error Translation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Translation Flow                               │
//! │                                                                         │
//! │  cashbox-core errors              ApiError (serialized to the UI)       │
//! │  ───────────────────              ───────────────────────────────       │
//! │                                                                         │
//! │  UnsupportedDenomination ───────► UNSUPPORTED_DENOMINATION              │
//! │  InvalidAmount ─────────────────► VALIDATION_ERROR                      │
//! │  CapacityExceeded ──────────────► CAPACITY_EXCEEDED                     │
//! │  InsufficientStock ─────────────► INSUFFICIENT_STOCK                    │
//! │  AmountNotDispensable ──────────► AMOUNT_NOT_DISPENSABLE                │
//! │  InvalidDispensePlan ───────────► INVALID_DISPENSE_PLAN                 │
//! │  ConfigError ───────────────────► CONFIGURATION                         │
//! │                                                                         │
//! │  The UI switches on `code` and shows `message` to the customer.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use cashbox_core::{ConfigError, MachineError};

/// Error returned from host commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for categorizing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    UnsupportedDenomination,

    /// Zero or otherwise invalid argument
    ValidationError,

    CapacityExceeded,

    InsufficientStock,

    AmountNotDispensable,

    InvalidDispensePlan,

    /// Machine could not be built from its configuration
    Configuration,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<MachineError> for ApiError {
    fn from(err: MachineError) -> Self {
        let code = match &err {
            MachineError::UnsupportedDenomination { .. } => ErrorCode::UnsupportedDenomination,
            MachineError::InvalidAmount(_) => ErrorCode::ValidationError,
            MachineError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            MachineError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            MachineError::AmountNotDispensable { .. } => ErrorCode::AmountNotDispensable,
            MachineError::InvalidDispensePlan(_) => ErrorCode::InvalidDispensePlan,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::Configuration, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Startup failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid machine configuration: {0}")]
    Config(#[from] ConfigError),

    /// Initial notes did not fit, e.g. `initial_count > cassette_capacity`.
    #[error("Failed to load initial notes: {0}")]
    Seed(#[from] MachineError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashbox_core::{Denomination, PlanViolation};

    #[test]
    fn test_machine_error_codes() {
        let err: ApiError = MachineError::AmountNotDispensable {
            amount: 15,
            remaining: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::AmountNotDispensable);
        assert_eq!(err.message, "Cannot dispense 15 with available notes (5 left over)");

        let err: ApiError = MachineError::InvalidDispensePlan(PlanViolation::Empty).into();
        assert_eq!(err.code, ErrorCode::InvalidDispensePlan);

        let err: ApiError = MachineError::UnsupportedDenomination {
            denomination: Denomination::new(20).unwrap(),
        }
        .into();
        assert_eq!(err.to_string(), "[UnsupportedDenomination] Denomination 20 is not supported by this machine");
    }

    #[test]
    fn test_error_json_shape() {
        let err = ApiError::new(ErrorCode::ValidationError, "amount must be positive");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "amount must be positive");
    }

    #[test]
    fn test_config_error_code() {
        let err: ApiError = ConfigError::NoDenominations.into();
        assert_eq!(err.code, ErrorCode::Configuration);
    }
}
