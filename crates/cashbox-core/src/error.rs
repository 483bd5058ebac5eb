//! # Error Types
//!
//! Domain-specific error types for cashbox-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashbox-core errors (this file)                                       │
//! │  ├── MachineError     - Rejected machine operations                    │
//! │  │   └── PlanViolation - Why a proposed dispense plan was refused      │
//! │  ├── ValidationError  - Argument validation failures                   │
//! │  └── ConfigError      - Invalid machine configuration                  │
//! │                                                                         │
//! │  cashbox-host errors (separate crate)                                  │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → MachineError → ApiError → UI                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Every rejected operation leaves the machine untouched
//! 2. Include context in error messages (denomination, counts)
//! 3. One variant per failure kind, so callers match instead of parsing text

use thiserror::Error;

use crate::denomination::Denomination;

// =============================================================================
// Machine Error
// =============================================================================

/// Errors returned by cassette and machine operations.
///
/// None of these are fatal. The machine state is exactly what it was before
/// the failed call, so the caller can retry with adjusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The machine has no cassette for this denomination.
    #[error("Denomination {denomination} is not supported by this machine")]
    UnsupportedDenomination { denomination: Denomination },

    /// A zero amount or note count was supplied.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ValidationError),

    /// A deposit would overflow the cassette.
    ///
    /// ## User Workflow
    /// ```text
    /// Deposit 10 x 100
    ///      │
    ///      ▼
    /// Cassette 100: stored=195, capacity=200
    ///      │
    ///      ▼
    /// CapacityExceeded { denomination: 100, capacity: 200, stored: 195, requested: 10 }
    ///      │
    ///      ▼
    /// UI shows: "Cassette 100 has room for 5 notes"
    /// ```
    #[error(
        "Cassette {denomination} cannot take {requested} notes: {stored} of {capacity} slots used"
    )]
    CapacityExceeded {
        denomination: Denomination,
        capacity: u32,
        stored: u32,
        requested: u32,
    },

    /// More notes requested than the cassette holds.
    #[error("Insufficient notes of {denomination}: available {available}, requested {requested}")]
    InsufficientStock {
        denomination: Denomination,
        available: u32,
        requested: u32,
    },

    /// Greedy planning could not reach the exact amount with current stock.
    #[error("Cannot dispense {amount} with available notes ({remaining} left over)")]
    AmountNotDispensable { amount: u64, remaining: u64 },

    /// A caller-supplied plan failed validation.
    #[error("Invalid dispense plan: {0}")]
    InvalidDispensePlan(PlanViolation),
}

/// The first check a proposed dispense plan failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanViolation {
    #[error("plan is empty")]
    Empty,

    #[error("denomination {0} is not supported")]
    UnsupportedDenomination(Denomination),

    #[error("zero notes requested for {0}")]
    ZeroCount(Denomination),

    #[error("{requested} notes of {denomination} requested but only {available} available")]
    ExceedsStock {
        denomination: Denomination,
        available: u32,
        requested: u32,
    },

    /// `actual` is `None` when the weighted sum overflows.
    #[error("plan totals {} but {expected} was requested", display_total(.actual))]
    SumMismatch { expected: u64, actual: Option<u64> },
}

fn display_total(actual: &Option<u64>) -> String {
    match actual {
        Some(total) => total.to_string(),
        None => "more than u64::MAX".to_string(),
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Argument validation errors.
///
/// Raised before any lookup happens, so a bad argument never reaches a cassette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Machine configuration errors.
///
/// Returned while building a machine. A machine that was built is always
/// valid, so none of these can occur afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A machine needs at least one cassette.
    #[error("At least one denomination must be configured")]
    NoDenominations,

    #[error("Denomination {0} is configured more than once")]
    DuplicateDenomination(Denomination),

    #[error("Cassette {0} must have a positive capacity")]
    ZeroCapacity(Denomination),

    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MachineError.
pub type MachineResult<T> = Result<T, MachineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_error_messages() {
        let err = MachineError::InsufficientStock {
            denomination: d(50),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient notes of 50: available 3, requested 5"
        );

        let err = MachineError::AmountNotDispensable {
            amount: 15,
            remaining: 5,
        };
        assert_eq!(
            err.to_string(),
            "Cannot dispense 15 with available notes (5 left over)"
        );
    }

    #[test]
    fn test_plan_violation_messages() {
        let err = MachineError::InvalidDispensePlan(PlanViolation::SumMismatch {
            expected: 60,
            actual: Some(50),
        });
        assert_eq!(
            err.to_string(),
            "Invalid dispense plan: plan totals 50 but 60 was requested"
        );

        let overflow = PlanViolation::SumMismatch {
            expected: 60,
            actual: None,
        };
        assert_eq!(
            overflow.to_string(),
            "plan totals more than u64::MAX but 60 was requested"
        );
    }

    #[test]
    fn test_validation_converts_to_machine_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "count".to_string(),
        };
        let machine_err: MachineError = validation_err.into();
        assert!(matches!(machine_err, MachineError::InvalidAmount(_)));
        assert_eq!(machine_err.to_string(), "Invalid amount: count must be positive");
    }
}
