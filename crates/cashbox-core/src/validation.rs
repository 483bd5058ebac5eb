//! # Validation Module
//!
//! Argument validation shared by cassettes and the machine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI                                                           │
//! │  └── Parses the typed amount, rejects non-numbers                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Zero counts / amounts, rejected before any cassette lookup        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cassette / plan checks                                       │
//! │  ├── Capacity and stock bounds                                         │
//! │  └── Dispense plan structure and total                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a note count for deposit or withdrawal.
///
/// ## Example
/// ```rust
/// use cashbox_core::validation::validate_count;
///
/// assert!(validate_count(5).is_ok());
/// assert!(validate_count(0).is_err());
/// ```
pub fn validate_count(count: u32) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "count".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount to dispense.
pub fn validate_amount(amount: u64) -> ValidationResult<()> {
    if amount == 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a cassette capacity.
pub fn validate_capacity(capacity: u32) -> ValidationResult<()> {
    if capacity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_count() {
        assert!(validate_count(1).is_ok());
        assert!(validate_count(u32::MAX).is_ok());
        assert_eq!(
            validate_count(0),
            Err(ValidationError::MustBePositive {
                field: "count".to_string()
            })
        );
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(160).is_ok());
        assert!(validate_amount(0).is_err());
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(200).is_ok());
        assert!(validate_capacity(0).is_err());
    }
}
