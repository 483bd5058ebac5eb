//! # Denomination Module
//!
//! Provides the `Denomination` type: the face value of one banknote.
//!
//! ## Why a Newtype?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A bare u32 could be a count, a capacity, or a face value.              │
//! │                                                                         │
//! │    deposit(100, 5)   ← which one is the note, which one the count?     │
//! │                                                                         │
//! │  Denomination makes the face value its own type and rules out zero:    │
//! │    deposit(Denomination::new(100)?, 5)                                 │
//! │                                                                         │
//! │  The set a machine supports is configuration, not an enum, so the     │
//! │  same binary serves a 10/50/100 test rig and a 7-cassette ATM.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

/// The face value of a banknote, always positive.
///
/// Ordering is numeric, so a `BTreeMap<Denomination, _>` iterates smallest
/// note first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u32", into = "u32")]
#[ts(export)]
pub struct Denomination(u32);

impl Denomination {
    /// Creates a denomination from a face value.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::Denomination;
    ///
    /// let hundred = Denomination::new(100).unwrap();
    /// assert_eq!(hundred.value(), 100);
    /// assert!(Denomination::new(0).is_err());
    /// ```
    pub fn new(face_value: u32) -> Result<Self, ValidationError> {
        if face_value == 0 {
            return Err(ValidationError::MustBePositive {
                field: "denomination".to_string(),
            });
        }

        Ok(Denomination(face_value))
    }

    /// Returns the face value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Value of `count` notes of this denomination.
    ///
    /// Cannot overflow: `u32::MAX * u32::MAX < u64::MAX`.
    #[inline]
    pub const fn times(&self, count: u32) -> u64 {
        self.0 as u64 * count as u64
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Denomination {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Denomination::new(value)
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
