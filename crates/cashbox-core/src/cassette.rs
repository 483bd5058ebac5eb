//! # Cassette Module
//!
//! A cassette is the physical storage for one denomination: a bounded note
//! counter.
//!
//! ## Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 0 <= count <= capacity  (always)                        │
//! │                                                                         │
//! │  add(n)    ── n > free_space ──► CapacityExceeded  (count unchanged)   │
//! │            └─ otherwise ───────► count += n                            │
//! │                                                                         │
//! │  remove(n) ── n > count ───────► InsufficientStock (count unchanged)   │
//! │            └─ otherwise ───────► count -= n                            │
//! │                                                                         │
//! │  No partial acceptance: all n notes move, or none do.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::denomination::Denomination;
use crate::error::{ConfigError, MachineError, MachineResult};
use crate::validation::{validate_capacity, validate_count};

/// Storage for the notes of a single denomination.
///
/// `denomination` and `capacity` are fixed at construction. `count` only
/// changes through [`Cassette::add`] and [`Cassette::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cassette {
    denomination: Denomination,
    capacity: u32,
    count: u32,
}

impl Cassette {
    /// Creates an empty cassette.
    ///
    /// ## Errors
    /// `ConfigError::ZeroCapacity` if `capacity` is zero.
    pub fn new(denomination: Denomination, capacity: u32) -> Result<Self, ConfigError> {
        validate_capacity(capacity).map_err(|_| ConfigError::ZeroCapacity(denomination))?;

        Ok(Cassette {
            denomination,
            capacity,
            count: 0,
        })
    }

    #[inline]
    pub const fn denomination(&self) -> Denomination {
        self.denomination
    }

    #[inline]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Notes currently stored.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Notes that can still be added.
    #[inline]
    pub const fn free_space(&self) -> u32 {
        self.capacity - self.count
    }

    /// Total face value held.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.denomination.times(self.count)
    }

    /// Adds `count` notes.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::{Cassette, Denomination};
    ///
    /// let mut cassette = Cassette::new(Denomination::new(50).unwrap(), 5).unwrap();
    /// cassette.add(3).unwrap();
    /// assert_eq!(cassette.count(), 3);
    ///
    /// // 3 more would make 6 > capacity 5: rejected, nothing added
    /// assert!(cassette.add(3).is_err());
    /// assert_eq!(cassette.count(), 3);
    /// ```
    pub fn add(&mut self, count: u32) -> MachineResult<()> {
        validate_count(count)?;

        if count > self.free_space() {
            return Err(MachineError::CapacityExceeded {
                denomination: self.denomination,
                capacity: self.capacity,
                stored: self.count,
                requested: count,
            });
        }

        self.count += count;
        Ok(())
    }

    /// Removes `count` notes.
    pub fn remove(&mut self, count: u32) -> MachineResult<()> {
        validate_count(count)?;

        if count > self.count {
            return Err(MachineError::InsufficientStock {
                denomination: self.denomination,
                available: self.count,
                requested: count,
            });
        }

        self.count -= count;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
