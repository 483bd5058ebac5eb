//! # cashbox-core: Banknote Inventory of a Cash Machine
//!
//! This crate holds the machine's business logic as pure, synchronous code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashbox Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer (UI)                      │   │
//! │  │    Note counts ──► Amount input ──► Ticked notes ──► Result    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cashbox-host                                 │   │
//! │  │    config, Arc<Mutex<CashMachine>>, commands, ApiError          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cashbox-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │denomination│  │ cassette  │  │  machine  │  │   plan    │  │   │
//! │  │   │ face value │  │ bounded   │  │ deposit   │  │ greedy    │  │   │
//! │  │   │            │  │ counter   │  │ withdraw  │  │ selectors │  │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO THREADS                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`denomination`] - `Denomination`, a positive face value
//! - [`cassette`] - `Cassette`, storage for one denomination
//! - [`machine`] - `CashMachine`, the inventory and its operations
//! - [`plan`] - Dispense plans, greedy planning, plan selectors
//! - [`validation`] - Argument validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **All or nothing**: a failed operation leaves every cassette untouched
//! 2. **Fixed denominations**: chosen at construction, never added or removed
//! 3. **Explicit Errors**: one error variant per failure kind, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cashbox_core::{CashMachine, Denomination, MachineError};
//!
//! let d = |v| Denomination::new(v).unwrap();
//! let mut machine = CashMachine::new([(d(10), 5), (d(50), 5), (d(100), 5)]).unwrap();
//! machine.deposit(d(10), 1).unwrap();
//!
//! // 15 cannot be paid with a single 10 note
//! assert!(matches!(
//!     machine.withdraw_amount(15),
//!     Err(MachineError::AmountNotDispensable { .. })
//! ));
//! assert_eq!(machine.balance(), 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cassette;
pub mod denomination;
pub mod error;
pub mod machine;
pub mod plan;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cassette::Cassette;
pub use denomination::Denomination;
pub use error::{ConfigError, MachineError, MachineResult, PlanViolation, ValidationError};
pub use machine::CashMachine;
pub use plan::{DispensePlan, PlanSelector, PreferredDenominations};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Face values of a typical seven-cassette machine.
pub const STANDARD_DENOMINATIONS: [u32; 7] = [10, 50, 100, 500, 1000, 2000, 5000];
