//! # Machine State
//!
//! Shares one `CashMachine` between every caller of the host.
//!
//! ## Thread Safety
//! The machine is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several UI commands may run concurrently
//! 2. An amount withdrawal plans, validates and commits as one unit; no
//!    other command may observe or change the cassettes in between
//! 3. Queries must never see a half-applied withdrawal
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Machine State Operations                             │
//! │                                                                         │
//! │  UI Action                Command                 Machine Change        │
//! │  ─────────                ───────                 ──────────────        │
//! │                                                                         │
//! │  Load notes ─────────────► deposit() ────────────► cassette.add(n)     │
//! │                                                                         │
//! │  Unload notes ───────────► withdraw() ───────────► cassette.remove(n)  │
//! │                                                                         │
//! │  Enter amount ───────────► withdraw_amount() ────► plan + commit       │
//! │                                                                         │
//! │  Refresh display ────────► get_machine() ────────► (read only)         │
//! │                                                                         │
//! │  NOTE: Every command holds the lock for its whole duration.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use cashbox_core::CashMachine;

/// Shared, mutex-guarded machine.
///
/// Cloning is cheap and every clone refers to the same machine.
#[derive(Debug, Clone)]
pub struct MachineState {
    machine: Arc<Mutex<CashMachine>>,
}

impl MachineState {
    pub fn new(machine: CashMachine) -> Self {
        MachineState {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let balance = machine_state.with_machine(|m| m.balance());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CashMachine) -> R,
    {
        let machine = self.machine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&machine)
    }

    /// Executes a function with write access to the machine.
    ///
    /// A panic inside another caller's closure poisons the lock but cannot
    /// leave a cassette half-updated: every machine operation validates before
    /// it mutates. The poisoned guard is therefore recovered.
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CashMachine) -> R,
    {
        let mut machine = self.machine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut machine)
    }
}
