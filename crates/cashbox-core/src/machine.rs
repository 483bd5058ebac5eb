//! # Cash Machine
//!
//! The machine owns one [`Cassette`] per supported denomination and is the
//! only entry point for mutating them.
//!
//! ## Amount Withdrawal Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  withdraw_amount_using(amount, selector)                │
//! │                                                                         │
//! │  ┌──────┐    ┌──────────┐    ┌────────────┐    ┌────────────┐  ┌─────┐ │
//! │  │ Idle │───►│ Planning │───►│ Validating │───►│ Committing │─►│Done │ │
//! │  └──────┘    └────┬─────┘    └─────┬──────┘    └────────────┘  └─────┘ │
//! │      ▲            │                │                                    │
//! │      │   AmountNotDispensable  InvalidDispensePlan                      │
//! │      └────────────┴────────────────┘                                    │
//! │                                                                         │
//! │  Planning and Validating only read. Committing cannot fail, because    │
//! │  validation already proved every cassette holds enough notes.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Mutators take `&mut self`. Hosts sharing a machine across threads wrap it
//! in a single mutex and hold it for the whole call.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::cassette::Cassette;
use crate::denomination::Denomination;
use crate::error::{ConfigError, MachineError, MachineResult};
use crate::plan::{plan_greedy, validate_plan, DispensePlan, PlanSelector};
use crate::validation::{validate_amount, validate_count};

/// Binary search over cassettes sorted ascending by denomination.
pub(crate) fn find_cassette(cassettes: &[Cassette], denomination: Denomination) -> Option<&Cassette> {
    cassettes
        .binary_search_by_key(&denomination, Cassette::denomination)
        .ok()
        .map(|i| &cassettes[i])
}

/// Banknote inventory of a cash-dispensing machine.
///
/// The set of denominations is fixed at construction: cassettes live in a
/// sorted boxed slice and nothing adds or removes entries afterwards.
#[derive(Debug, Clone)]
pub struct CashMachine {
    cassettes: Box<[Cassette]>,
}

impl CashMachine {
    /// Builds a machine with one empty cassette per `(denomination, capacity)`.
    ///
    /// ## Errors
    /// - `ConfigError::NoDenominations` for an empty configuration
    /// - `ConfigError::DuplicateDenomination` if a denomination repeats
    /// - `ConfigError::ZeroCapacity` for a zero capacity
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::{CashMachine, Denomination};
    ///
    /// let d = |v| Denomination::new(v).unwrap();
    /// let machine = CashMachine::new([(d(100), 5), (d(10), 5), (d(50), 5)]).unwrap();
    ///
    /// assert_eq!(machine.available_denominations(), vec![d(10), d(50), d(100)]);
    /// assert_eq!(machine.balance(), 0);
    /// ```
    pub fn new(
        capacities: impl IntoIterator<Item = (Denomination, u32)>,
    ) -> Result<Self, ConfigError> {
        let mut cassettes = capacities
            .into_iter()
            .map(|(denomination, capacity)| Cassette::new(denomination, capacity))
            .collect::<Result<Vec<_>, _>>()?;

        if cassettes.is_empty() {
            return Err(ConfigError::NoDenominations);
        }

        cassettes.sort_by_key(Cassette::denomination);
        if let Some(pair) = cassettes
            .windows(2)
            .find(|pair| pair[0].denomination() == pair[1].denomination())
        {
            return Err(ConfigError::DuplicateDenomination(pair[0].denomination()));
        }

        debug!(cassettes = cassettes.len(), "Cash machine configured");

        Ok(CashMachine {
            cassettes: cassettes.into_boxed_slice(),
        })
    }

    // =========================================================================
    // Single-denomination operations
    // =========================================================================

    /// Loads `count` notes into the cassette for `denomination`.
    ///
    /// All-or-nothing: a deposit that does not fit is rejected entirely.
    pub fn deposit(&mut self, denomination: Denomination, count: u32) -> MachineResult<()> {
        validate_count(count)?;
        self.cassette_mut(denomination)?.add(count)
    }

    /// Takes `count` notes out of the cassette for `denomination`.
    pub fn withdraw(&mut self, denomination: Denomination, count: u32) -> MachineResult<()> {
        validate_count(count)?;
        self.cassette_mut(denomination)?.remove(count)
    }

    // =========================================================================
    // Amount withdrawal
    // =========================================================================

    /// Dispenses exactly `amount` using the greedy default.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::{CashMachine, Denomination};
    ///
    /// let d = |v| Denomination::new(v).unwrap();
    /// let mut machine = CashMachine::new([(d(10), 5), (d(50), 5), (d(100), 5)]).unwrap();
    /// for note in [10, 50, 100] {
    ///     machine.deposit(d(note), 5).unwrap();
    /// }
    ///
    /// let plan = machine.withdraw_amount(160).unwrap();
    /// assert_eq!(plan.to_string(), "100 x 1, 50 x 1, 10 x 1");
    /// assert_eq!(machine.balance(), 640);
    /// ```
    pub fn withdraw_amount(&mut self, amount: u64) -> MachineResult<DispensePlan> {
        self.withdraw_amount_using(amount, None)
    }

    /// Dispenses exactly `amount` following a caller-supplied selector.
    pub fn withdraw_amount_with<S>(&mut self, amount: u64, selector: &S) -> MachineResult<DispensePlan>
    where
        S: PlanSelector,
    {
        self.withdraw_amount_using(amount, Some(selector as &dyn PlanSelector))
    }

    /// Plans, validates and commits an amount withdrawal.
    ///
    /// Without a selector the greedy plan is used. With one, its proposal is
    /// validated against live stock. Either way the machine is untouched
    /// unless the whole plan can be paid out.
    pub fn withdraw_amount_using(
        &mut self,
        amount: u64,
        selector: Option<&dyn PlanSelector>,
    ) -> MachineResult<DispensePlan> {
        validate_amount(amount)?;

        let plan = match selector {
            None => plan_greedy(amount, &self.cassettes)?,
            Some(selector) => {
                let proposal = selector.propose(&self.denominations_descending());
                trace!(amount, proposal = %proposal, "Selector proposed plan");
                proposal
            }
        };

        validate_plan(&plan, amount, &self.cassettes).map_err(MachineError::InvalidDispensePlan)?;

        for (denomination, count) in plan.iter() {
            self.cassette_mut(denomination)?.remove(count)?;
        }

        debug!(amount, plan = %plan, "Amount dispensed");
        Ok(plan)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Total face value of all stored notes.
    pub fn balance(&self) -> u64 {
        self.cassettes.iter().map(Cassette::value).sum()
    }

    /// Snapshot of note counts per denomination.
    pub fn state(&self) -> BTreeMap<Denomination, u32> {
        self.cassettes
            .iter()
            .map(|c| (c.denomination(), c.count()))
            .collect()
    }

    /// Supported denominations, ascending.
    pub fn available_denominations(&self) -> Vec<Denomination> {
        self.cassettes.iter().map(Cassette::denomination).collect()
    }

    pub fn count_of(&self, denomination: Denomination) -> Option<u32> {
        find_cassette(&self.cassettes, denomination).map(Cassette::count)
    }

    pub fn capacity_of(&self, denomination: Denomination) -> Option<u32> {
        find_cassette(&self.cassettes, denomination).map(Cassette::capacity)
    }

    /// Read-only view of the cassettes, ascending by denomination.
    pub fn cassettes(&self) -> impl Iterator<Item = &Cassette> {
        self.cassettes.iter()
    }

    fn denominations_descending(&self) -> Vec<Denomination> {
        self.cassettes
            .iter()
            .rev()
            .map(Cassette::denomination)
            .collect()
    }

    fn cassette_mut(&mut self, denomination: Denomination) -> MachineResult<&mut Cassette> {
        let index = self
            .cassettes
            .binary_search_by_key(&denomination, Cassette::denomination)
            .map_err(|_| MachineError::UnsupportedDenomination { denomination })?;
        Ok(&mut self.cassettes[index])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
