//! # Dispense Plans
//!
//! A dispense plan says how many notes of each denomination pay out an amount.
//!
//! ## Where Plans Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    withdraw_amount(amount, selector?)                   │
//! │                                                                         │
//! │   selector = None                      selector = Some(s)              │
//! │        │                                    │                           │
//! │        ▼                                    ▼                           │
//! │   plan_greedy()                        s.propose(denominations desc)   │
//! │   largest note first,                  opaque proposal from the UI     │
//! │   bounded by live stock                         │                       │
//! │        │                                    ▼                           │
//! │        │                               validate_plan()                 │
//! │        │                               non-empty, supported, in stock, │
//! │        │                               sums to exactly `amount`        │
//! │        └──────────────┬─────────────────────┘                          │
//! │                       ▼                                                 │
//! │                 commit (machine.rs)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Planning and validation only read cassettes. Nothing is mutated until a
//! plan has passed every check.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use ts_rs::TS;

use crate::cassette::Cassette;
use crate::denomination::Denomination;
use crate::error::{MachineError, MachineResult, PlanViolation};
use crate::machine::find_cassette;

// =============================================================================
// Dispense Plan
// =============================================================================

/// Mapping from denomination to the number of notes to pay out.
///
/// Plans produced by the machine never contain zero counts. Plans built by a
/// caller may, and are rejected during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct DispensePlan(BTreeMap<Denomination, u32>);

impl DispensePlan {
    pub fn new() -> Self {
        DispensePlan(BTreeMap::new())
    }

    /// Builder-style insert.
    ///
    /// ## Example
    /// ```rust
    /// use cashbox_core::{Denomination, DispensePlan};
    ///
    /// let ten = Denomination::new(10).unwrap();
    /// let fifty = Denomination::new(50).unwrap();
    /// let plan = DispensePlan::new().with(fifty, 1).with(ten, 3);
    /// assert_eq!(plan.total_value(), Some(80));
    /// assert_eq!(plan.to_string(), "50 x 1, 10 x 3");
    /// ```
    pub fn with(mut self, denomination: Denomination, count: u32) -> Self {
        self.insert(denomination, count);
        self
    }

    /// Sets the note count for a denomination, replacing any previous entry.
    pub fn insert(&mut self, denomination: Denomination, count: u32) {
        self.0.insert(denomination, count);
    }

    /// Notes planned for `denomination`, if it is part of the plan.
    pub fn get(&self, denomination: Denomination) -> Option<u32> {
        self.0.get(&denomination).copied()
    }

    /// Entries in ascending denomination order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Denomination, u32)> + '_ {
        self.0.iter().map(|(d, c)| (*d, *c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Σ denomination × count, or `None` on overflow.
    pub fn total_value(&self) -> Option<u64> {
        self.iter()
            .try_fold(0u64, |total, (d, count)| total.checked_add(d.times(count)))
    }

    /// Total number of notes in the plan.
    pub fn note_count(&self) -> u64 {
        self.0.values().map(|c| *c as u64).sum()
    }
}

impl FromIterator<(Denomination, u32)> for DispensePlan {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        DispensePlan(iter.into_iter().collect())
    }
}

/// Largest note first, e.g. `100 x 1, 50 x 1, 10 x 1`.
impl fmt::Display for DispensePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "nothing");
        }

        for (i, (denomination, count)) in self.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} x {}", denomination, count)?;
        }
        Ok(())
    }
}

// =============================================================================
// Plan Selector
// =============================================================================

/// Caller-supplied strategy proposing how to split an amount.
///
/// Receives the machine's denominations in descending order. Implementations
/// must be pure: everything they need (amount, stock snapshot, preferences)
/// is captured up front, never read from the live machine.
///
/// Any `Fn(&[Denomination]) -> DispensePlan` closure is a selector:
///
/// ```rust
/// use cashbox_core::{CashMachine, Denomination, DispensePlan};
///
/// let ten = Denomination::new(10).unwrap();
/// let mut machine = CashMachine::new([(ten, 5)]).unwrap();
/// machine.deposit(ten, 5).unwrap();
///
/// let only_tens = |_: &[Denomination]| DispensePlan::new().with(ten, 3);
/// machine.withdraw_amount_with(30, &only_tens).unwrap();
/// assert_eq!(machine.count_of(ten), Some(2));
/// ```
pub trait PlanSelector {
    fn propose(&self, denominations: &[Denomination]) -> DispensePlan;
}

impl<F> PlanSelector for F
where
    F: Fn(&[Denomination]) -> DispensePlan,
{
    fn propose(&self, denominations: &[Denomination]) -> DispensePlan {
        self(denominations)
    }
}

/// Greedy split restricted to the denominations a customer ticked.
///
/// Works from a stock snapshot taken when the selector is built. When the
/// allowed notes cannot reach the amount, the partial proposal is returned
/// as-is and the machine rejects it during validation.
#[derive(Debug, Clone)]
pub struct PreferredDenominations {
    amount: u64,
    allowed: BTreeSet<Denomination>,
    stock: BTreeMap<Denomination, u32>,
}

impl PreferredDenominations {
    pub fn new(
        amount: u64,
        allowed: impl IntoIterator<Item = Denomination>,
        stock: BTreeMap<Denomination, u32>,
    ) -> Self {
        PreferredDenominations {
            amount,
            allowed: allowed.into_iter().collect(),
            stock,
        }
    }
}

impl PlanSelector for PreferredDenominations {
    fn propose(&self, denominations: &[Denomination]) -> DispensePlan {
        let available = denominations
            .iter()
            .filter(|d| self.allowed.contains(*d))
            .map(|d| (*d, self.stock.get(d).copied().unwrap_or(0)));

        greedy_fill(self.amount, available).0
    }
}

// =============================================================================
// Planning & Validation
// =============================================================================

/// Applies the greedy rule over `(denomination, available)` pairs in the
/// order given. Returns the plan and the amount left uncovered.
fn greedy_fill(
    amount: u64,
    available: impl Iterator<Item = (Denomination, u32)>,
) -> (DispensePlan, u64) {
    let mut plan = DispensePlan::new();
    let mut remaining = amount;

    for (denomination, stored) in available {
        let needed = remaining / denomination.value() as u64;
        // min() with a u32 keeps the result in u32 range
        let to_use = needed.min(stored as u64) as u32;
        if to_use > 0 {
            plan.insert(denomination, to_use);
            remaining -= denomination.times(to_use);
        }
    }

    (plan, remaining)
}

/// Builds the default plan: largest denomination first, bounded by stock.
///
/// `cassettes` must be sorted ascending by denomination. Not optimal: with
/// notes {50, 20} stocked and 60 requested, greedy takes the 50 and gives up.
pub(crate) fn plan_greedy(amount: u64, cassettes: &[Cassette]) -> MachineResult<DispensePlan> {
    let available = cassettes
        .iter()
        .rev()
        .map(|c| (c.denomination(), c.count()));

    let (plan, remaining) = greedy_fill(amount, available);
    if remaining != 0 {
        return Err(MachineError::AmountNotDispensable { amount, remaining });
    }

    Ok(plan)
}

/// Checks a plan against the live cassettes.
///
/// Order of checks: non-empty, every denomination supported, every count
/// positive and in stock, weighted sum equal to `amount`.
pub(crate) fn validate_plan(
    plan: &DispensePlan,
    amount: u64,
    cassettes: &[Cassette],
) -> Result<(), PlanViolation> {
    if plan.is_empty() {
        return Err(PlanViolation::Empty);
    }

    for (denomination, count) in plan.iter() {
        let cassette = find_cassette(cassettes, denomination)
            .ok_or(PlanViolation::UnsupportedDenomination(denomination))?;

        if count == 0 {
            return Err(PlanViolation::ZeroCount(denomination));
        }

        if count > cassette.count() {
            return Err(PlanViolation::ExceedsStock {
                denomination,
                available: cassette.count(),
                requested: count,
            });
        }
    }

    let actual = plan.total_value();
    if actual != Some(amount) {
        return Err(PlanViolation::SumMismatch {
            expected: amount,
            actual,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
