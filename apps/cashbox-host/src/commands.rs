//! # Machine Commands
//!
//! Operations the presentation layer calls. Each command runs inside a single
//! `MachineState` lock acquisition and returns data the UI can render
//! directly.
//!
//! ## Withdrawal Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer enters 160, ticks nothing                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  withdraw_amount({ amount: 160, preferred: [] })                        │
//! │       │                                                                 │
//! │       ├── preferred empty  → greedy plan                                │
//! │       └── preferred [10,50] → PreferredDenominations selector          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WithdrawalReceipt { notes: {100:1, 50:1, 10:1}, summary, balanceAfter }│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI shows "Dispensed: 100 x 1, 50 x 1, 10 x 1" and refreshes counts    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use cashbox_core::{
    CashMachine, Denomination, DispensePlan, MachineError, PreferredDenominations,
};

use crate::error::ApiError;
use crate::state::MachineState;

// =============================================================================
// Response Types
// =============================================================================

/// One cassette as the UI displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CassetteView {
    pub denomination: Denomination,
    pub count: u32,
    pub capacity: u32,
}

/// Everything the UI needs to redraw after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MachineView {
    /// Total face value of all stored notes
    pub balance: u64,

    /// Ascending by denomination
    pub cassettes: Vec<CassetteView>,
}

impl From<&CashMachine> for MachineView {
    fn from(machine: &CashMachine) -> Self {
        MachineView {
            balance: machine.balance(),
            cassettes: machine
                .cassettes()
                .map(|c| CassetteView {
                    denomination: c.denomination(),
                    count: c.count(),
                    capacity: c.capacity(),
                })
                .collect(),
        }
    }
}

/// Record of a successful amount withdrawal.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WithdrawalReceipt {
    /// Receipt identifier (UUID v4)
    pub id: String,

    pub amount: u64,

    /// Notes paid out per denomination
    pub notes: DispensePlan,

    /// Largest note first, e.g. "100 x 1, 50 x 1"
    pub summary: String,

    pub balance_after: u64,

    #[ts(type = "string")]
    pub dispensed_at: DateTime<Utc>,
}

// =============================================================================
// Request Types
// =============================================================================

/// Amount withdrawal request.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WithdrawAmountRequest {
    pub amount: u64,

    /// Denominations the customer ticked. Empty = let the machine choose.
    #[serde(default)]
    pub preferred: Vec<u32>,
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current machine view.
pub fn get_machine(state: &MachineState) -> MachineView {
    debug!("get_machine command");
    state.with_machine(|machine| MachineView::from(machine))
}

/// Loads notes into one cassette.
///
/// ## Arguments
/// * `denomination` - Face value of the notes
/// * `count` - Number of notes, must be positive
///
/// ## Returns
/// Updated machine view
pub fn deposit(state: &MachineState, denomination: u32, count: u32) -> Result<MachineView, ApiError> {
    debug!(denomination, count, "deposit command");

    state.with_machine_mut(|machine| -> Result<MachineView, ApiError> {
        machine
            .deposit(parse_denomination(denomination)?, count)
            .inspect_err(|e| warn!("Deposit rejected: {}", e))?;
        Ok(MachineView::from(&*machine))
    })
}

/// Takes notes out of one cassette.
pub fn withdraw(state: &MachineState, denomination: u32, count: u32) -> Result<MachineView, ApiError> {
    debug!(denomination, count, "withdraw command");

    state.with_machine_mut(|machine| -> Result<MachineView, ApiError> {
        machine
            .withdraw(parse_denomination(denomination)?, count)
            .inspect_err(|e| warn!("Withdrawal rejected: {}", e))?;
        Ok(MachineView::from(&*machine))
    })
}

/// Dispenses an amount, optionally restricted to the ticked denominations.
///
/// Planning, validation and commit all happen under one lock, so the stock
/// snapshot handed to the selector is the stock the plan is validated against.
///
/// ## Returns
/// A receipt describing the notes paid out
pub fn withdraw_amount(
    state: &MachineState,
    request: &WithdrawAmountRequest,
) -> Result<WithdrawalReceipt, ApiError> {
    debug!(
        amount = request.amount,
        preferred = ?request.preferred,
        "withdraw_amount command"
    );

    let preferred = request
        .preferred
        .iter()
        .map(|&value| parse_denomination(value))
        .collect::<Result<Vec<_>, _>>()?;

    state.with_machine_mut(|machine| -> Result<WithdrawalReceipt, ApiError> {
        // The selector never sees denominations the machine lacks
        if let Some(&denomination) = preferred
            .iter()
            .find(|&&d| machine.capacity_of(d).is_none())
        {
            warn!(%denomination, "Withdrawal rejected: unsupported preferred note");
            return Err(MachineError::UnsupportedDenomination { denomination }.into());
        }

        let result = if preferred.is_empty() {
            machine.withdraw_amount(request.amount)
        } else {
            let selector = PreferredDenominations::new(
                request.amount,
                preferred.iter().copied(),
                machine.state(),
            );
            machine.withdraw_amount_with(request.amount, &selector)
        };

        let notes = result.inspect_err(|e| warn!(amount = request.amount, "Withdrawal rejected: {}", e))?;

        let receipt = WithdrawalReceipt {
            id: Uuid::new_v4().to_string(),
            amount: request.amount,
            summary: notes.to_string(),
            notes,
            balance_after: machine.balance(),
            dispensed_at: Utc::now(),
        };
        info!(
            receipt = %receipt.id,
            amount = receipt.amount,
            notes = receipt.notes.note_count(),
            "Dispensed {}",
            receipt.summary
        );
        Ok(receipt)
    })
}

fn parse_denomination(value: u32) -> Result<Denomination, MachineError> {
    Denomination::new(value).map_err(MachineError::from)
}
