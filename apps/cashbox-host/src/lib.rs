//! # Cashbox Host Library
//!
//! Thin layer between a presentation layer and `cashbox-core`.
//!
//! ## Module Organization
//! ```text
//! cashbox_host/
//! ├── lib.rs          ◄─── You are here (bootstrap & logging)
//! ├── config.rs       ◄─── Machine configuration (defaults + env)
//! ├── state.rs        ◄─── Mutex-guarded shared machine
//! ├── commands.rs     ◄─── Operations the UI calls
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `MachineConfig` from the environment
//! 3. Build the machine and load the initial notes
//! 4. Hand the `MachineState` to the UI

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cashbox_core::CashMachine;

use config::MachineConfig;
use error::BootstrapError;
use state::MachineState;

/// Builds the machine described by `config` and loads its initial notes.
///
/// ## Errors
/// - `BootstrapError::Config` for an invalid denomination list or capacity
/// - `BootstrapError::Seed` if `initial_count` exceeds the capacity
pub fn bootstrap(config: &MachineConfig) -> Result<MachineState, BootstrapError> {
    let mut machine = CashMachine::new(config.capacities()?)?;

    if config.initial_count > 0 {
        for denomination in machine.available_denominations() {
            machine.deposit(denomination, config.initial_count)?;
        }
    }

    info!(
        denominations = ?config.denominations,
        capacity = config.cassette_capacity,
        balance = machine.balance(),
        "Cash machine ready"
    );

    Ok(MachineState::new(machine))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cashbox_core=trace` - Include selector proposals
/// - Default: INFO, DEBUG for cashbox crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cashbox_core=debug,cashbox_host=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
