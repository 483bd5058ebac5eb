//! # Cashbox Host Entry Point
//!
//! Headless startup check: builds the machine from the environment and
//! prints the view a UI would render first.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (`CASHBOX_*` environment variables)
//! 3. Build and seed the machine
//! 4. Print the machine view as JSON

use std::process::ExitCode;

use tracing::error;

use cashbox_host::commands::get_machine;
use cashbox_host::config::MachineConfig;
use cashbox_host::{bootstrap, init_tracing};

fn main() -> ExitCode {
    init_tracing();

    let config = MachineConfig::from_env();
    let state = match bootstrap(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&get_machine(&state)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render machine view: {}", e);
            ExitCode::FAILURE
        }
    }
}
