//! Concurrent access to a shared machine through the host commands.

use cashbox_host::bootstrap;
use cashbox_host::commands::{deposit, get_machine, withdraw_amount, WithdrawAmountRequest};
use cashbox_host::config::MachineConfig;
use cashbox_host::error::ErrorCode;
use cashbox_host::state::MachineState;

fn small_machine(initial_count: u32) -> MachineState {
    bootstrap(&MachineConfig {
        denominations: vec![10, 50, 100],
        cassette_capacity: 200,
        initial_count,
        ..MachineConfig::default()
    })
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_withdrawals_never_overdraw() {
    let state = small_machine(20);
    let initial = get_machine(&state).balance;
    assert_eq!(initial, 3200);

    let mut handles = Vec::new();
    for _ in 0..40 {
        let state = state.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            withdraw_amount(
                &state,
                &WithdrawAmountRequest {
                    amount: 160,
                    preferred: vec![],
                },
            )
        }));
    }

    let mut dispensed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(receipt) => dispensed += receipt.amount,
            Err(err) => {
                assert_eq!(err.code, ErrorCode::AmountNotDispensable);
                rejected += 1;
            }
        }
    }

    // 3200 / 160 = 20 withdrawals fit exactly
    assert_eq!(dispensed, 3200);
    assert_eq!(rejected, 20);

    let view = get_machine(&state);
    assert_eq!(view.balance, initial - dispensed);
    assert!(view.cassettes.iter().all(|c| c.count == 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deposits_and_withdrawals_balance() {
    let state = small_machine(50);
    let initial = get_machine(&state).balance;

    let mut handles = Vec::new();
    for i in 0..30 {
        let state = state.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            if i % 2 == 0 {
                deposit(&state, 10, 1).map(|_| 10i64)
            } else {
                withdraw_amount(
                    &state,
                    &WithdrawAmountRequest {
                        amount: 60,
                        preferred: vec![],
                    },
                )
                .map(|receipt| -(receipt.amount as i64))
            }
        }));
    }

    let mut delta = 0i64;
    for handle in handles {
        delta += handle.await.unwrap().unwrap();
    }

    // 15 deposits of 10, 15 withdrawals of 60
    assert_eq!(delta, 15 * 10 - 15 * 60);
    assert_eq!(get_machine(&state).balance as i64, initial as i64 + delta);
}

#[tokio::test]
async fn test_preferred_notes_use_locked_snapshot() {
    let state = small_machine(2);

    let receipt = withdraw_amount(
        &state,
        &WithdrawAmountRequest {
            amount: 20,
            preferred: vec![10],
        },
    )
    .unwrap();
    assert_eq!(receipt.summary, "10 x 2");

    // The 10s are gone now; a fresh snapshot must see that
    let err = withdraw_amount(
        &state,
        &WithdrawAmountRequest {
            amount: 10,
            preferred: vec![10],
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidDispensePlan);
    assert_eq!(get_machine(&state).balance, 300);
}
