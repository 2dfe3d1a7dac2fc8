#![no_main]

use arbitrary::Arbitrary;
use farm::{FarmContract, FarmContractClient, FarmError};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

const POOLS: u8 = 2;
const USERS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { pool: u8, user: u8, amount: u32 },
    Withdraw { pool: u8, user: u8, amount: u32 },
    EmergencyWithdraw { pool: u8, user: u8 },
    SetWeight { pool: u8, weight: u16 },
    Terminate { lead: u8 },
    Advance { heights: u8 },
    Sync { pool: u8 },
}

// Drives random sessions against two SAC-backed pools. Beyond panics, it
// checks that the index never moves backwards, that a frozen pool stays
// frozen, and that pending rewards never fault while stake has only grown.
fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let contract_id = env.register(FarmContract, ());
    let client = FarmContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &1_000u128);

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for weight in 1..=u64::from(POOLS) {
        let asset = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let minter = StellarAssetClient::new(&env, &asset);
        for user in &users {
            minter.mint(user, &i128::from(u64::MAX));
        }
        client.add_pool(&admin, &weight, &asset);
    }

    let mut last_acc = [0u128; POOLS as usize];
    // A partial withdraw can floor a position's pending to -1, which faults.
    let mut partially_withdrawn = false;
    for action in actions {
        match action {
            FuzzAction::Deposit { pool, user, amount } => {
                let user = &users[usize::from(user) % USERS];
                let _ = client.try_deposit(user, &u32::from(pool % POOLS), &u128::from(amount), user);
                if !partially_withdrawn {
                    assert!(client.try_user_aggregate_pending(user).is_ok());
                }
            }
            FuzzAction::Withdraw { pool, user, amount } => {
                let user = &users[usize::from(user) % USERS];
                let result = client.try_withdraw(user, &u32::from(pool % POOLS), &u128::from(amount), user);
                match result {
                    Err(Ok(e)) => assert_eq!(e, FarmError::InsufficientStake),
                    Ok(Ok(())) if amount > 0 => partially_withdrawn = true,
                    _ => {}
                }
            }
            FuzzAction::EmergencyWithdraw { pool, user } => {
                let user = &users[usize::from(user) % USERS];
                assert!(client.try_emergency_withdraw(user, &u32::from(pool % POOLS), user).is_ok());
            }
            FuzzAction::SetWeight { pool, weight } => {
                client.set_alloc_weight(&admin, &u32::from(pool % POOLS), &u64::from(weight));
            }
            FuzzAction::Terminate { lead } => {
                let height = env.ledger().sequence() + u32::from(lead);
                let _ = client.try_terminate(&admin, &height);
            }
            FuzzAction::Advance { heights } => {
                let next = env.ledger().sequence() + u32::from(heights);
                env.ledger().set_sequence_number(next);
                if !partially_withdrawn {
                    for user in &users {
                        assert!(client.try_user_aggregate_pending(user).is_ok());
                    }
                }
            }
            FuzzAction::Sync { pool } => {
                let pid = pool % POOLS;
                let snapshot = client.sync_pool(&u32::from(pid));
                let idx = usize::from(pid);
                assert!(snapshot.acc_reward_per_share >= last_acc[idx]);
                last_acc[idx] = snapshot.acc_reward_per_share;

                if client.is_closed() {
                    assert_eq!(snapshot.last_reward_height, client.get_termination_height());
                    assert_eq!(client.sync_pool(&u32::from(pid)), snapshot);
                }
            }
        }
    }
});
