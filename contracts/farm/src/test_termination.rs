extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, InvokeError,
};

use crate::{FarmContract, FarmContractClient, FarmError};

fn setup() -> (Env, FarmContractClient<'static>, Address, Address, u32) {
    let env = Env::default();
    env.mock_all_auths();

    let client = FarmContractClient::new(&env, &env.register(FarmContract, ()));
    let admin = Address::generate(&env);
    client.initialize(&admin, &100);

    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    env.ledger().set_sequence_number(10);
    let pid = client.add_pool(&admin, &1, &asset);

    (env, client, admin, asset, pid)
}

fn staker(env: &Env, client: &FarmContractClient, asset: &Address, pid: u32) -> Address {
    let user = Address::generate(env);
    StellarAssetClient::new(env, asset).mint(&user, &2_000_000);
    client.deposit(&user, &pid, &1_000_000, &user);
    user
}

fn at(env: &Env, height: u32) {
    env.ledger().set_sequence_number(height);
}

fn expect_farm_error<R>(result: Result<R, Result<FarmError, InvokeError>>, expected: FarmError) {
    match result {
        Err(Ok(e)) => assert_eq!(e, expected),
        _ => unreachable!("Expected {:?}", expected),
    }
}

// ── Scheduling ───────────────────────────────────────────────────────────────

#[test]
fn test_terminate_must_be_strictly_in_the_future() {
    let (env, client, admin, _, _) = setup();
    at(&env, 20);

    expect_farm_error(client.try_terminate(&admin, &20), FarmError::InvalidTermination);
    expect_farm_error(client.try_terminate(&admin, &5), FarmError::InvalidTermination);
    assert_eq!(client.get_termination_height(), 0);

    client.terminate(&admin, &21);
    assert_eq!(client.get_termination_height(), 21);
    assert!(!client.is_closed());
}

#[test]
fn test_pending_termination_can_be_moved() {
    let (env, client, admin, _, _) = setup();
    at(&env, 20);
    client.terminate(&admin, &40);
    client.terminate(&admin, &30);
    assert_eq!(client.get_termination_height(), 30);
}

#[test]
fn test_closed_farm_cannot_be_reopened() {
    let (env, client, admin, _, _) = setup();
    at(&env, 20);
    client.terminate(&admin, &30);

    at(&env, 30);
    assert!(client.is_closed());
    expect_farm_error(client.try_terminate(&admin, &100), FarmError::ClosedFarm);
    assert_eq!(client.get_termination_height(), 30);
}

// ── Freeze ───────────────────────────────────────────────────────────────────

#[test]
fn test_accrual_freezes_at_termination_height() {
    let (env, client, admin, asset, pid) = setup();
    let alice = staker(&env, &client, &asset, pid);

    at(&env, 15);
    client.terminate(&admin, &20);

    at(&env, 25);
    assert_eq!(client.pending_reward(&pid, &alice), 1_000);
    let frozen = client.sync_pool(&pid);
    assert_eq!(frozen.last_reward_height, 20);

    at(&env, 60);
    assert_eq!(client.sync_pool(&pid), frozen);
    assert_eq!(client.pending_reward(&pid, &alice), 1_000);
}

#[test]
fn test_freeze_holds_for_pools_never_synced_before_close() {
    let (env, client, admin, asset, pid) = setup();
    let alice = staker(&env, &client, &asset, pid);

    at(&env, 12);
    client.terminate(&admin, &16);

    // First sync after the close still stops at the termination height.
    at(&env, 80);
    let pool = client.sync_pool(&pid);
    assert_eq!(pool.last_reward_height, 16);
    assert_eq!(client.pending_reward(&pid, &alice), 600);
}

// ── Entry gating ─────────────────────────────────────────────────────────────

#[test]
fn test_entries_blocked_at_termination_height() {
    let (env, client, admin, asset, pid) = setup();
    let alice = staker(&env, &client, &asset, pid);

    at(&env, 15);
    client.terminate(&admin, &20);

    // One height before the close deposits still work.
    at(&env, 19);
    client.deposit(&alice, &pid, &1, &alice);

    at(&env, 20);
    expect_farm_error(
        client.try_deposit(&alice, &pid, &1, &alice),
        FarmError::ClosedFarm,
    );
    let late_asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    expect_farm_error(
        client.try_add_pool(&admin, &1, &late_asset),
        FarmError::ClosedFarm,
    );
    assert_eq!(client.pool_count(), 1);
}

#[test]
fn test_exits_remain_open_after_close() {
    let (env, client, admin, asset, pid) = setup();
    let alice = staker(&env, &client, &asset, pid);
    let bob = staker(&env, &client, &asset, pid);

    at(&env, 11);
    client.terminate(&admin, &14);

    at(&env, 50);
    client.withdraw(&alice, &pid, &400_000, &alice);
    assert_eq!(client.get_position(&pid, &alice).staked_amount, 600_000);
    assert_eq!(client.emergency_withdraw(&bob, &pid, &bob), 1_000_000);

    let token = TokenClient::new(&env, &asset);
    assert_eq!(token.balance(&alice), 1_400_000);
    assert_eq!(token.balance(&bob), 2_000_000);
}

#[test]
fn test_reweighting_allowed_after_close() {
    let (env, client, admin, _, pid) = setup();
    at(&env, 11);
    client.terminate(&admin, &12);

    at(&env, 30);
    client.set_alloc_weight(&admin, &pid, &7);
    assert_eq!(client.get_total_alloc_weight(), 7);
}
