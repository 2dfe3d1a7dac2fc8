//! User positions: deposit, withdraw and emergency withdraw.
//!
//! Each operation syncs the pool, commits every ledger effect, and only then
//! calls the asset's token contract.

use soroban_sdk::{Address, Env};

use crate::{custody, events, rewards, storage, sync, termination, FarmError, UserPosition};

/// Stakes `amount` from `caller` into pool `pid`, credited to `beneficiary`.
pub fn deposit(
    env: &Env,
    caller: &Address,
    pid: u32,
    amount: u128,
    beneficiary: &Address,
) -> Result<(), FarmError> {
    termination::ensure_open(env)?;
    if storage::get_start_height(env) == 0 {
        storage::set_start_height(env, termination::current_height(env));
    }

    let pool = sync::sync_pool(env, pid)?;

    let mut position = storage::get_position(env, pid, beneficiary);
    position.staked_amount = position
        .staked_amount
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticFault)?;
    position.reward_debt = position
        .reward_debt
        .checked_add(rewards::debt_for(amount, pool.acc_reward_per_share)?)
        .ok_or(FarmError::ArithmeticFault)?;
    storage::set_position(env, pid, beneficiary, &position);

    custody::pull(env, &pool.asset, caller, amount)?;

    events::publish_deposit(env, caller.clone(), pid, amount, beneficiary.clone());
    Ok(())
}

/// Unstakes `amount` of `caller`'s own position and sends it to `recipient`.
/// Stays available after the farm has closed.
pub fn withdraw(
    env: &Env,
    caller: &Address,
    pid: u32,
    amount: u128,
    recipient: &Address,
) -> Result<(), FarmError> {
    let pool = sync::sync_pool(env, pid)?;

    let mut position = storage::get_position(env, pid, caller);
    if amount > position.staked_amount {
        return Err(FarmError::InsufficientStake);
    }
    position.reward_debt = position
        .reward_debt
        .checked_sub(rewards::debt_for(amount, pool.acc_reward_per_share)?)
        .ok_or(FarmError::ArithmeticFault)?;
    position.staked_amount -= amount;
    storage::set_position(env, pid, caller, &position);

    custody::push(env, &pool.asset, recipient, amount)?;

    events::publish_withdraw(env, caller.clone(), pid, amount, recipient.clone());
    Ok(())
}

/// Returns `caller`'s whole stake in pool `pid` to `recipient`, forfeiting
/// any pending reward. Valid with an empty position.
pub fn emergency_withdraw(
    env: &Env,
    caller: &Address,
    pid: u32,
    recipient: &Address,
) -> Result<u128, FarmError> {
    let pool = storage::get_pool(env, pid)?;

    let amount = storage::get_position(env, pid, caller).staked_amount;
    storage::set_position(env, pid, caller, &UserPosition::default());

    custody::push(env, &pool.asset, recipient, amount)?;

    events::publish_emergency_withdraw(env, caller.clone(), pid, amount, recipient.clone());
    Ok(amount)
}
