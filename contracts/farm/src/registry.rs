//! Pool registry: the append-only pool arena and its allocation weights.
//!
//! `total_alloc_weight` always equals the sum of every pool's weight; both
//! are written in the same invocation, so a failure leaves neither changed.

use soroban_sdk::{Address, Env};

use crate::{events, storage, termination, FarmError, Pool};

/// Registers `asset` as a new pool and returns its id.
pub fn add_pool(env: &Env, alloc_weight: u64, asset: Address) -> Result<u32, FarmError> {
    termination::ensure_open(env)?;
    if storage::pool_for_asset(env, &asset).is_some() {
        return Err(FarmError::DuplicatePool);
    }

    let total = storage::get_total_alloc_weight(env)
        .checked_add(alloc_weight)
        .ok_or(FarmError::ArithmeticFault)?;

    let pool = Pool {
        asset: asset.clone(),
        alloc_weight,
        last_reward_height: termination::current_height(env),
        acc_reward_per_share: 0,
    };
    let pid = storage::push_pool(env, &pool)?;
    storage::set_total_alloc_weight(env, total);

    events::publish_pool_added(env, pid, asset, alloc_weight);
    Ok(pid)
}

/// Replaces the weight of pool `pid`.
///
/// Not gated on termination: reweighting stays available after the close.
/// Pools are not synced here, so callers that want the old weights to apply
/// up to now should `sync_pools` first.
pub fn set_alloc_weight(env: &Env, pid: u32, alloc_weight: u64) -> Result<(), FarmError> {
    let mut pool = storage::get_pool(env, pid)?;

    let total = storage::get_total_alloc_weight(env)
        .checked_sub(pool.alloc_weight)
        .and_then(|t| t.checked_add(alloc_weight))
        .ok_or(FarmError::ArithmeticFault)?;

    pool.alloc_weight = alloc_weight;
    storage::set_pool(env, pid, &pool);
    storage::set_total_alloc_weight(env, total);

    events::publish_pool_set(env, pid, alloc_weight);
    Ok(())
}
