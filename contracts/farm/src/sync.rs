//! Lazy synchronisation of a pool's reward index.
//!
//! There is no background accrual: every operation that touches a pool calls
//! [`sync_pool`] first, which brings the stored index up to the effective
//! height of that exact call.

use soroban_sdk::{log, Env, Vec};

use crate::{custody, events, rewards, storage, termination, FarmError, Pool};

/// Projects `pool` to the current effective height without writing anything.
///
/// Returns `None` when the pool is already there, otherwise the advanced pool
/// together with the staked supply the projection was computed against.
pub fn project(env: &Env, pool: &Pool) -> Result<Option<(Pool, u128)>, FarmError> {
    let effective = termination::effective_height(env);
    if effective <= pool.last_reward_height {
        return Ok(None);
    }

    let supply = custody::staked_supply(env, &pool.asset)?;
    let config = storage::get_config(env)?;
    let advanced = rewards::advance_pool(
        pool,
        effective,
        supply,
        config.reward_rate_per_block,
        storage::get_total_alloc_weight(env),
    )?;
    Ok(Some((advanced, supply)))
}

/// Brings pool `pid` up to date and returns the resulting snapshot.
///
/// Repeated calls at the same effective height are no-ops, which is what
/// freezes every pool once the termination height has been reached.
pub fn sync_pool(env: &Env, pid: u32) -> Result<Pool, FarmError> {
    let pool = storage::get_pool(env, pid)?;
    let Some((updated, supply)) = project(env, &pool)? else {
        return Ok(pool);
    };

    storage::set_pool(env, pid, &updated);
    log!(
        env,
        "pool {} synced to height {} over supply {}",
        pid,
        updated.last_reward_height,
        supply
    );
    events::publish_pool_updated(env, pid, &updated, supply);
    Ok(updated)
}

/// [`sync_pool`] over `pids` in order. Pools are independent, so the order
/// only determines the order of the returned snapshots.
pub fn sync_pools(env: &Env, pids: &Vec<u32>) -> Result<Vec<Pool>, FarmError> {
    let mut snapshots = Vec::new(env);
    for pid in pids.iter() {
        snapshots.push_back(sync_pool(env, pid)?);
    }
    Ok(snapshots)
}
