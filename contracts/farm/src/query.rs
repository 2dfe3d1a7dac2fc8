//! Read-only reward queries. Nothing in here writes to storage.

use soroban_sdk::{Address, Env};

use crate::{rewards, storage, sync, termination, FarmError};

/// Reward `user` would have pending in pool `pid` if the pool were synced now.
pub fn pending_reward(env: &Env, pid: u32, user: &Address) -> Result<u128, FarmError> {
    let pool = storage::get_pool(env, pid)?;
    let acc = match sync::project(env, &pool)? {
        Some((projected, _)) => projected.acc_reward_per_share,
        None => pool.acc_reward_per_share,
    };
    rewards::pending(&storage::get_position(env, pid, user), acc)
}

/// [`pending_reward`] summed over every pool.
pub fn user_aggregate_pending(env: &Env, user: &Address) -> Result<u128, FarmError> {
    let mut total: u128 = 0;
    for pid in 0..storage::get_pool_count(env) {
        total = total
            .checked_add(pending_reward(env, pid, user)?)
            .ok_or(FarmError::ArithmeticFault)?;
    }
    Ok(total)
}

/// Coarse emission counter: `(current − start) × rate`, zero before the
/// first deposit.
///
/// Blind to allocation weights and to the termination clamp, so
/// it overstates what pools have accrued once there are several pools or the
/// farm has closed.
pub fn total_emitted(env: &Env) -> Result<u128, FarmError> {
    let start = storage::get_start_height(env);
    if start == 0 {
        return Ok(0);
    }
    let rate = storage::get_config(env)?.reward_rate_per_block;
    let elapsed = termination::current_height(env).saturating_sub(start);
    u128::from(elapsed)
        .checked_mul(rate)
        .ok_or(FarmError::ArithmeticFault)
}
