//! Reward-index arithmetic.
//!
//! Everything here is pure: no storage, no host calls. The synchronizer and
//! the read-only pending calculator both go through [`advance_pool`], so a
//! projection can never drift from what a later sync would store.
//!
//! ```text
//! reward        = elapsed × rate × alloc_weight / total_alloc_weight
//! acc_per_share = acc_per_share + reward × PRECISION / staked_supply
//! pending       = staked × acc_per_share / PRECISION − reward_debt
//! ```
//!
//! All divisions floor, and every product is formed before the division.

use crate::{FarmError, Pool, UserPosition};

/// Fixed-point scale of `acc_reward_per_share` (10^12).
pub const PRECISION: u128 = 1_000_000_000_000;

/// Height up to which rewards may accrue: the current height, clamped to the
/// termination height once that has been reached.
pub fn effective_height(current: u32, termination: u32) -> u32 {
    if termination > 0 && termination <= current {
        termination
    } else {
        current
    }
}

/// Share of the global emission earned by one pool over `elapsed` heights.
///
/// A zero `total_alloc_weight` means every pool (this one included) has zero
/// weight, so nothing is emitted.
pub fn pool_reward(
    elapsed: u32,
    rate_per_block: u128,
    alloc_weight: u64,
    total_alloc_weight: u64,
) -> Result<u128, FarmError> {
    if total_alloc_weight == 0 {
        return Ok(0);
    }
    u128::from(elapsed)
        .checked_mul(rate_per_block)
        .and_then(|r| r.checked_mul(u128::from(alloc_weight)))
        .map(|r| r / u128::from(total_alloc_weight))
        .ok_or(FarmError::ArithmeticFault)
}

/// Growth of the per-share index when `reward` is spread over `staked_supply`.
pub fn index_delta(reward: u128, staked_supply: u128) -> Result<u128, FarmError> {
    if staked_supply == 0 {
        return Ok(0);
    }
    reward
        .checked_mul(PRECISION)
        .map(|r| r / staked_supply)
        .ok_or(FarmError::ArithmeticFault)
}

/// Returns `pool` advanced to `effective`.
///
/// `last_reward_height` moves even when `staked_supply` is zero: the gap is
/// forfeited rather than credited to whoever stakes next. A pool already at
/// or past `effective` comes back unchanged.
pub fn advance_pool(
    pool: &Pool,
    effective: u32,
    staked_supply: u128,
    rate_per_block: u128,
    total_alloc_weight: u64,
) -> Result<Pool, FarmError> {
    let mut next = pool.clone();
    if effective <= pool.last_reward_height {
        return Ok(next);
    }

    if staked_supply > 0 {
        let elapsed = effective - pool.last_reward_height;
        let reward = pool_reward(
            elapsed,
            rate_per_block,
            pool.alloc_weight,
            total_alloc_weight,
        )?;
        next.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(index_delta(reward, staked_supply)?)
            .ok_or(FarmError::ArithmeticFault)?;
    }
    next.last_reward_height = effective;
    Ok(next)
}

/// `floor(amount × acc_reward_per_share / PRECISION)`: the reward an
/// `amount` of stake has accumulated under the given index.
pub fn accrued(amount: u128, acc_reward_per_share: u128) -> Result<u128, FarmError> {
    amount
        .checked_mul(acc_reward_per_share)
        .map(|r| r / PRECISION)
        .ok_or(FarmError::ArithmeticFault)
}

/// [`accrued`] as a signed reward-debt adjustment.
pub fn debt_for(amount: u128, acc_reward_per_share: u128) -> Result<i128, FarmError> {
    to_signed(accrued(amount, acc_reward_per_share)?)
}

/// Pending reward of `position` under `acc_reward_per_share`.
///
/// This is the single narrowing point from the signed debt domain back to an
/// unsigned amount; a negative result is an accounting fault, never clamped.
pub fn pending(position: &UserPosition, acc_reward_per_share: u128) -> Result<u128, FarmError> {
    let gross = to_signed(accrued(position.staked_amount, acc_reward_per_share)?)?;
    let net = gross
        .checked_sub(position.reward_debt)
        .ok_or(FarmError::ArithmeticFault)?;
    u128::try_from(net).map_err(|_| FarmError::ArithmeticFault)
}

pub fn to_signed(value: u128) -> Result<i128, FarmError> {
    i128::try_from(value).map_err(|_| FarmError::ArithmeticFault)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no Soroban environment.
