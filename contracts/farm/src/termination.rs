//! Farm termination: freezes accrual at a fixed height and closes the farm
//! to new pools and new deposits once that height is reached.

use soroban_sdk::{log, Env};

use crate::{rewards, storage, FarmError};

/// The host clock: the current ledger sequence number.
pub fn current_height(env: &Env) -> u32 {
    env.ledger().sequence()
}

/// Current height clamped to the termination height once it has passed.
pub fn effective_height(env: &Env) -> u32 {
    rewards::effective_height(current_height(env), storage::get_termination_height(env))
}

/// True once a termination height is set and the clock has reached it.
pub fn is_closed(env: &Env) -> bool {
    let termination = storage::get_termination_height(env);
    termination > 0 && current_height(env) >= termination
}

/// Guard for operations that create new entries (pools, stake).
pub fn ensure_open(env: &Env) -> Result<(), FarmError> {
    if is_closed(env) {
        return Err(FarmError::ClosedFarm);
    }
    Ok(())
}

/// Schedules the close at `height`.
///
/// A still-future termination may be moved; once the farm has closed the
/// stored height is final.
pub fn terminate(env: &Env, height: u32) -> Result<(), FarmError> {
    ensure_open(env)?;
    let current = current_height(env);
    if height <= current {
        return Err(FarmError::InvalidTermination);
    }
    storage::set_termination_height(env, height);
    log!(env, "farm terminates at height {} (scheduled at {})", height, current);
    Ok(())
}
