//! Typed accessors over contract storage.
//!
//! Globals live in instance storage under short symbol keys. Pools and
//! positions live in persistent storage under tuple keys
//! `(prefix, pid)` / `(prefix, pid, user)`, so the pool list is an arena
//! indexed by `pid` and positions form a sparse map.

use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{FarmConfig, FarmError, Pool, UserPosition};

// ── Instance keys ────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGT");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const START_HEIGHT: Symbol = symbol_short!("START_HT");
const TERMINATION: Symbol = symbol_short!("TERM_HT");

// ── Persistent key prefixes ──────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_ASSET: Symbol = symbol_short!("POOL_AST");
const POSITION: Symbol = symbol_short!("POS");

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), FarmError> {
    if !is_initialized(env) {
        return Err(FarmError::NotInitialized);
    }
    Ok(())
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn get_config(env: &Env) -> Result<FarmConfig, FarmError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(FarmError::NotInitialized)
}

pub fn set_config(env: &Env, config: &FarmConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn get_pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn set_pending_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, admin);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

// ── Globals ──────────────────────────────────────────────────────────────────

pub fn get_total_alloc_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn set_total_alloc_weight(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_WEIGHT, &total);
}

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&POOL_COUNT, &count);
}

/// Height of the first deposit ever made, `0` before that.
pub fn get_start_height(env: &Env) -> u32 {
    env.storage().instance().get(&START_HEIGHT).unwrap_or(0)
}

pub fn set_start_height(env: &Env, height: u32) {
    env.storage().instance().set(&START_HEIGHT, &height);
}

/// Scheduled close height, `0` while the farm is open-ended.
pub fn get_termination_height(env: &Env) -> u32 {
    env.storage().instance().get(&TERMINATION).unwrap_or(0)
}

pub fn set_termination_height(env: &Env, height: u32) {
    env.storage().instance().set(&TERMINATION, &height);
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn get_pool(env: &Env, pid: u32) -> Result<Pool, FarmError> {
    let key = (POOL, pid);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(FarmError::PoolNotFound)?;
    ttl::extend_persistent(env, &key);
    Ok(pool)
}

pub fn set_pool(env: &Env, pid: u32, pool: &Pool) {
    let key = (POOL, pid);
    env.storage().persistent().set(&key, pool);
    ttl::extend_persistent(env, &key);
}

/// Appends `pool` to the arena and returns its permanent id.
pub fn push_pool(env: &Env, pool: &Pool) -> Result<u32, FarmError> {
    let pid = get_pool_count(env);
    let next = pid.checked_add(1).ok_or(FarmError::ArithmeticFault)?;

    set_pool(env, pid, pool);

    let asset_key = (POOL_ASSET, pool.asset.clone());
    env.storage().persistent().set(&asset_key, &pid);
    ttl::extend_persistent(env, &asset_key);

    set_pool_count(env, next);
    Ok(pid)
}

pub fn pool_for_asset(env: &Env, asset: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&(POOL_ASSET, asset.clone()))
}

// ── Positions ────────────────────────────────────────────────────────────────

/// A position that was never written reads back as all zeroes.
pub fn get_position(env: &Env, pid: u32, user: &Address) -> UserPosition {
    let key = (POSITION, pid, user.clone());
    match env.storage().persistent().get(&key) {
        Some(position) => {
            ttl::extend_persistent(env, &key);
            position
        }
        None => UserPosition::default(),
    }
}

pub fn set_position(env: &Env, pid: u32, user: &Address, position: &UserPosition) {
    let key = (POSITION, pid, user.clone());
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}
