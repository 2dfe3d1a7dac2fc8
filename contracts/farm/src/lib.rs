#![no_std]

//! Multi-pool staking farm.
//!
//! Users stake an asset into a pool and accrue a share of a fixed per-height
//! emission, split across pools by allocation weight and within a pool by
//! stake. Accrual is tracked with a lazily updated reward-per-share index:
//! nothing runs per height, every operation first brings the pool it touches
//! up to date.

pub mod access;
pub mod custody;
pub mod events;
pub mod positions;
pub mod query;
pub mod registry;
pub mod rewards;
pub mod storage;
pub mod sync;
pub mod termination;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

pub use rewards::PRECISION;

// ── Contract errors ──────────────────────────────────────────────────────────

/// Codes follow the suite's ranges: 1–9 lifecycle, 10–19 auth, 20–29 not
/// found, 30–39 validation, 40–49 contract state, 100+ farm accounting.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FarmError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller does not pass the admin gate.
    Unauthorized = 10,
    PoolNotFound = 20,
    /// Termination height is not strictly after the current height.
    InvalidTermination = 30,
    /// The termination height has been reached: no new pools or stake.
    ClosedFarm = 40,
    /// The asset already backs a pool.
    DuplicatePool = 41,
    /// Withdraw amount exceeds the caller's recorded stake.
    InsufficientStake = 100,
    /// Checked arithmetic overflowed, a narrowing conversion failed, or a
    /// pending reward came out negative.
    ArithmeticFault = 101,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Settings fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    /// Primary admin; always passes the admin gate.
    pub admin: Address,
    /// Tokens emitted per ledger, across all pools.
    pub reward_rate_per_block: u128,
}

/// One staking pool. Its position in the pool list is its permanent id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub asset: Address,
    pub alloc_weight: u64,
    pub last_reward_height: u32,
    /// Lifetime reward per staked unit, scaled by [`PRECISION`].
    pub acc_reward_per_share: u128,
}

/// A user's stake in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserPosition {
    pub staked_amount: u128,
    /// Reward already accounted for at the times the stake was established.
    /// Signed: withdrawals subtract from it at a higher index than the one
    /// the stake was added at.
    pub reward_debt: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmContract;

#[contractimpl]
impl FarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm with its primary admin and emission rate.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_rate_per_block: u128,
    ) -> Result<(), FarmError> {
        if storage::is_initialized(&env) {
            return Err(FarmError::AlreadyInitialized);
        }

        storage::set_config(
            &env,
            &FarmConfig {
                admin: admin.clone(),
                reward_rate_per_block,
            },
        );
        storage::set_initialized(&env);
        common::ttl::extend_instance(&env);

        admin_tiers::set_super_admin(&env, &admin);
        admin_tiers::track_admin(&env, &admin);

        events::publish_initialized(&env, admin, reward_rate_per_block);
        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register `asset` as a new pool with `alloc_weight`. Admin only.
    pub fn add_pool(
        env: Env,
        caller: Address,
        alloc_weight: u64,
        asset: Address,
    ) -> Result<u32, FarmError> {
        Self::enter(&env)?;
        access::require_admin(&env, &caller)?;
        registry::add_pool(&env, alloc_weight, asset)
    }

    /// Change the allocation weight of pool `pid`. Admin only; allowed after
    /// the farm has closed.
    pub fn set_alloc_weight(
        env: Env,
        caller: Address,
        pid: u32,
        alloc_weight: u64,
    ) -> Result<(), FarmError> {
        Self::enter(&env)?;
        access::require_admin(&env, &caller)?;
        registry::set_alloc_weight(&env, pid, alloc_weight)
    }

    // ── Synchronisation ─────────────────────────────────────────────────────

    /// Bring pool `pid`'s reward index up to the current effective height.
    pub fn sync_pool(env: Env, pid: u32) -> Result<Pool, FarmError> {
        Self::enter(&env)?;
        sync::sync_pool(&env, pid)
    }

    /// Sync each pool in `pids`, in order.
    pub fn sync_pools(env: Env, pids: Vec<u32>) -> Result<Vec<Pool>, FarmError> {
        Self::enter(&env)?;
        sync::sync_pools(&env, &pids)
    }

    // ── Positions ───────────────────────────────────────────────────────────

    /// Stake `amount` of pool `pid`'s asset from `caller`, credited to
    /// `beneficiary`.
    pub fn deposit(
        env: Env,
        caller: Address,
        pid: u32,
        amount: u128,
        beneficiary: Address,
    ) -> Result<(), FarmError> {
        Self::enter(&env)?;
        caller.require_auth();
        positions::deposit(&env, &caller, pid, amount, &beneficiary)
    }

    /// Unstake `amount` of `caller`'s own stake and send it to `recipient`.
    pub fn withdraw(
        env: Env,
        caller: Address,
        pid: u32,
        amount: u128,
        recipient: Address,
    ) -> Result<(), FarmError> {
        Self::enter(&env)?;
        caller.require_auth();
        positions::withdraw(&env, &caller, pid, amount, &recipient)
    }

    /// Return `caller`'s whole stake to `recipient`, dropping pending reward.
    pub fn emergency_withdraw(
        env: Env,
        caller: Address,
        pid: u32,
        recipient: Address,
    ) -> Result<u128, FarmError> {
        Self::enter(&env)?;
        caller.require_auth();
        positions::emergency_withdraw(&env, &caller, pid, &recipient)
    }

    // ── Termination ─────────────────────────────────────────────────────────

    /// Freeze accrual at `height`, which must lie in the future. Admin only.
    pub fn terminate(env: Env, caller: Address, height: u32) -> Result<(), FarmError> {
        Self::enter(&env)?;
        access::require_admin(&env, &caller)?;
        termination::terminate(&env, height)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Pending reward of `user` in pool `pid` as of the current height.
    pub fn pending_reward(env: Env, pid: u32, user: Address) -> Result<u128, FarmError> {
        query::pending_reward(&env, pid, &user)
    }

    /// Pending reward of `user` summed over every pool.
    pub fn user_aggregate_pending(env: Env, user: Address) -> Result<u128, FarmError> {
        query::user_aggregate_pending(&env, &user)
    }

    /// `(current − start) × rate`; ignores weights and the termination clamp.
    pub fn total_emitted(env: Env) -> Result<u128, FarmError> {
        query::total_emitted(&env)
    }

    pub fn pool_count(env: Env) -> u32 {
        storage::get_pool_count(&env)
    }

    pub fn get_pool(env: Env, pid: u32) -> Result<Pool, FarmError> {
        storage::get_pool(&env, pid)
    }

    pub fn get_position(env: Env, pid: u32, user: Address) -> UserPosition {
        storage::get_position(&env, pid, &user)
    }

    pub fn get_total_alloc_weight(env: Env) -> u64 {
        storage::get_total_alloc_weight(&env)
    }

    pub fn get_start_height(env: Env) -> u32 {
        storage::get_start_height(&env)
    }

    pub fn get_termination_height(env: Env) -> u32 {
        storage::get_termination_height(&env)
    }

    pub fn is_closed(env: Env) -> bool {
        termination::is_closed(&env)
    }

    pub fn get_config(env: Env) -> Result<FarmConfig, FarmError> {
        storage::get_config(&env)
    }

    pub fn get_reward_rate(env: Env) -> Result<u128, FarmError> {
        Ok(storage::get_config(&env)?.reward_rate_per_block)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, FarmError> {
        Ok(storage::get_config(&env)?.admin)
    }

    /// Whether `addr` passes the admin gate.
    pub fn is_admin(env: Env, addr: Address) -> bool {
        access::is_admin(&env, &addr)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose `new_admin` as primary admin. Only the current primary admin
    /// can call this; `new_admin` completes it with `accept_admin`.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), FarmError> {
        Self::enter(&env)?;
        access::require_primary_admin(&env, &current_admin)?;

        storage::set_pending_admin(&env, &new_admin);
        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);
        Ok(())
    }

    /// Accept a pending transfer. The previous primary admin loses its tier.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), FarmError> {
        Self::enter(&env)?;
        new_admin.require_auth();

        let pending = storage::get_pending_admin(&env).ok_or(FarmError::Unauthorized)?;
        if new_admin != pending {
            return Err(FarmError::Unauthorized);
        }

        let mut config = storage::get_config(&env)?;
        let old_admin = config.admin.clone();
        config.admin = new_admin.clone();
        storage::set_config(&env, &config);
        storage::clear_pending_admin(&env);

        admin_tiers::remove_admin_tier(&env, &old_admin);
        admin_tiers::untrack_admin(&env, &old_admin);
        admin_tiers::set_super_admin(&env, &new_admin);
        admin_tiers::track_admin(&env, &new_admin);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);
        Ok(())
    }

    /// Withdraw a pending proposal. Only the current primary admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), FarmError> {
        Self::enter(&env)?;
        access::require_primary_admin(&env, &current_admin)?;

        let pending = storage::get_pending_admin(&env).ok_or(FarmError::Unauthorized)?;
        storage::clear_pending_admin(&env);
        events::publish_admin_transfer_cancelled(&env, current_admin, pending);
        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        storage::get_pending_admin(&env)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. SuperAdmin only.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), FarmError> {
        Self::enter(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier) {
            return Err(FarmError::Unauthorized);
        }
        Ok(())
    }

    /// Remove `target`'s tier. SuperAdmin only.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), FarmError> {
        Self::enter(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(FarmError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Common prologue of every state-changing entry point.
    fn enter(env: &Env) -> Result<(), FarmError> {
        storage::require_initialized(env)?;
        common::ttl::extend_instance(env);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────




#[cfg(test)]
mod test_termination;
