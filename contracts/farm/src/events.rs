#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::Pool;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_rate_per_block: u128,
    pub height: u32,
}

/// Fired when a pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pid: u32,
    pub asset: Address,
    pub alloc_weight: u64,
    pub height: u32,
}

/// Fired when a pool is reweighted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSetEvent {
    pub pid: u32,
    pub alloc_weight: u64,
    pub height: u32,
}

/// Fired when a sync actually moves a pool forward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pid: u32,
    pub last_reward_height: u32,
    pub staked_supply: u128,
    pub acc_reward_per_share: u128,
    /// Ledger height of the sync; differs from `last_reward_height` once the
    /// farm has closed.
    pub height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub actor: Address,
    pub pid: u32,
    pub amount: u128,
    pub beneficiary: Address,
    pub height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub actor: Address,
    pub pid: u32,
    pub amount: u128,
    pub recipient: Address,
    pub height: u32,
}

/// Fired on emergency withdraw, including for an empty position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub actor: Address,
    pub pid: u32,
    pub amount: u128,
    pub recipient: Address,
    pub height: u32,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub height: u32,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub height: u32,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub height: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, reward_rate_per_block: u128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_rate_per_block,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(env: &Env, pid: u32, asset: Address, alloc_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pid),
        PoolAddedEvent {
            pid,
            asset,
            alloc_weight,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_set(env: &Env, pid: u32, alloc_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pid),
        PoolSetEvent {
            pid,
            alloc_weight,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, pid: u32, pool: &Pool, staked_supply: u128) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pid),
        PoolUpdatedEvent {
            pid,
            last_reward_height: pool.last_reward_height,
            staked_supply,
            acc_reward_per_share: pool.acc_reward_per_share,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(env: &Env, actor: Address, pid: u32, amount: u128, beneficiary: Address) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), actor.clone(), pid),
        DepositEvent {
            actor,
            pid,
            amount,
            beneficiary,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, actor: Address, pid: u32, amount: u128, recipient: Address) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), actor.clone(), pid),
        WithdrawEvent {
            actor,
            pid,
            amount,
            recipient,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    actor: Address,
    pid: u32,
    amount: u128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), actor.clone(), pid),
        EmergencyWithdrawEvent {
            actor,
            pid,
            amount,
            recipient,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            height: env.ledger().sequence(),
        },
    );
}
