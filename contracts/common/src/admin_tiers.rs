use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::ttl;

// ── Storage Keys ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
enum AdminKey {
    /// Tier held by one address.
    Tier(Address),
    /// The address bootstrapped as the first SuperAdmin.
    SuperAdmin,
    /// Every address that currently holds a tier.
    Roster,
}

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Three-tier admin hierarchy.
///
/// - `SuperAdmin`    – Manages the roster itself: promotes and demotes other
///                     admins, plus everything below.
/// - `ContractAdmin` – Passes the contract's access-control gate: registers
///                     pools, reweights them and schedules termination.
/// - `OperatorAdmin` – Listed on the roster but holds no farm permissions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Tier assignment ──────────────────────────────────────────────────────────

/// Assigns `tier` to `admin`, replacing any previous tier.
/// Callers must have authorised the change beforehand.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = AdminKey::Tier(admin.clone());
    env.storage().persistent().set(&key, &tier);
    ttl::extend_persistent(env, &key);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = AdminKey::Tier(admin.clone());
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        ttl::extend_persistent(env, &key);
    }
    tier
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage()
        .persistent()
        .remove(&AdminKey::Tier(admin.clone()));
}

/// Returns true when `caller` holds `min_tier` or a higher tier.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    get_admin_tier(env, caller).is_some_and(|tier| tier.has_at_least(min_tier))
}

// ── SuperAdmin bootstrap ─────────────────────────────────────────────────────

/// Records the bootstrap SuperAdmin and grants it the `SuperAdmin` tier.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&AdminKey::SuperAdmin, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AdminKey::SuperAdmin)
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

/// Assigns `tier` to `target` on behalf of `caller`.
///
/// `caller` must already be authenticated and hold `SuperAdmin`; returns
/// `false` without touching storage otherwise.
pub fn promote_admin(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    track_admin(env, target);
    true
}

/// Strips every tier from `target` on behalf of a SuperAdmin `caller`.
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    remove_admin_tier(env, target);
    untrack_admin(env, target);
    true
}

// ── Roster ───────────────────────────────────────────────────────────────────

pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&AdminKey::Roster)
        .unwrap_or(Vec::new(env))
}

/// Adds `admin` to the roster unless it is already listed.
pub fn track_admin(env: &Env, admin: &Address) {
    let mut roster = list_admins(env);
    if roster.contains(admin) {
        return;
    }
    roster.push_back(admin.clone());
    env.storage().persistent().set(&AdminKey::Roster, &roster);
    ttl::extend_persistent(env, &AdminKey::Roster);
}

pub fn untrack_admin(env: &Env, admin: &Address) {
    let mut roster = list_admins(env);
    if let Some(index) = roster.first_index_of(admin) {
        roster.remove(index);
        env.storage().persistent().set(&AdminKey::Roster, &roster);
        ttl::extend_persistent(env, &AdminKey::Roster);
    }
}
