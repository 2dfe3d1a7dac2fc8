//! Access-control gate for administrative operations.

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{Address, Env};

use crate::{storage, FarmError};

/// `ContractAdmin` tier or above, or the stored primary admin.
pub fn is_admin(env: &Env, addr: &Address) -> bool {
    if admin_tiers::require_tier(env, addr, &AdminTier::ContractAdmin) {
        return true;
    }
    storage::get_config(env).is_ok_and(|config| config.admin == *addr)
}

/// Authenticates `caller` and rejects it unless it passes [`is_admin`].
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), FarmError> {
    caller.require_auth();
    if !is_admin(env, caller) {
        return Err(FarmError::Unauthorized);
    }
    Ok(())
}

/// Authenticates `caller` and requires it to be the stored primary admin.
pub fn require_primary_admin(env: &Env, caller: &Address) -> Result<(), FarmError> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    if config.admin != *caller {
        return Err(FarmError::Unauthorized);
    }
    Ok(())
}
