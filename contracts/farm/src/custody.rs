//! Asset custody through the pool asset's token contract.
//!
//! The farm never tracks a pool's staked supply itself; it reads its own
//! balance of the asset. Token amounts are `i128` on the token interface and
//! `u128` inside the farm, converted with a checked narrowing.

use soroban_sdk::{token, Address, Env};

use crate::{rewards, FarmError};

/// Balance of `asset` held by this contract.
pub fn staked_supply(env: &Env, asset: &Address) -> Result<u128, FarmError> {
    let balance = token::Client::new(env, asset).balance(&env.current_contract_address());
    u128::try_from(balance).map_err(|_| FarmError::ArithmeticFault)
}

/// Moves `amount` of `asset` from `from` into custody.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: u128) -> Result<(), FarmError> {
    if amount == 0 {
        return Ok(());
    }
    let amount = rewards::to_signed(amount)?;
    token::Client::new(env, asset).transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

/// Releases `amount` of `asset` from custody to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: u128) -> Result<(), FarmError> {
    if amount == 0 {
        return Ok(());
    }
    let amount = rewards::to_signed(amount)?;
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}
