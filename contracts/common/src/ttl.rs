use soroban_sdk::{Env, IntoVal, Val};

/// Ledgers closed per day at ~5 s per ledger.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Entries are pushed out to this many ledgers whenever they are touched.
pub const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// Remaining lifetime below which a touched entry gets bumped.
pub const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Keep the contract instance (and all instance-storage globals) alive.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

/// Keep a persistent entry alive. The entry must exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}
