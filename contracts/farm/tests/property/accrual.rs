//! Properties of a single pool's reward index under random activity.
//!
//! - The index never decreases, and never moves across an interval in which
//!   the pool held no stake.
//! - Pending rewards of all stakers add up to what the pool emitted, up to
//!   flooring error. With exits in the mix this holds for signed pending,
//!   plus whatever emergency withdrawals forfeited.

use farm::PRECISION;
use proptest::prelude::*;
use soroban_sdk::Address;

use crate::support::{Farm, Op, USERS};

const RATE: u128 = 1_000;

fn deposit_or_advance() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..USERS, 1u128..5_000_000).prop_map(|(user, amount)| Op::Deposit { user, amount }),
        (1u32..20).prop_map(|heights| Op::Advance { heights }),
    ]
}

/// `staked × acc / PRECISION − reward_debt` without the unsigned narrowing,
/// so a partial withdraw's −1 flooring residue shows up instead of faulting.
fn signed_pending(farm: &Farm, pid: u32, user: &Address, acc: u128) -> i128 {
    let position = farm.client.get_position(&pid, user);
    i128::try_from(position.staked_amount * acc / PRECISION).unwrap() - position.reward_debt
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_index_is_monotonic(ops in prop::collection::vec(any::<Op>(), 1..25)) {
        let farm = Farm::new(RATE);
        let pid = farm.add_pool(1);

        let mut acc = farm.client.sync_pool(&pid).acc_reward_per_share;
        for op in &ops {
            let supply_before = farm.supply(pid);
            op.apply(&farm, pid);

            let next = farm.client.sync_pool(&pid).acc_reward_per_share;
            prop_assert!(next >= acc);
            if matches!(op, Op::Advance { .. }) && supply_before == 0 {
                prop_assert_eq!(next, acc);
            }
            acc = next;
        }
    }

    #[test]
    fn prop_pending_rewards_conserve_emission(
        first in 1u128..5_000_000,
        ops in prop::collection::vec(deposit_or_advance(), 0..25),
    ) {
        let farm = Farm::new(RATE);
        let pid = farm.add_pool(1);

        farm.advance(3);
        let start = farm.height();
        Op::Deposit { user: 0, amount: first }.apply(&farm, pid);
        for op in &ops {
            op.apply(&farm, pid);
        }

        let emitted = u128::from(farm.height() - start) * RATE;
        let pending = farm.pending_sum(pid);
        let tolerance = (ops.len() as u128 + 1) * (USERS as u128 + 1);
        prop_assert!(pending.abs_diff(emitted) <= tolerance,
            "pending {} vs emitted {}", pending, emitted);
        prop_assert_eq!(farm.client.total_emitted(), emitted);
    }

    #[test]
    fn prop_emission_conserved_across_exits(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let farm = Farm::new(RATE);
        let pid = farm.add_pool(1);

        let mut emitted: i128 = 0;
        let mut forfeited: i128 = 0;
        for op in &ops {
            match *op {
                // Heights only emit while something is staked.
                Op::Advance { heights } if farm.supply(pid) > 0 => {
                    emitted += i128::from(heights) * RATE as i128;
                }
                // Emergency exits skip the sync; settle the index first so the
                // forfeited share is measured against it.
                Op::EmergencyWithdraw { user } => {
                    let acc = farm.client.sync_pool(&pid).acc_reward_per_share;
                    forfeited += signed_pending(&farm, pid, &farm.users[user], acc);
                }
                _ => {}
            }
            op.apply(&farm, pid);
        }

        let acc = farm.client.sync_pool(&pid).acc_reward_per_share;
        let held: i128 = farm
            .users
            .iter()
            .map(|user| signed_pending(&farm, pid, user, acc))
            .sum();
        let tolerance = (ops.len() as i128 + 1) * (USERS as i128 + 1);
        prop_assert!((held + forfeited - emitted).abs() <= tolerance,
            "held {} + forfeited {} vs emitted {}", held, forfeited, emitted);
    }

    /// Stake only ever added: every checkpoint is taken at an index no higher
    /// than the current one, so pending can never come out negative.
    #[test]
    fn prop_pending_never_faults_while_stake_grows(
        ops in prop::collection::vec(deposit_or_advance(), 1..25),
    ) {
        let farm = Farm::new(RATE);
        let pid = farm.add_pool(1);

        for op in &ops {
            op.apply(&farm, pid);
            for user in &farm.users {
                prop_assert!(farm.client.try_pending_reward(&pid, user).is_ok());
            }
        }
    }
}
