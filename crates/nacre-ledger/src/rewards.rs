// crates/nacre-ledger/src/rewards.rs
//
// Reward accrual for staked principal.
//
// Rewards accrue linearly against the original staked amount at the pool's
// current APY — no compounding on accrued-but-unclaimed rewards. All
// arithmetic is integer division truncating toward zero:
//
//   elapsed       = now - snapshot_time
//   annual_reward = amount * apy_percent / 100
//   reward        = annual_reward * elapsed / SECONDS_PER_YEAR
//
// The snapshot time is the stake's start until the first claim; each claim
// resets it so future rewards accrue only on the unclaimed remainder of the
// timeline.

use nacre_core::Timestamp;

use crate::staking::StakeRecord;
use crate::token::SECONDS_PER_YEAR;

/// Compute the pending reward (in pearl) for a stake record at `now`.
///
/// Returns 0 for an inactive record. The APY is read from the pool at call
/// time, so an admin APY change applies to the entire unclaimed window.
pub fn pending_reward(record: &StakeRecord, apy_percent: u64, now: Timestamp) -> u128 {
    if !record.is_active {
        return 0;
    }
    let elapsed = now.saturating_sub(record.snapshot_time) as u128;
    let annual_reward = record.amount.saturating_mul(apy_percent as u128) / 100;
    annual_reward.saturating_mul(elapsed) / SECONDS_PER_YEAR as u128
}
