//! Round planning: split a tournament capacity into elimination rounds.

use crate::models::BracketError;

/// Smallest group (table) size; also the size of the final round.
pub const MIN_GROUP_SIZE: u32 = 8;

/// Supported tournament capacities. 0 is a valid "no bracket" size.
pub const ALLOWED_CAPACITIES: [u32; 7] = [0, 8, 16, 32, 64, 128, 256];

/// Plan for one elimination round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoundPlan {
    /// 1 = opening (largest) round.
    pub round_index: u32,
    /// Number of match groups in this round.
    pub group_count: u32,
    /// Nominal player count entering this round.
    pub round_size: u32,
}

/// Compute the ordered round plans for a capacity (e.g. 64 -> 32 -> 16 -> 8).
///
/// Each round at size `s` is split into `s / MIN_GROUP_SIZE` groups; sizes
/// halve until they fall below the minimum table size. Capacities outside
/// [`ALLOWED_CAPACITIES`] are rejected.
pub fn plan_rounds(capacity: u32) -> Result<Vec<RoundPlan>, BracketError> {
    if !ALLOWED_CAPACITIES.contains(&capacity) {
        return Err(BracketError::InvalidCapacity(capacity));
    }

    let mut plans = Vec::new();
    let mut current = capacity;
    let mut round_index = 1;
    while current >= MIN_GROUP_SIZE {
        plans.push(RoundPlan {
            round_index,
            group_count: current / MIN_GROUP_SIZE,
            round_size: current,
        });
        current /= 2;
        round_index += 1;
    }
    Ok(plans)
}

/// Label for the `n`-th group of a round (1-based): "Group A" .. "Group Z",
/// then "Group AA", "Group AB", ... (bijective base-26, spreadsheet style).
/// Total for any group count the planner can produce.
pub fn group_label(n: u32) -> String {
    debug_assert!(n >= 1);
    let mut letters = Vec::new();
    let mut n = n;
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.reverse();
    let suffix: String = letters.into_iter().collect();
    format!("Group {}", suffix)
}
