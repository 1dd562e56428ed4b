//! Bracket assignment: randomly distribute players across a round's groups.

use crate::models::PlayerId;
use rand::seq::SliceRandom;
use rand::Rng;

/// Distribute `players` across `group_count` buckets as evenly as possible.
///
/// The pool is shuffled uniformly, then dealt out in order: with
/// `base = n / g` and `rem = n % g`, the first `rem` buckets receive
/// `base + 1` players and the rest `base`. Every player lands in exactly
/// one bucket and bucket sizes differ by at most 1.
///
/// The RNG is injected so tests can use a seeded source; production callers
/// pass `rand::thread_rng()`.
pub fn assign<R: Rng>(
    mut players: Vec<PlayerId>,
    group_count: usize,
    rng: &mut R,
) -> Vec<Vec<PlayerId>> {
    debug_assert!(group_count >= 1);
    players.shuffle(rng);

    let base = players.len() / group_count;
    let remainder = players.len() % group_count;

    let mut buckets = Vec::with_capacity(group_count);
    let mut rest = players.as_slice();
    for i in 0..group_count {
        let take = base + usize::from(i < remainder);
        let (chunk, tail) = rest.split_at(take);
        buckets.push(chunk.to_vec());
        rest = tail;
    }
    buckets
}

/// Minimum pool size to populate a round of nominal size `round_size`:
/// 75% of the round's capacity, rounded up.
pub fn required_players(round_size: u32) -> usize {
    (round_size as usize * 3).div_ceil(4)
}
