//! Score ranking: standings sorted by score with competition ranking.

use crate::models::PlayerEntry;

/// Rank entries by score, descending, with competition ranking.
///
/// Tied scores share a rank; the rank of a tie group is
/// `1 + (number of entries with a strictly greater score)`, so the next
/// distinct rank skips ("1, 2, 2, 4" rather than "1, 2, 2, 3").
pub fn rank(entries: &[PlayerEntry]) -> Vec<(PlayerEntry, u32)> {
    let mut sorted: Vec<PlayerEntry> = entries.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    sorted
        .iter()
        .map(|e| {
            let better = entries.iter().filter(|o| o.score > e.score).count();
            (e.clone(), better as u32 + 1)
        })
        .collect()
}
