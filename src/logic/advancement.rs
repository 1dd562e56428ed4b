//! Advancement policy: decide survivors and drop-outs for a finished group.

use crate::logic::scoreboard;
use crate::models::{BracketError, EntryStatus, MatchGroup, PlayerId, PlayerStatus, Tournament};

/// Players whose rank lets them continue past a round. Entries tied exactly
/// at this rank all survive, so a group can send on more than this many.
pub const SURVIVORS_PER_GROUP: u32 = 5;

/// Decision for one match group: who continues and who drops out.
/// Pure data; the engine applies it as a single write-set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupOutcome {
    /// Players that advance to the next round.
    pub survivors: Vec<PlayerId>,
    /// Players to transition to DroppedOut (entry marked Disqualified).
    pub eliminated: Vec<PlayerId>,
}

/// Evaluate one group against the top-N rule.
///
/// Entries are ranked by score; an entry survives if its competition rank is
/// within [`SURVIVORS_PER_GROUP`], it is still Active, and its player is
/// still in Progress. Everyone else is eliminated unless the player was
/// already dropped or disqualified, which keeps re-evaluation idempotent.
pub fn evaluate(group: &MatchGroup, tournament: &Tournament) -> Result<GroupOutcome, BracketError> {
    if group.entries.is_empty() {
        return Err(BracketError::MatchNotPlayable);
    }

    let mut outcome = GroupOutcome::default();
    for (entry, rank) in scoreboard::rank(&group.entries) {
        let player_status = tournament
            .player(entry.player_id)
            .map(|p| p.status)
            .ok_or(BracketError::PlayerNotFound(entry.player_id))?;

        let survives = rank <= SURVIVORS_PER_GROUP
            && entry.status == EntryStatus::Active
            && player_status == PlayerStatus::Progress;

        if survives {
            outcome.survivors.push(entry.player_id);
        } else if !matches!(
            player_status,
            PlayerStatus::DroppedOut | PlayerStatus::Disqualified
        ) {
            outcome.eliminated.push(entry.player_id);
        }
    }
    Ok(outcome)
}
