//! Orchestration: bracket creation, round advancement, standings, scores.

use crate::logic::advancement::{self, GroupOutcome};
use crate::logic::assignment::{assign, required_players};
use crate::logic::planner::{group_label, plan_rounds};
use crate::logic::scoreboard;
use crate::models::{
    BracketError, EntryStatus, GroupStatus, MatchGroup, MatchGroupId, PlayerEntry, PlayerId, Role,
    Round, RoundStatus, Tournament,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row of a group's standings (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub player_id: PlayerId,
    pub game_id: String,
    pub game_tier: String,
    pub score: u32,
    pub rank: u32,
}

/// Display summary of one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub index: u32,
    pub size: u32,
    pub status: RoundStatus,
}

/// All rounds plus the live (currently played) round, 0 if none.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundListInfo {
    pub rounds: Vec<RoundSummary>,
    pub live_round: u32,
}

/// Create a tournament with its full empty round/group skeleton.
///
/// Every round below the starting capacity is pre-created down to the
/// minimum table size; groups get sequential letter labels in creation
/// order. Rejects unsupported capacities without creating anything.
pub fn create_bracket(
    link: impl Into<String>,
    capacity: u32,
) -> Result<Tournament, BracketError> {
    let plans = plan_rounds(capacity)?;
    let rounds = plans
        .iter()
        .map(|plan| Round {
            index: plan.round_index,
            status: RoundStatus::Pending,
            groups: (1..=plan.group_count)
                .map(|n| MatchGroup::new(group_label(n)))
                .collect(),
        })
        .collect();
    Ok(Tournament {
        link: link.into(),
        capacity,
        rounds,
        players: Vec::new(),
    })
}

/// Advance the tournament at `round_index`. Caller must be the host.
///
/// A Pending opening round is populated directly from the registered pool
/// (there are no prior scores to judge). An InProgress round has the
/// advancement policy applied per group; survivors are shuffled into the
/// next round, or crowned finalists when this is the last round. All checks
/// run against a snapshot before any state is written, so a failing call
/// leaves the tournament untouched.
pub fn advance_round<R: Rng>(
    tournament: &mut Tournament,
    round_index: u32,
    caller_role: Role,
    rng: &mut R,
) -> Result<(), BracketError> {
    ensure_host(caller_role)?;

    let status = tournament
        .round(round_index)
        .ok_or(BracketError::RoundNotFound)?
        .status;
    match status {
        RoundStatus::Pending => {
            if round_index != 1 {
                return Err(BracketError::RoundNotReady);
            }
            populate_opening_round(tournament, rng)
        }
        RoundStatus::InProgress => advance_from(tournament, round_index, rng),
        RoundStatus::Complete => Err(BracketError::RoundNotReady),
    }
}

/// Ranked standings for one group: score descending, competition ranks.
pub fn standings(
    tournament: &Tournament,
    group_id: MatchGroupId,
) -> Result<Vec<StandingRow>, BracketError> {
    let group = tournament.group(group_id).ok_or(BracketError::MatchNotFound)?;
    scoreboard::rank(&group.entries)
        .into_iter()
        .map(|(entry, rank)| {
            let player = tournament
                .player(entry.player_id)
                .ok_or(BracketError::PlayerNotFound(entry.player_id))?;
            Ok(StandingRow {
                player_id: player.id,
                game_id: player.game_id.clone(),
                game_tier: player.game_tier.clone(),
                score: entry.score,
                rank,
            })
        })
        .collect()
}

/// Set a player's score in a group to an absolute value.
///
/// The value comes from an external scoring input; the engine only checks
/// shape (non-negative integer, enforced by the type) and existence.
pub fn update_score(
    tournament: &mut Tournament,
    group_id: MatchGroupId,
    player_id: PlayerId,
    score: u32,
) -> Result<(), BracketError> {
    let group = tournament
        .group_mut(group_id)
        .ok_or(BracketError::MatchNotFound)?;
    let entry = group
        .entry_mut(player_id)
        .ok_or(BracketError::PlayerNotFound(player_id))?;
    entry.score = score;
    Ok(())
}

/// Round overview with the live round (the one currently being played).
pub fn round_list(tournament: &Tournament) -> RoundListInfo {
    let rounds: Vec<RoundSummary> = tournament
        .rounds
        .iter()
        .map(|r| RoundSummary {
            index: r.index,
            size: tournament.round_size(r.index),
            status: r.status,
        })
        .collect();
    let live_round = tournament
        .rounds
        .iter()
        .find(|r| r.status == RoundStatus::InProgress)
        .map(|r| r.index)
        .unwrap_or(0);
    RoundListInfo { rounds, live_round }
}

/// Capability check: round advancement is a host-only operation.
fn ensure_host(role: Role) -> Result<(), BracketError> {
    if role != Role::Host {
        return Err(BracketError::InvalidAuth);
    }
    Ok(())
}

/// Populate round 1 from the full registered pool, skipping the policy.
fn populate_opening_round<R: Rng>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), BracketError> {
    let pool: Vec<PlayerId> = tournament
        .players
        .iter()
        .filter(|p| p.role == Role::Player && p.is_eligible())
        .map(|p| p.id)
        .collect();

    let required = required_players(tournament.capacity);
    if pool.len() < required {
        return Err(BracketError::InsufficientPlayers {
            required,
            available: pool.len(),
        });
    }

    for id in &pool {
        if let Some(p) = tournament.player_mut(*id) {
            p.start_progress();
        }
    }
    place_into_round(tournament, 1, pool, rng);
    Ok(())
}

/// Apply the advancement policy to `round_index` and seat survivors in the
/// next round (or finish the tournament if this was the final round).
fn advance_from<R: Rng>(
    tournament: &mut Tournament,
    round_index: u32,
    rng: &mut R,
) -> Result<(), BracketError> {
    // Decide everything on the snapshot first; mutate only once all groups
    // evaluated cleanly and the survivor pool clears the minimum.
    let round = tournament
        .round(round_index)
        .ok_or(BracketError::RoundNotFound)?;
    let outcomes: Vec<(MatchGroupId, GroupOutcome)> = round
        .groups
        .iter()
        .map(|g| Ok((g.id, advancement::evaluate(g, tournament)?)))
        .collect::<Result<_, BracketError>>()?;

    let survivors: Vec<PlayerId> = outcomes
        .iter()
        .flat_map(|(_, o)| o.survivors.iter().copied())
        .collect();

    let is_final_round = tournament.round(round_index + 1).is_none();
    if !is_final_round {
        let required = required_players(tournament.round_size(round_index + 1));
        if survivors.len() < required {
            return Err(BracketError::InsufficientPlayers {
                required,
                available: survivors.len(),
            });
        }
    }

    for (group_id, outcome) in &outcomes {
        for player_id in &outcome.eliminated {
            if let Some(p) = tournament.player_mut(*player_id) {
                p.drop_out();
            }
            if let Some(g) = tournament.group_mut(*group_id) {
                if let Some(e) = g.entry_mut(*player_id) {
                    e.status = EntryStatus::Disqualified;
                }
            }
        }
        if let Some(g) = tournament.group_mut(*group_id) {
            g.status = GroupStatus::Complete;
        }
    }
    if let Some(r) = tournament.round_mut(round_index) {
        r.status = RoundStatus::Complete;
    }

    if !is_final_round {
        place_into_round(tournament, round_index + 1, survivors, rng);
    }
    Ok(())
}

/// Shuffle a player pool into a round's groups and mark everything live.
fn place_into_round<R: Rng>(
    tournament: &mut Tournament,
    round_index: u32,
    pool: Vec<PlayerId>,
    rng: &mut R,
) {
    let Some(round) = tournament.round_mut(round_index) else {
        return;
    };
    let buckets = assign(pool, round.groups.len(), rng);
    for (group, bucket) in round.groups.iter_mut().zip(buckets) {
        group.entries = bucket.into_iter().map(PlayerEntry::new).collect();
        group.status = GroupStatus::InProgress;
    }
    round.status = RoundStatus::InProgress;
}
