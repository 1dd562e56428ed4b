//! League bracket engine: library with models and tournament logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_round, assign, create_bracket, evaluate, group_label, plan_rounds, rank,
    required_players, round_list, standings, update_score, GroupOutcome, RoundListInfo, RoundPlan,
    RoundSummary, StandingRow, ALLOWED_CAPACITIES, MIN_GROUP_SIZE, SURVIVORS_PER_GROUP,
};
pub use models::{
    BracketError, EntryStatus, GroupStatus, MatchGroup, MatchGroupId, Player, PlayerEntry,
    PlayerId, PlayerStatus, Role, Round, RoundStatus, Tournament,
};
