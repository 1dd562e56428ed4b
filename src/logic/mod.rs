//! Bracket engine logic: round planning, assignment, ranking, advancement.

mod advancement;
mod assignment;
mod engine;
mod planner;
mod scoreboard;

pub use advancement::{evaluate, GroupOutcome, SURVIVORS_PER_GROUP};
pub use assignment::{assign, required_players};
pub use engine::{
    advance_round, create_bracket, round_list, standings, update_score, RoundListInfo,
    RoundSummary, StandingRow,
};
pub use planner::{group_label, plan_rounds, RoundPlan, ALLOWED_CAPACITIES, MIN_GROUP_SIZE};
pub use scoreboard::rank;
