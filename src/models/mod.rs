//! Data structures for the bracket engine: players, match groups, tournaments.

mod match_group;
mod player;
mod tournament;

pub use match_group::{EntryStatus, GroupStatus, MatchGroup, MatchGroupId, PlayerEntry};
pub use player::{Player, PlayerId, PlayerStatus, Role};
pub use tournament::{BracketError, Round, RoundStatus, Tournament};
