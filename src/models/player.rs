//! Player (tournament entrant) data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in entries and lookups).
pub type PlayerId = Uuid;

/// Overall participation status across the whole tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Signed up, not yet placed into the opening round.
    #[default]
    Registered,
    /// Placed into a round and still competing.
    Progress,
    /// Eliminated by the advancement policy.
    DroppedOut,
    /// Removed by an organizer; never re-placed and never auto-dropped again.
    Disqualified,
}

/// Role of a participant within the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Host,
    Manager,
    #[default]
    Player,
}

/// A tournament entrant. Game identity and tier come from the external
/// game account and are carried for display only, never for ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: String,
    pub game_tier: String,
    pub status: PlayerStatus,
    pub role: Role,
}

impl Player {
    /// Create a new entrant in Registered status.
    pub fn new(game_id: impl Into<String>, game_tier: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id: game_id.into(),
            game_tier: game_tier.into(),
            status: PlayerStatus::Registered,
            role,
        }
    }

    /// Still in the running: eligible for placement into a round.
    pub fn is_eligible(&self) -> bool {
        matches!(self.status, PlayerStatus::Registered | PlayerStatus::Progress)
    }

    /// Mark the player as competing (first placement into a round).
    pub fn start_progress(&mut self) {
        self.status = PlayerStatus::Progress;
    }

    /// Eliminate the player from the tournament.
    pub fn drop_out(&mut self) {
        self.status = PlayerStatus::DroppedOut;
    }
}
