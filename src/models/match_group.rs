//! MatchGroup (one table of players within a round) and PlayerEntry.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match group.
pub type MatchGroupId = Uuid;

/// Lifecycle of a match group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    /// Created by the round planner, no players yet.
    #[default]
    Pending,
    /// Populated; scores may come in.
    InProgress,
    /// Advancement policy has been applied.
    Complete,
}

/// A player's entry within one match group: score plus elimination status.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Active,
    Disqualified,
}

/// Join record between a player and a match group for one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player_id: PlayerId,
    /// Absolute score reported by the external scoring input; not accumulated.
    pub score: u32,
    pub status: EntryStatus,
}

impl PlayerEntry {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            score: 0,
            status: EntryStatus::Active,
        }
    }
}

/// A single table of players competing simultaneously within a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub id: MatchGroupId,
    /// Sequential label within the round: "Group A", "Group B", ...
    pub label: String,
    pub status: GroupStatus,
    pub entries: Vec<PlayerEntry>,
}

impl MatchGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            status: GroupStatus::Pending,
            entries: Vec::new(),
        }
    }

    /// Mutable entry lookup by player id.
    pub fn entry_mut(&mut self, player_id: PlayerId) -> Option<&mut PlayerEntry> {
        self.entries.iter_mut().find(|e| e.player_id == player_id)
    }
}
