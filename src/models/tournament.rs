//! Tournament, Round, and BracketError.

use crate::models::match_group::{MatchGroup, MatchGroupId};
use crate::models::player::{Player, PlayerId, Role};
use serde::{Deserialize, Serialize};

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Capacity is not one of the supported bracket sizes.
    InvalidCapacity(u32),
    /// Caller does not hold the HOST role.
    InvalidAuth,
    /// Not enough eligible players to populate the target round.
    InsufficientPlayers { required: usize, available: usize },
    /// Advancement requested on a group with no entries.
    MatchNotPlayable,
    /// Referenced match group does not exist.
    MatchNotFound,
    /// Referenced round does not exist.
    RoundNotFound,
    /// Referenced tournament does not exist.
    TournamentNotFound,
    /// Player has no entry in the referenced group, or is unknown.
    PlayerNotFound(PlayerId),
    /// Round is not in a state that allows advancement (not yet fed by its
    /// predecessor, or already advanced).
    RoundNotReady,
    /// A player with this game id is already registered (case-insensitive).
    DuplicatePlayer,
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidCapacity(c) => {
                write!(f, "Unsupported tournament capacity: {}", c)
            }
            BracketError::InvalidAuth => write!(f, "Caller must hold the host role"),
            BracketError::InsufficientPlayers { required, available } => {
                write!(
                    f,
                    "Not enough players to populate the round (need {}, have {})",
                    required, available
                )
            }
            BracketError::MatchNotPlayable => write!(f, "Match group has no players"),
            BracketError::MatchNotFound => write!(f, "Match group not found"),
            BracketError::RoundNotFound => write!(f, "Round not found"),
            BracketError::TournamentNotFound => write!(f, "Tournament not found"),
            BracketError::PlayerNotFound(_) => write!(f, "Player not found"),
            BracketError::RoundNotReady => {
                write!(f, "Round cannot be advanced in its current state")
            }
            BracketError::DuplicatePlayer => {
                write!(f, "A player with this game id is already registered")
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Lifecycle of a round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Skeleton created, no players placed.
    #[default]
    Pending,
    /// Populated by assignment; matches being played.
    InProgress,
    /// Every group has had the advancement policy applied.
    Complete,
}

/// One elimination stage: a set of match groups at a player-count tier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1 = largest (opening) round; increases as players are eliminated.
    pub index: u32,
    pub status: RoundStatus,
    pub groups: Vec<MatchGroup>,
}

/// Full tournament state: registered pool plus the pre-created round skeleton.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique handle used to address the tournament.
    pub link: String,
    /// Declared maximum player capacity; immutable after creation.
    pub capacity: u32,
    /// All rounds, opening round first. Created empty at setup.
    pub rounds: Vec<Round>,
    /// Registered entrants (all roles).
    pub players: Vec<Player>,
}

impl Tournament {
    /// Register an entrant. Game ids are unique, case-insensitive.
    pub fn register_player(
        &mut self,
        game_id: impl Into<String>,
        game_tier: impl Into<String>,
        role: Role,
    ) -> Result<PlayerId, BracketError> {
        let game_id = game_id.into();
        let trimmed = game_id.trim();
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.game_id.eq_ignore_ascii_case(trimmed));
        if is_duplicate {
            return Err(BracketError::DuplicatePlayer);
        }
        let player = Player::new(trimmed, game_tier, role);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Player lookup by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable player lookup by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Round lookup by index (1-based).
    pub fn round(&self, index: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.index == index)
    }

    /// Mutable round lookup by index.
    pub fn round_mut(&mut self, index: u32) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.index == index)
    }

    /// Group lookup by id across all rounds.
    pub fn group(&self, group_id: MatchGroupId) -> Option<&MatchGroup> {
        self.rounds
            .iter()
            .flat_map(|r| r.groups.iter())
            .find(|g| g.id == group_id)
    }

    /// Mutable group lookup by id across all rounds.
    pub fn group_mut(&mut self, group_id: MatchGroupId) -> Option<&mut MatchGroup> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.groups.iter_mut())
            .find(|g| g.id == group_id)
    }

    /// Nominal player count of a round: capacity halved per elimination stage.
    pub fn round_size(&self, index: u32) -> u32 {
        self.capacity >> (index - 1)
    }
}
