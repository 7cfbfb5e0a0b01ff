//! Game configuration.
//!
//! All tunable rule constants live here rather than being scattered through
//! the validator and executor. The defaults reproduce the published game;
//! tests shrink them to force edge cases (tiny decks, instant exhaustion).

use serde::{Deserialize, Serialize};

/// Rule constants for one game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum roster size required to start.
    pub min_players: usize,

    /// Maximum roster size (bounded by the player color palette).
    pub max_players: usize,

    /// Building slots per player.
    pub buildings_per_player: usize,

    /// Cards dealt to each player at game start, and the draw count granted
    /// to a player who ends a turn with an empty hand.
    pub initial_hand_size: usize,

    /// Hand size cap. An end-turn draw stops at the card that reaches the
    /// cap, but always attempts at least one card.
    pub max_hand_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 5,
            buildings_per_player: 6,
            initial_hand_size: 5,
            max_hand_size: 10,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the roster bounds.
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1, "Must allow at least 1 player");
        assert!(min <= max, "min_players must not exceed max_players");
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the initial hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }
}
