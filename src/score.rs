//! End-of-game detection and scoring.
//!
//! The game ends once the deck is exhausted and every player has gone idle
//! (drew nothing on an end-turn). Scores count cards standing in buildings;
//! hand cards are worth nothing.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::state::GameState;

/// One player's final tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub score: u32,
}

/// Has the game reached its end condition?
#[must_use]
pub fn game_over(state: &GameState) -> bool {
    state.deck.is_empty() && state.players.iter().all(|p| p.is_idle)
}

/// Compute every player's score, in turn order.
#[must_use]
pub fn scores(state: &GameState) -> Vec<PlayerScore> {
    state
        .players
        .iter()
        .map(|p| PlayerScore {
            player: p.id,
            score: p.building_card_count(),
        })
        .collect()
}

/// The winner: the highest score, with ties broken by turn order (the
/// earlier-seated player wins).
#[must_use]
pub fn winner(state: &GameState) -> Option<PlayerId> {
    // A later player must strictly beat the standing maximum.
    scores(state)
        .into_iter()
        .reduce(|best, s| if s.score > best.score { s } else { best })
        .map(|s| s.player)
}
