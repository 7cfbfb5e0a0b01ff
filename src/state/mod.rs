//! Authoritative game state.
//!
//! `GameState` is owned exclusively by the engine and is never sent to
//! clients verbatim (it deliberately does not implement `Serialize`);
//! clients see projections from the `view` module instead. Mutation happens
//! only through the move executor and the turn machine here.

pub mod building;
pub mod player;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::DeckCard;
use crate::core::{CardIdAlloc, GameConfig, GameRng, PlayerId};
use crate::deck;

pub use building::Building;
pub use player::PlayerState;

/// Turn and round bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Always in `[0, player_count)`.
    pub current_player_index: usize,
    /// Increments on every end-turn.
    pub turn_number: u32,
    /// Increments when the turn index wraps back to 0.
    pub round_number: u32,
}

impl TurnState {
    fn initial() -> Self {
        Self {
            current_player_index: 0,
            turn_number: 1,
            round_number: 1,
        }
    }
}

/// Result of a turn advance, for the turn-changed notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnChange {
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub round_number: u32,
}

/// Server-authoritative state of one running game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub turn: TurnState,
    /// Players in turn order (roster order at start).
    pub players: Vec<PlayerState>,
    /// Draw pile; the front is the next card drawn, the back is the bottom.
    pub deck: VecDeque<DeckCard>,
    /// Shared discard pile: attack casualties, tsunami debris, and spent
    /// tsunami cards. Cards never return to the deck.
    pub discard: Vec<DeckCard>,
    /// The three tsunami values seeded into the deck, in placement order
    /// (first one is at the bottom).
    pub tsunami_values: [u8; 3],
}

impl GameState {
    /// Build the starting state for the given roster.
    ///
    /// Deck construction order matters: shuffle, deal every initial hand,
    /// *then* insert tsunami cards, so initial hands are regular cards by
    /// construction, not by filtering.
    #[must_use]
    pub fn start(roster: &[PlayerId], config: &GameConfig, rng: &mut GameRng) -> Self {
        let mut ids = CardIdAlloc::new();
        let mut pile = deck::create_deck(roster.len(), &mut ids);
        rng.shuffle(&mut pile);

        let mut players: Vec<PlayerState> = roster
            .iter()
            .map(|&id| PlayerState::new(id, config.buildings_per_player))
            .collect();
        for player in &mut players {
            player.hand = pile.drain(..config.initial_hand_size).collect();
        }

        let values = deck::select_tsunami_values(rng);
        let pile = deck::insert_tsunami_cards(pile, values, &mut ids, rng);

        Self {
            turn: TurnState::initial(),
            players,
            deck: pile.into(),
            discard: Vec::new(),
            tsunami_values: values,
        }
    }

    /// Number of players in turn order.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.turn.current_player_index]
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by id, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Is it this player's turn?
    #[must_use]
    pub fn is_current(&self, id: PlayerId) -> bool {
        self.current_player().id == id
    }

    /// Cards remaining until the next tsunami surfaces.
    #[must_use]
    pub fn cards_until_next_tsunami(&self) -> Option<usize> {
        deck::cards_until_next_tsunami(self.deck.iter())
    }

    /// Advance to the next player: index cycles mod player count, the turn
    /// number always increments, the round number increments exactly when
    /// the index wraps back to 0.
    pub fn advance_turn(&mut self) -> TurnChange {
        let count = self.players.len();
        self.turn.current_player_index = (self.turn.current_player_index + 1) % count;
        self.turn.turn_number += 1;
        if self.turn.current_player_index == 0 {
            self.turn.round_number += 1;
        }

        TurnChange {
            current_player: self.current_player().id,
            turn_number: self.turn.turn_number,
            round_number: self.turn.round_number,
        }
    }
}
