//! Client-facing projections of the authoritative state.
//!
//! `GameState` itself is never serialized. Everything a client may see is
//! produced here as a dedicated view type, so hidden information (other
//! hands, deck order, tsunami values and positions) stays on the server by
//! construction. The public game view carries hand *counts* only; a
//! player's own cards travel separately in `PrivateHand`.

use serde::{Deserialize, Serialize};

use crate::cards::RegularCard;
use crate::core::{BuildingId, PlayerId};
use crate::session::{Phase, PlayerSeat, Session};
use crate::state::{Building, GameState, PlayerState};

/// One building as everyone sees it. Stacks are open information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: BuildingId,
    pub cards: Vec<RegularCard>,
    pub protected: bool,
    pub modified_this_turn: bool,
}

impl BuildingView {
    fn of(building: &Building) -> Self {
        Self {
            id: building.id,
            cards: building.cards.clone(),
            protected: building.protected,
            modified_this_turn: building.modified_this_turn,
        }
    }
}

/// One player as opponents see them: hand size, never hand contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayerState {
    pub id: PlayerId,
    pub hand_count: usize,
    pub buildings: Vec<BuildingView>,
    pub score: u32,
    pub is_idle: bool,
    pub attacks_this_turn: u32,
}

impl PublicPlayerState {
    fn of(player: &PlayerState) -> Self {
        Self {
            id: player.id,
            hand_count: player.hand.len(),
            buildings: player.buildings.iter().map(BuildingView::of).collect(),
            score: player.score,
            is_idle: player.is_idle,
            attacks_this_turn: player.attacks_this_turn,
        }
    }
}

/// The shared table state broadcast to every client.
///
/// Deck and discard are exposed as counts; the tsunami countdown reveals
/// distance, never value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicGameState {
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub round_number: u32,
    pub deck_count: usize,
    pub discard_count: usize,
    pub cards_until_next_tsunami: Option<usize>,
    pub players: Vec<PublicPlayerState>,
}

/// Project the full table view.
#[must_use]
pub fn public_game_state(state: &GameState) -> PublicGameState {
    PublicGameState {
        current_player: state.current_player().id,
        turn_number: state.turn.turn_number,
        round_number: state.turn.round_number,
        deck_count: state.deck.len(),
        discard_count: state.discard.len(),
        cards_until_next_tsunami: state.cards_until_next_tsunami(),
        players: state.players.iter().map(PublicPlayerState::of).collect(),
    }
}

/// A player's own hand, sent to that player only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateHand {
    pub player: PlayerId,
    pub cards: Vec<RegularCard>,
}

/// Project one player's private hand, if the player exists.
#[must_use]
pub fn private_hand(state: &GameState, player: PlayerId) -> Option<PrivateHand> {
    state.player(player).map(|p| PrivateHand {
        player: p.id,
        cards: p.hand.clone(),
    })
}

/// Roster snapshot broadcast on every lobby change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub host_connected: bool,
    pub players: Vec<PlayerSeat>,
    pub min_players: usize,
    pub max_players: usize,
}

/// Project the session roster.
#[must_use]
pub fn session_snapshot(session: &Session) -> SessionSnapshot {
    SessionSnapshot {
        phase: session.phase(),
        host_connected: session.host_connected(),
        players: session.seats().to_vec(),
        min_players: session.min_players(),
        max_players: session.max_players(),
    }
}
