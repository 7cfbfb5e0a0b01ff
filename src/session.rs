//! Session registry and phase machine.
//!
//! One `Session` exists per game instance. It owns the roster and the
//! `lobby → playing → finished` phase; the authoritative in-game state is
//! owned separately by `GameState`. Clients come in two roles: a single
//! display ("host") client that renders the shared table, and up to
//! `max_players` player clients.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PlayerId;

/// Session lifecycle phase. `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lobby,
    Playing,
    Finished,
}

/// The fixed player color palette. Roster size is bounded by its length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PlayerColor {
    /// Palette in assignment order.
    pub const PALETTE: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Purple,
    ];
}

/// A roster entry: identity, display name, assigned color, connection flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeat {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub connected: bool,
}

/// Rejections for lobby and capacity rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a display client is already connected")]
    HostAlreadyConnected,
    #[error("game already in progress")]
    GameInProgress,
    #[error("game is full")]
    GameFull,
    #[error("no player colors remain")]
    NoColorAvailable,
    #[error("need at least {min} players to start")]
    NotEnoughPlayers { min: usize },
}

/// What happened to a player who left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Lobby phase: the seat is gone and its color is reusable.
    Removed,
    /// Active game: the seat is kept so the player can resume.
    Disconnected,
    /// No such player.
    NotFound,
}

/// Per-instance session registry.
#[derive(Clone, Debug)]
pub struct Session {
    phase: Phase,
    host_connected: bool,
    min_players: usize,
    max_players: usize,
    seats: Vec<PlayerSeat>,
    next_player_id: u8,
}

impl Session {
    /// Create an empty lobby.
    #[must_use]
    pub fn new(min_players: usize, max_players: usize) -> Self {
        Self {
            phase: Phase::Lobby,
            host_connected: false,
            min_players,
            max_players,
            seats: Vec::new(),
            next_player_id: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Is the display client connected?
    #[must_use]
    pub fn host_connected(&self) -> bool {
        self.host_connected
    }

    /// Minimum roster size required to start.
    #[must_use]
    pub fn min_players(&self) -> usize {
        self.min_players
    }

    /// Maximum roster size.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// The roster, in join (and turn) order.
    #[must_use]
    pub fn seats(&self) -> &[PlayerSeat] {
        &self.seats
    }

    /// Look up a seat by player id.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&PlayerSeat> {
        self.seats.iter().find(|s| s.id == player)
    }

    /// Admit the display client. At most one may be connected.
    pub fn add_host(&mut self) -> Result<(), SessionError> {
        if self.host_connected {
            return Err(SessionError::HostAlreadyConnected);
        }
        self.host_connected = true;
        Ok(())
    }

    /// The display client disconnected. Its slot becomes reusable.
    pub fn host_disconnected(&mut self) {
        self.host_connected = false;
    }

    /// Admit a player while in the lobby.
    ///
    /// Assigns the first unused palette color. Blank names get a generated
    /// `Player N` fallback.
    pub fn add_player(&mut self, name: &str) -> Result<&PlayerSeat, SessionError> {
        if self.phase != Phase::Lobby {
            return Err(SessionError::GameInProgress);
        }
        if self.seats.len() >= self.max_players {
            return Err(SessionError::GameFull);
        }
        let color = self
            .next_available_color()
            .ok_or(SessionError::NoColorAvailable)?;

        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;

        let name = name.trim();
        let name = if name.is_empty() {
            format!("Player {}", self.seats.len() + 1)
        } else {
            name.to_string()
        };

        self.seats.push(PlayerSeat {
            id,
            name,
            color,
            connected: true,
        });

        Ok(self.seats.last().expect("seat just pushed"))
    }

    /// Check the start precondition (roster size against the minimum).
    pub fn can_start(&self) -> Result<(), SessionError> {
        if self.phase != Phase::Lobby {
            return Err(SessionError::GameInProgress);
        }
        if self.seats.len() < self.min_players {
            return Err(SessionError::NotEnoughPlayers {
                min: self.min_players,
            });
        }
        Ok(())
    }

    /// Transition lobby → playing.
    pub fn begin(&mut self) {
        debug_assert_eq!(self.phase, Phase::Lobby);
        self.phase = Phase::Playing;
    }

    /// Transition playing → finished (terminal).
    pub fn finish(&mut self) {
        self.phase = Phase::Finished;
    }

    /// A player left or dropped.
    ///
    /// In the lobby the seat is removed outright, freeing its color for the
    /// next joiner. During or after a game the seat is kept and flagged
    /// disconnected so the player can resume.
    pub fn remove_player(&mut self, player: PlayerId) -> LeaveOutcome {
        match self.phase {
            Phase::Lobby => {
                let before = self.seats.len();
                self.seats.retain(|s| s.id != player);
                if self.seats.len() < before {
                    LeaveOutcome::Removed
                } else {
                    LeaveOutcome::NotFound
                }
            }
            Phase::Playing | Phase::Finished => {
                match self.seats.iter_mut().find(|s| s.id == player) {
                    Some(seat) => {
                        seat.connected = false;
                        LeaveOutcome::Disconnected
                    }
                    None => LeaveOutcome::NotFound,
                }
            }
        }
    }

    /// A previously disconnected player reconnected.
    pub fn reconnect_player(&mut self, player: PlayerId) -> bool {
        match self.seats.iter_mut().find(|s| s.id == player) {
            Some(seat) => {
                seat.connected = true;
                true
            }
            None => false,
        }
    }

    /// Clear the roster and flags after the post-game observation window.
    /// Scheduling the delay is the caller's concern.
    pub fn teardown(&mut self) {
        self.seats.clear();
        self.host_connected = false;
        self.phase = Phase::Lobby;
        self.next_player_id = 0;
    }

    fn next_available_color(&self) -> Option<PlayerColor> {
        PlayerColor::PALETTE
            .into_iter()
            .find(|color| !self.seats.iter().any(|s| s.color == *color))
    }
}
