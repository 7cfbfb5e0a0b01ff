//! # tsunami-core
//!
//! The authoritative rules engine for a turn-based card game of building
//! under the threat of tsunamis. Players erect card stacks ("buildings"),
//! raid each other's unprotected ones, and ride out the three tsunami cards
//! seeded into the draw deck.
//!
//! ## Design Principles
//!
//! 1. **Server-Authoritative**: Clients submit intents; every rule check
//!    happens here. `GameState` is never serialized to clients; only the
//!    projections in `view` leave the server.
//!
//! 2. **Deterministic**: All randomness flows through a seedable `GameRng`,
//!    so a fixed seed replays an identical game.
//!
//! 3. **Transport-Agnostic**: The engine speaks `ParticipantId`s and
//!    returns addressed `Envelope`s; sockets, persistence, and scheduling
//!    belong to the caller.
//!
//! ## Modules
//!
//! - `core`: Typed ids, rule configuration, seeded RNG
//! - `cards`: Card types, colors, values
//! - `deck`: Deck construction, tsunami seeding, drawing
//! - `session`: Roster, colors, and the lobby/playing/finished phases
//! - `state`: The authoritative `GameState`, players, buildings
//! - `moves`: Move validation and atomic execution
//! - `tsunami`: Destruction resolution
//! - `score`: End detection, scoring, winner selection
//! - `view`: Client-safe projections of the state
//! - `engine`: The orchestrator tying it all together

pub mod cards;
pub mod core;
pub mod deck;
pub mod engine;
pub mod moves;
pub mod score;
pub mod session;
pub mod state;
pub mod tsunami;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    BuildingId, CardId, CardIdAlloc, GameConfig, GameRng, ParticipantId, PlayerId,
};

pub use crate::cards::{Color, DeckCard, RegularCard, TsunamiCard, FOUNDATION_VALUE, ROOF_VALUE};

pub use crate::deck::DrawResult;

pub use crate::session::{
    LeaveOutcome, Phase, PlayerColor, PlayerSeat, Session, SessionError,
};

pub use crate::state::{Building, GameState, PlayerState, TurnChange, TurnState};

pub use crate::moves::{Move, MoveCards, MoveError, MoveOutcome, TsunamiEvent, TurnSummary};

pub use crate::tsunami::BuildingDamage;

pub use crate::score::PlayerScore;

pub use crate::view::{
    BuildingView, PrivateHand, PublicGameState, PublicPlayerState, SessionSnapshot,
};

pub use crate::engine::{Audience, Envelope, EngineError, GameEngine, Notification, Role};
