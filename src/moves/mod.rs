//! Move representation, validation, and execution.
//!
//! The four move kinds form a tagged union; the validator and executor each
//! match exhaustively over it. Validation is pure and runs to completion
//! before any mutation; execution is a single atomic mutation step that
//! only ever runs on a validated move. `apply` is the public entry point
//! combining both, so a move can never be half-applied.

mod execute;
mod validate;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::RegularCard;
use crate::core::{BuildingId, CardId, GameConfig, PlayerId};
use crate::state::{GameState, TurnChange};
use crate::tsunami::BuildingDamage;

pub use validate::validate;

/// Cards referenced by a move. Builds and reinforcements place one to a
/// few cards; the inline capacity covers the common case.
pub type MoveCards = SmallVec<[CardId; 3]>;

/// A player move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Move {
    /// Start a building on an empty slot: either a single foundation card,
    /// or several cards of one shared value.
    Build {
        building: BuildingId,
        cards: MoveCards,
    },
    /// Stack cards of one value, strictly above the current top, onto an
    /// own non-empty building not yet modified this turn.
    Reinforce {
        building: BuildingId,
        cards: MoveCards,
    },
    /// Remove the top card of an opponent's unprotected building with a
    /// color-matched card of equal or higher value.
    Attack {
        target_player: PlayerId,
        target_building: BuildingId,
        card: CardId,
    },
    /// Finish the turn: reset flags, draw, maybe ride out a tsunami.
    EndTurn,
}

/// Named rejection reasons. Returned to the requester only; the state is
/// untouched whenever one of these comes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("not your turn")]
    NotYourTurn,
    #[error("player not found")]
    UnknownPlayer,
    #[error("target player not found")]
    TargetPlayerNotFound,
    #[error("building does not exist")]
    UnknownBuilding,
    #[error("building is not empty")]
    BuildingNotEmpty,
    #[error("building is empty")]
    BuildingEmpty,
    #[error("building already modified this turn")]
    BuildingAlreadyModified,
    #[error("building is protected")]
    BuildingProtected,
    #[error("card not in hand")]
    CardNotInHand,
    #[error("a move must include at least one card")]
    NoCards,
    #[error("a single placed card must be a foundation")]
    SingleCardNotFoundation,
    #[error("all placed cards must share the same value")]
    MixedValues,
    #[error("reinforcement must exceed the top card value")]
    ReinforcementTooLow,
    #[error("cannot attack your own building")]
    CannotAttackSelf,
    #[error("attack card must match the building color")]
    ColorMismatch,
    #[error("attack card value is too low")]
    AttackTooLow,
}

/// A tsunami that surfaced during an end-turn draw, with its damage report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsunamiEvent {
    pub value: u8,
    pub destroyed: Vec<BuildingDamage>,
}

/// Everything that happened during one end-turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    pub player: PlayerId,
    /// Cards drawn into the player's hand. Private: broadcast the count,
    /// never the contents.
    pub drawn: Vec<RegularCard>,
    pub tsunami: Option<TsunamiEvent>,
    /// The player drew nothing from an empty deck and sat out.
    pub went_idle: bool,
    pub turn: TurnChange,
}

/// Result of a successfully applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Built {
        player: PlayerId,
        building: BuildingId,
        card_count: usize,
        protected: bool,
    },
    Reinforced {
        player: PlayerId,
        building: BuildingId,
        card_count: usize,
        protected: bool,
    },
    Attacked {
        player: PlayerId,
        target_player: PlayerId,
        target_building: BuildingId,
        attack_card: RegularCard,
        defeated_card: RegularCard,
    },
    TurnEnded(TurnSummary),
}

/// Validate and, on success, atomically execute a move.
///
/// On `Err` the state is untouched; on `Ok` the full mutation has been
/// applied, including any tsunami resolution and the turn advance.
pub fn apply(
    state: &mut GameState,
    player: PlayerId,
    mv: &Move,
    config: &GameConfig,
) -> Result<MoveOutcome, MoveError> {
    validate(state, player, mv)?;
    Ok(execute::execute(state, player, mv, config))
}
