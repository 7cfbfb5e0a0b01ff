//! Tsunami resolution.
//!
//! When a tsunami card of value `v` surfaces during a draw, every
//! unprotected building of every player loses its cards of value below `v`.
//! Kept cards stay in their original relative order; protected buildings
//! are immune regardless of contents. Resolution is atomic across the whole
//! player set: it either applies everywhere or (on value 0) nowhere.

use serde::{Deserialize, Serialize};

use crate::cards::{DeckCard, RegularCard};
use crate::core::{BuildingId, PlayerId};
use crate::state::GameState;

/// Cards destroyed in one building, for the broadcast collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingDamage {
    pub player: PlayerId,
    pub building: BuildingId,
    pub cards: Vec<RegularCard>,
}

/// Apply a tsunami of the given value to every player's buildings.
///
/// Destroyed cards move to the shared discard pile. Returns one damage
/// entry per building that actually lost cards.
pub fn resolve(state: &mut GameState, value: u8) -> Vec<BuildingDamage> {
    let mut damage = Vec::new();
    let GameState {
        players, discard, ..
    } = state;

    for player in players.iter_mut() {
        for building in &mut player.buildings {
            if building.protected || building.is_empty() {
                continue;
            }

            let (destroyed, kept): (Vec<RegularCard>, Vec<RegularCard>) = building
                .cards
                .drain(..)
                .partition(|card| card.value < value);

            building.cards = kept;

            if !destroyed.is_empty() {
                discard.extend(destroyed.iter().copied().map(DeckCard::Regular));
                damage.push(BuildingDamage {
                    player: player.id,
                    building: building.id,
                    cards: destroyed,
                });
            }
        }
    }

    damage
}
