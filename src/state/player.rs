//! Per-player game data: hand, buildings, score, turn counters.

use serde::{Deserialize, Serialize};

use super::building::Building;
use crate::cards::RegularCard;
use crate::core::{BuildingId, CardId, PlayerId};

/// A player's in-game state. Roster data (name, color, connection) lives on
/// the session seat, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    /// Private hand. Tsunami cards never enter it, by type.
    pub hand: Vec<RegularCard>,
    /// Fixed building slots, indexed by `BuildingId`.
    pub buildings: Vec<Building>,
    pub score: u32,
    /// Set once the player drew zero cards from an empty deck.
    pub is_idle: bool,
    /// Successful attacks this turn; feeds the end-turn draw count.
    pub attacks_this_turn: u32,
}

impl PlayerState {
    /// Create a player with empty hand and `building_count` empty slots.
    #[must_use]
    pub fn new(id: PlayerId, building_count: usize) -> Self {
        Self {
            id,
            hand: Vec::new(),
            buildings: (0..building_count)
                .map(|i| Building::new(BuildingId::new(i as u8)))
                .collect(),
            score: 0,
            is_idle: false,
            attacks_this_turn: 0,
        }
    }

    /// Look up a building slot.
    #[must_use]
    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.index())
    }

    /// Look up a building slot mutably.
    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(id.index())
    }

    /// Find a hand card by id.
    #[must_use]
    pub fn hand_card(&self, id: CardId) -> Option<&RegularCard> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Are all `ids` present in the hand, with no duplicates among them?
    #[must_use]
    pub fn holds_all(&self, ids: &[CardId]) -> bool {
        ids.iter().all(|&id| self.hand_card(id).is_some())
            && ids
                .iter()
                .enumerate()
                .all(|(i, id)| !ids[..i].contains(id))
    }

    /// Remove the given cards from the hand, returning them in `ids` order.
    ///
    /// Callers must have checked `holds_all` first; missing ids are skipped.
    pub fn take_cards(&mut self, ids: &[CardId]) -> Vec<RegularCard> {
        let mut taken = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(pos) = self.hand.iter().position(|c| c.id == id) {
                taken.push(self.hand.remove(pos));
            }
        }
        taken
    }

    /// Total cards standing across all buildings.
    #[must_use]
    pub fn building_card_count(&self) -> u32 {
        self.buildings.iter().map(|b| b.cards.len() as u32).sum()
    }
}
