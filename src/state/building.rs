//! A single building slot.

use serde::{Deserialize, Serialize};

use crate::cards::RegularCard;
use crate::core::BuildingId;

/// One of the six per-player card-stack slots.
///
/// Only the top card participates in reinforce/attack comparisons. An empty
/// building can only receive a build move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    /// Stack, bottom-to-top.
    pub cards: Vec<RegularCard>,
    /// Immune to attacks and tsunamis while set. Foundation protection is
    /// temporary (cleared at end-turn); roof protection is permanent.
    pub protected: bool,
    /// Set by build/reinforce; blocks further reinforcement until end-turn.
    pub modified_this_turn: bool,
}

impl Building {
    /// Create an empty slot.
    #[must_use]
    pub fn new(id: BuildingId) -> Self {
        Self {
            id,
            cards: Vec::new(),
            protected: false,
            modified_this_turn: false,
        }
    }

    /// Is the slot empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&RegularCard> {
        self.cards.last()
    }

    /// Does the stack contain a roof card?
    #[must_use]
    pub fn has_roof(&self) -> bool {
        self.cards.iter().any(RegularCard::is_roof)
    }

    /// End-of-turn flag reset: `modified_this_turn` always clears;
    /// protection clears unless a roof makes it permanent.
    pub fn end_turn_reset(&mut self) {
        self.modified_this_turn = false;
        if self.protected && !self.has_roof() {
            self.protected = false;
        }
    }
}
