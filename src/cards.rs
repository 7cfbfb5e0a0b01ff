//! Card value types.
//!
//! Two card families exist: regular cards (a color and a value 0-6) that
//! players hold and build with, and tsunami cards (a value 0-5) that live
//! only in the deck and trigger destruction when drawn. Hands are typed as
//! `Vec<RegularCard>`, so a tsunami card can never enter a hand.
//!
//! Value 0 is a "foundation" (starts a building, temporary protection) and
//! value 6 is a "roof" (caps a building, permanent protection); 1-5 are
//! plain floors.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Value of a foundation card.
pub const FOUNDATION_VALUE: u8 = 0;

/// Value of a roof card.
pub const ROOF_VALUE: u8 = 6;

/// The four card colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// All card colors, in deck construction order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        };
        write!(f, "{name}")
    }
}

/// A regular card: the only kind that can sit in a hand or a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegularCard {
    pub id: CardId,
    pub color: Color,
    /// 0 = foundation, 1-5 = plain, 6 = roof.
    pub value: u8,
}

impl RegularCard {
    /// Create a new regular card.
    #[must_use]
    pub const fn new(id: CardId, color: Color, value: u8) -> Self {
        Self { id, color, value }
    }

    /// Is this a foundation card (value 0)?
    #[must_use]
    pub fn is_foundation(&self) -> bool {
        self.value == FOUNDATION_VALUE
    }

    /// Is this a roof card (value 6)?
    #[must_use]
    pub fn is_roof(&self) -> bool {
        self.value == ROOF_VALUE
    }
}

impl std::fmt::Display for RegularCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_foundation() {
            write!(f, "{} Foundation", self.color)
        } else if self.is_roof() {
            write!(f, "{} Roof", self.color)
        } else {
            write!(f, "{} {}", self.color, self.value)
        }
    }
}

/// A tsunami card. Never held in a hand; drawing one halts the draw and
/// destroys every card below its value in unprotected buildings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TsunamiCard {
    pub id: CardId,
    /// 0-5. A value-0 tsunami destroys nothing but still halts the draw.
    pub value: u8,
}

impl TsunamiCard {
    /// Create a new tsunami card.
    #[must_use]
    pub const fn new(id: CardId, value: u8) -> Self {
        Self { id, value }
    }
}

impl std::fmt::Display for TsunamiCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tsunami {}", self.value)
    }
}

/// A card as it sits in the deck or discard pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeckCard {
    Regular(RegularCard),
    Tsunami(TsunamiCard),
}

impl DeckCard {
    /// The card's identity.
    #[must_use]
    pub fn id(&self) -> CardId {
        match self {
            DeckCard::Regular(c) => c.id,
            DeckCard::Tsunami(c) => c.id,
        }
    }

    /// The card's value.
    #[must_use]
    pub fn value(&self) -> u8 {
        match self {
            DeckCard::Regular(c) => c.value,
            DeckCard::Tsunami(c) => c.value,
        }
    }

    /// Is this a tsunami card?
    #[must_use]
    pub fn is_tsunami(&self) -> bool {
        matches!(self, DeckCard::Tsunami(_))
    }
}

impl std::fmt::Display for DeckCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckCard::Regular(c) => c.fmt(f),
            DeckCard::Tsunami(c) => c.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_kinds() {
        let foundation = RegularCard::new(CardId::new(0), Color::Red, 0);
        let plain = RegularCard::new(CardId::new(1), Color::Blue, 3);
        let roof = RegularCard::new(CardId::new(2), Color::Green, 6);

        assert!(foundation.is_foundation());
        assert!(!foundation.is_roof());
        assert!(!plain.is_foundation());
        assert!(!plain.is_roof());
        assert!(roof.is_roof());
    }

    #[test]
    fn test_display_names() {
        let foundation = RegularCard::new(CardId::new(0), Color::Red, 0);
        let plain = RegularCard::new(CardId::new(1), Color::Blue, 3);
        let roof = RegularCard::new(CardId::new(2), Color::Green, 6);
        let tsunami = TsunamiCard::new(CardId::new(3), 4);

        assert_eq!(foundation.to_string(), "red Foundation");
        assert_eq!(plain.to_string(), "blue 3");
        assert_eq!(roof.to_string(), "green Roof");
        assert_eq!(tsunami.to_string(), "Tsunami 4");
    }

    #[test]
    fn test_deck_card_accessors() {
        let regular = DeckCard::Regular(RegularCard::new(CardId::new(7), Color::Yellow, 2));
        let tsunami = DeckCard::Tsunami(TsunamiCard::new(CardId::new(8), 5));

        assert_eq!(regular.id(), CardId::new(7));
        assert_eq!(regular.value(), 2);
        assert!(!regular.is_tsunami());

        assert_eq!(tsunami.id(), CardId::new(8));
        assert_eq!(tsunami.value(), 5);
        assert!(tsunami.is_tsunami());
    }

    #[test]
    fn test_deck_card_serialization() {
        let card = DeckCard::Tsunami(TsunamiCard::new(CardId::new(1), 3));
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"type\":\"tsunami\""));

        let back: DeckCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
