//! Deck construction and tsunami placement.
//!
//! The deck is an ordered pile drawn from the front; index `len - 1` is the
//! bottom. Construction is deterministic given an RNG seed:
//!
//! 1. `create_deck` lays out 32 regular cards per player.
//! 2. The caller shuffles and deals initial hands. Tsunami cards are
//!    inserted *after* dealing, so initial hands are regular by
//!    construction.
//! 3. `insert_tsunami_cards` seeds three tsunami cards: one at the very
//!    bottom (the game always ends under a wave), the other two at random
//!    positions past the first quarter, so the opening game stays
//!    tsunami-free but the rest of the deck is unpredictable.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::{Color, DeckCard, RegularCard, TsunamiCard, ROOF_VALUE};
use crate::core::{CardIdAlloc, GameRng};

/// Distinct tsunami values available in the pool (one card per value).
pub const TSUNAMI_VALUE_POOL: usize = 6;

/// Build the regular-card deck for `player_count` players.
///
/// Per player, per color: two foundations (value 0), one card each of
/// values 1-5, and one roof (value 6), for 32 cards per player in total.
#[must_use]
pub fn create_deck(player_count: usize, ids: &mut CardIdAlloc) -> Vec<RegularCard> {
    let mut deck = Vec::with_capacity(player_count * 32);

    for _ in 0..player_count {
        for color in Color::ALL {
            deck.push(RegularCard::new(ids.alloc(), color, 0));
            deck.push(RegularCard::new(ids.alloc(), color, 0));

            for value in 1..ROOF_VALUE {
                deck.push(RegularCard::new(ids.alloc(), color, value));
            }

            deck.push(RegularCard::new(ids.alloc(), color, ROOF_VALUE));
        }
    }

    deck
}

/// Select 3 distinct tsunami values uniformly without replacement from the
/// pool {0, 1, 2, 3, 4, 5}.
#[must_use]
pub fn select_tsunami_values(rng: &mut GameRng) -> [u8; 3] {
    let picked = rng.sample_distinct(TSUNAMI_VALUE_POOL, 3);
    [picked[0] as u8, picked[1] as u8, picked[2] as u8]
}

/// Seed tsunami cards into a dealt deck.
///
/// The first selected value goes to the very bottom (last draw position).
/// The remaining two are inserted at independently-uniform positions
/// strictly after the first-quarter boundary (`len / 4`, computed on the
/// deck as passed in) and strictly before the bottom card. Positions are
/// applied highest-first so the second insertion's index is still valid.
///
/// For degenerate decks the lower bound of the random range is clamped so
/// the range stays non-empty; real player counts never hit the clamp.
#[must_use]
pub fn insert_tsunami_cards(
    deck: Vec<RegularCard>,
    values: [u8; 3],
    ids: &mut CardIdAlloc,
    rng: &mut GameRng,
) -> Vec<DeckCard> {
    let mut deck: Vec<DeckCard> = deck.into_iter().map(DeckCard::Regular).collect();
    let quarter = deck.len() / 4;

    deck.push(DeckCard::Tsunami(TsunamiCard::new(ids.alloc(), values[0])));

    // Valid insertion indices: strictly past the quarter boundary, strictly
    // before the bottom card (index len - 1 inserts just above it).
    let lo = (quarter + 1).min(deck.len() - 1);
    let mut positions = [
        rng.gen_range_usize(lo..deck.len()),
        rng.gen_range_usize(lo..deck.len()),
    ];
    positions.sort_unstable();

    deck.insert(
        positions[1],
        DeckCard::Tsunami(TsunamiCard::new(ids.alloc(), values[1])),
    );
    deck.insert(
        positions[0],
        DeckCard::Tsunami(TsunamiCard::new(ids.alloc(), values[2])),
    );

    deck
}

/// Scan a deck for tsunami positions (distance from the draw end).
#[must_use]
pub fn tsunami_positions(deck: &[DeckCard]) -> Vec<usize> {
    deck.iter()
        .enumerate()
        .filter(|(_, card)| card.is_tsunami())
        .map(|(i, _)| i)
        .collect()
}

/// Cards remaining until the next tsunami surfaces, or `None` if no tsunami
/// is left in the deck.
#[must_use]
pub fn cards_until_next_tsunami<'a>(
    mut deck: impl Iterator<Item = &'a DeckCard>,
) -> Option<usize> {
    deck.position(DeckCard::is_tsunami)
}

/// Result of one draw attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    /// Regular cards drawn, in draw order. Never contains a tsunami card.
    pub drawn: Vec<RegularCard>,
    /// Tsunami card that surfaced mid-draw and halted it, if any.
    pub tsunami: Option<TsunamiCard>,
}

impl DrawResult {
    /// Number of regular cards actually drawn.
    #[must_use]
    pub fn count(&self) -> usize {
        self.drawn.len()
    }
}

/// Draw up to `count` regular cards from the front of the deck.
///
/// Stops early when the deck runs out, or when a tsunami card surfaces:
/// the tsunami is removed from the deck and reported, never included in
/// `drawn`, and no further cards are drawn past it.
pub fn draw_cards(deck: &mut VecDeque<DeckCard>, count: usize) -> DrawResult {
    let mut drawn = Vec::new();
    let mut tsunami = None;

    while drawn.len() < count {
        match deck.pop_front() {
            Some(DeckCard::Regular(card)) => drawn.push(card),
            Some(DeckCard::Tsunami(card)) => {
                tsunami = Some(card);
                break;
            }
            None => break,
        }
    }

    DrawResult { drawn, tsunami }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;

    fn full_deck(players: usize, seed: u64) -> Vec<DeckCard> {
        let mut ids = CardIdAlloc::new();
        let mut rng = GameRng::new(seed);
        let mut deck = create_deck(players, &mut ids);
        rng.shuffle(&mut deck);
        let values = select_tsunami_values(&mut rng);
        insert_tsunami_cards(deck, values, &mut ids, &mut rng)
    }

    #[test]
    fn test_deck_composition() {
        for players in 2..=5 {
            let mut ids = CardIdAlloc::new();
            let deck = create_deck(players, &mut ids);

            assert_eq!(deck.len(), 32 * players);

            let foundations = deck.iter().filter(|c| c.is_foundation()).count();
            let roofs = deck.iter().filter(|c| c.is_roof()).count();
            assert_eq!(foundations, 8 * players);
            assert_eq!(roofs, 4 * players);

            for value in 1..6 {
                let count = deck.iter().filter(|c| c.value == value).count();
                assert_eq!(count, 4 * players, "value {value}");
            }

            for color in Color::ALL {
                let count = deck.iter().filter(|c| c.color == color).count();
                assert_eq!(count, 8 * players, "color {color}");
            }
        }
    }

    #[test]
    fn test_deck_card_ids_unique() {
        let deck = full_deck(3, 42);
        let mut ids: Vec<_> = deck.iter().map(|c| c.id()).collect();
        ids.sort_unstable_by_key(|id| id.0);
        ids.dedup();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn test_select_tsunami_values_distinct() {
        let mut rng = GameRng::new(9);
        for _ in 0..100 {
            let mut values = select_tsunami_values(&mut rng);
            assert!(values.iter().all(|&v| v < 6));
            values.sort_unstable();
            assert!(values[0] < values[1] && values[1] < values[2]);
        }
    }

    #[test]
    fn test_tsunami_placement() {
        for seed in 0..50 {
            let mut ids = CardIdAlloc::new();
            let mut rng = GameRng::new(seed);
            let mut deck = create_deck(2, &mut ids);
            rng.shuffle(&mut deck);
            let original_len = deck.len();

            let values = select_tsunami_values(&mut rng);
            let deck = insert_tsunami_cards(deck, values, &mut ids, &mut rng);

            assert_eq!(deck.len(), original_len + 3);

            let positions = tsunami_positions(&deck);
            assert_eq!(positions.len(), 3);

            // First selected value sits at the very bottom.
            let bottom = deck.last().unwrap();
            assert!(bottom.is_tsunami());
            assert_eq!(bottom.value(), values[0]);

            // The other two lie strictly between the quarter boundary and
            // the bottom.
            let quarter = original_len / 4;
            for &pos in &positions[..2] {
                assert!(pos > quarter, "seed {seed}: pos {pos} <= quarter {quarter}");
                assert!(pos < deck.len() - 1, "seed {seed}: pos {pos} at bottom");
            }
        }
    }

    #[test]
    fn test_tsunami_placement_tiny_deck() {
        // Clamp path: a deck so small the quarter boundary math degenerates.
        let mut ids = CardIdAlloc::new();
        let mut rng = GameRng::new(3);
        let deck = vec![
            RegularCard::new(ids.alloc(), Color::Red, 1),
            RegularCard::new(ids.alloc(), Color::Red, 2),
        ];

        let deck = insert_tsunami_cards(deck, [0, 1, 2], &mut ids, &mut rng);
        assert_eq!(tsunami_positions(&deck).len(), 3);
        assert!(deck.last().unwrap().is_tsunami());
    }

    #[test]
    fn test_cards_until_next_tsunami() {
        let deck = full_deck(2, 11);
        let positions = tsunami_positions(&deck);
        assert_eq!(cards_until_next_tsunami(deck.iter()), Some(positions[0]));

        let regular_only: Vec<DeckCard> = deck
            .iter()
            .copied()
            .filter(|c| !c.is_tsunami())
            .collect();
        assert_eq!(cards_until_next_tsunami(regular_only.iter()), None);
    }

    #[test]
    fn test_draw_cards_plain() {
        let mut deck: VecDeque<DeckCard> = (0..5)
            .map(|i| DeckCard::Regular(RegularCard::new(CardId::new(i), Color::Red, 1)))
            .collect();

        let result = draw_cards(&mut deck, 3);
        assert_eq!(result.count(), 3);
        assert!(result.tsunami.is_none());
        assert_eq!(deck.len(), 2);
        assert_eq!(result.drawn[0].id, CardId::new(0));
    }

    #[test]
    fn test_draw_cards_exhausts_deck() {
        let mut deck: VecDeque<DeckCard> = (0..2)
            .map(|i| DeckCard::Regular(RegularCard::new(CardId::new(i), Color::Red, 1)))
            .collect();

        let result = draw_cards(&mut deck, 5);
        assert_eq!(result.count(), 2);
        assert!(result.tsunami.is_none());
        assert!(deck.is_empty());
    }

    #[test]
    fn test_draw_halts_on_tsunami() {
        let mut deck: VecDeque<DeckCard> = VecDeque::from(vec![
            DeckCard::Regular(RegularCard::new(CardId::new(0), Color::Red, 1)),
            DeckCard::Tsunami(TsunamiCard::new(CardId::new(1), 4)),
            DeckCard::Regular(RegularCard::new(CardId::new(2), Color::Blue, 2)),
        ]);

        let result = draw_cards(&mut deck, 3);
        assert_eq!(result.count(), 1);
        assert_eq!(result.tsunami, Some(TsunamiCard::new(CardId::new(1), 4)));
        // The card past the tsunami stays in the deck.
        assert_eq!(deck.len(), 1);
        assert!(result.drawn.iter().all(|c| c.id != CardId::new(1)));
    }
}
