//! Move execution.
//!
//! Every function here assumes the move already passed validation; lookups
//! that validation proved use `expect` with the precondition named. The
//! mutation per move is applied in one pass with no early exit, so a
//! validated move always lands fully.

use tracing::debug;

use super::{Move, MoveOutcome, TsunamiEvent, TurnSummary};
use crate::cards::DeckCard;
use crate::core::{BuildingId, CardId, GameConfig, PlayerId};
use crate::deck;
use crate::state::GameState;
use crate::tsunami;

/// Apply a validated move to the state.
pub(super) fn execute(
    state: &mut GameState,
    player: PlayerId,
    mv: &Move,
    config: &GameConfig,
) -> MoveOutcome {
    match mv {
        Move::Build { building, cards } => execute_build(state, player, *building, cards),
        Move::Reinforce { building, cards } => execute_reinforce(state, player, *building, cards),
        Move::Attack {
            target_player,
            target_building,
            card,
        } => execute_attack(state, player, *target_player, *target_building, *card),
        Move::EndTurn => execute_end_turn(state, player, config),
    }
}

fn execute_build(
    state: &mut GameState,
    player: PlayerId,
    building: BuildingId,
    cards: &[CardId],
) -> MoveOutcome {
    let acting = state.player_mut(player).expect("validated: player exists");
    let placed = acting.take_cards(cards);

    // A lone foundation grants protection until end of turn.
    let protected = placed.len() == 1 && placed[0].is_foundation();
    let card_count = placed.len();

    let slot = acting
        .building_mut(building)
        .expect("validated: building exists");
    slot.cards.extend(placed);
    slot.modified_this_turn = true;
    if protected {
        slot.protected = true;
    }

    debug!(%player, %building, card_count, protected, "build");
    MoveOutcome::Built {
        player,
        building,
        card_count,
        protected,
    }
}

fn execute_reinforce(
    state: &mut GameState,
    player: PlayerId,
    building: BuildingId,
    cards: &[CardId],
) -> MoveOutcome {
    let acting = state.player_mut(player).expect("validated: player exists");
    let placed = acting.take_cards(cards);
    let card_count = placed.len();

    let slot = acting
        .building_mut(building)
        .expect("validated: building exists");
    slot.cards.extend(placed);
    slot.modified_this_turn = true;

    // Topping out with a roof makes the protection permanent.
    if slot.has_roof() {
        slot.protected = true;
    }
    let protected = slot.protected;

    debug!(%player, %building, card_count, protected, "reinforce");
    MoveOutcome::Reinforced {
        player,
        building,
        card_count,
        protected,
    }
}

fn execute_attack(
    state: &mut GameState,
    player: PlayerId,
    target_player: PlayerId,
    target_building: BuildingId,
    card: CardId,
) -> MoveOutcome {
    let acting = state.player_mut(player).expect("validated: player exists");
    acting.attacks_this_turn += 1;
    let mut taken = acting.take_cards(&[card]);
    let attack_card = taken.pop().expect("validated: card in hand");

    let target = state
        .player_mut(target_player)
        .expect("validated: target exists");
    let slot = target
        .building_mut(target_building)
        .expect("validated: building exists");
    let defeated_card = slot.cards.pop().expect("validated: building not empty");

    // Both combatants leave play for good.
    state.discard.push(DeckCard::Regular(attack_card));
    state.discard.push(DeckCard::Regular(defeated_card));

    debug!(%player, %target_player, %target_building, "attack");
    MoveOutcome::Attacked {
        player,
        target_player,
        target_building,
        attack_card,
        defeated_card,
    }
}

/// End-of-turn sequence: reset building flags, draw (with the tsunami
/// halt), resolve any surfaced tsunami, mark idleness, advance the turn.
fn execute_end_turn(state: &mut GameState, player: PlayerId, config: &GameConfig) -> MoveOutcome {
    let (hand_len, attacks) = {
        let acting = state.player_mut(player).expect("validated: player exists");
        for slot in &mut acting.buildings {
            slot.end_turn_reset();
        }
        (acting.hand.len(), acting.attacks_this_turn)
    };

    // One card plus one per attack; a spent hand refills to the initial
    // size instead. The draw stops at the card that reaches the hand cap,
    // but every end-turn attempts at least one draw, so the deck keeps
    // shrinking and a waiting tsunami always surfaces.
    let requested = if hand_len == 0 {
        config.initial_hand_size
    } else {
        1 + attacks as usize
    };
    let room = config.max_hand_size.saturating_sub(hand_len).max(1);
    let count = requested.min(room);

    let draw = deck::draw_cards(&mut state.deck, count);

    {
        let acting = state.player_mut(player).expect("validated: player exists");
        acting.hand.extend(draw.drawn.iter().copied());
        acting.attacks_this_turn = 0;
    }

    let tsunami = draw.tsunami.map(|card| {
        debug!(value = card.value, "tsunami surfaced");
        state.discard.push(DeckCard::Tsunami(card));
        TsunamiEvent {
            value: card.value,
            destroyed: tsunami::resolve(state, card.value),
        }
    });

    // A player who gets nothing from an empty deck is done for the game.
    let went_idle = state.deck.is_empty() && draw.drawn.is_empty();
    if went_idle {
        state
            .player_mut(player)
            .expect("validated: player exists")
            .is_idle = true;
    }

    let turn = state.advance_turn();

    debug!(
        %player,
        drawn = draw.count(),
        went_idle,
        next = %turn.current_player,
        "end turn"
    );
    MoveOutcome::TurnEnded(TurnSummary {
        player,
        drawn: draw.drawn,
        tsunami,
        went_idle,
        turn,
    })
}
