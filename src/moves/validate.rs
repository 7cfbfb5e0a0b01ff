//! Pure move validation.
//!
//! Every check reads the state and never writes it. The turn-holder check
//! runs first for all move kinds; the remaining checks follow the order a
//! player would reason about them (does the slot exist, do I hold the
//! cards, do the values work out).

use super::{Move, MoveError};
use crate::core::{BuildingId, CardId, PlayerId};
use crate::state::{GameState, PlayerState};

/// Check a move against the current state without mutating anything.
pub fn validate(state: &GameState, player: PlayerId, mv: &Move) -> Result<(), MoveError> {
    let acting = state.player(player).ok_or(MoveError::UnknownPlayer)?;
    if !state.is_current(player) {
        return Err(MoveError::NotYourTurn);
    }

    match mv {
        Move::Build { building, cards } => validate_build(acting, *building, cards),
        Move::Reinforce { building, cards } => validate_reinforce(acting, *building, cards),
        Move::Attack {
            target_player,
            target_building,
            card,
        } => validate_attack(state, acting, *target_player, *target_building, *card),
        Move::EndTurn => Ok(()),
    }
}

/// Resolve each listed card to its value, requiring all of them to be held
/// (with no id listed twice) and to share a single value.
fn placed_values(acting: &PlayerState, cards: &[CardId]) -> Result<Vec<u8>, MoveError> {
    if cards.is_empty() {
        return Err(MoveError::NoCards);
    }
    if !acting.holds_all(cards) {
        return Err(MoveError::CardNotInHand);
    }

    let values: Vec<u8> = cards
        .iter()
        .map(|&id| {
            acting
                .hand_card(id)
                .map(|c| c.value)
                .ok_or(MoveError::CardNotInHand)
        })
        .collect::<Result<_, _>>()?;

    if values.iter().any(|&v| v != values[0]) {
        return Err(MoveError::MixedValues);
    }

    Ok(values)
}

fn validate_build(
    acting: &PlayerState,
    building: BuildingId,
    cards: &[CardId],
) -> Result<(), MoveError> {
    let slot = acting.building(building).ok_or(MoveError::UnknownBuilding)?;
    if !slot.is_empty() {
        return Err(MoveError::BuildingNotEmpty);
    }

    let values = placed_values(acting, cards)?;

    // A lone card must be a foundation; any shared-value group is fine.
    if values.len() == 1 && values[0] != crate::cards::FOUNDATION_VALUE {
        return Err(MoveError::SingleCardNotFoundation);
    }

    Ok(())
}

fn validate_reinforce(
    acting: &PlayerState,
    building: BuildingId,
    cards: &[CardId],
) -> Result<(), MoveError> {
    let slot = acting.building(building).ok_or(MoveError::UnknownBuilding)?;
    let top = slot.top().ok_or(MoveError::BuildingEmpty)?;
    if slot.modified_this_turn {
        return Err(MoveError::BuildingAlreadyModified);
    }

    let values = placed_values(acting, cards)?;

    // Strictly above the top card; equal is not enough.
    if values[0] <= top.value {
        return Err(MoveError::ReinforcementTooLow);
    }

    Ok(())
}

fn validate_attack(
    state: &GameState,
    acting: &PlayerState,
    target_player: PlayerId,
    target_building: BuildingId,
    card: CardId,
) -> Result<(), MoveError> {
    if target_player == acting.id {
        return Err(MoveError::CannotAttackSelf);
    }
    let target = state
        .player(target_player)
        .ok_or(MoveError::TargetPlayerNotFound)?;
    let slot = target
        .building(target_building)
        .ok_or(MoveError::UnknownBuilding)?;
    let top = slot.top().ok_or(MoveError::BuildingEmpty)?;
    if slot.protected {
        return Err(MoveError::BuildingProtected);
    }

    let attack = acting.hand_card(card).ok_or(MoveError::CardNotInHand)?;
    if attack.color != top.color {
        return Err(MoveError::ColorMismatch);
    }
    // Equal value suffices; the attacker wins ties.
    if attack.value < top.value {
        return Err(MoveError::AttackTooLow);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, RegularCard};
    use crate::core::{GameConfig, GameRng};
    use smallvec::smallvec;

    fn two_player_state() -> GameState {
        let roster = [PlayerId::new(0), PlayerId::new(1)];
        GameState::start(&roster, &GameConfig::default(), &mut GameRng::new(0))
    }

    fn give(state: &mut GameState, player: u8, id: u32, color: Color, value: u8) -> CardId {
        let card_id = CardId::new(id);
        state.players[player as usize]
            .hand
            .push(RegularCard::new(card_id, color, value));
        card_id
    }

    #[test]
    fn test_rejects_out_of_turn() {
        let state = two_player_state();
        let result = validate(&state, PlayerId::new(1), &Move::EndTurn);
        assert_eq!(result, Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_rejects_unknown_player() {
        let state = two_player_state();
        let result = validate(&state, PlayerId::new(9), &Move::EndTurn);
        assert_eq!(result, Err(MoveError::UnknownPlayer));
    }

    #[test]
    fn test_build_single_foundation_ok() {
        let mut state = two_player_state();
        let id = give(&mut state, 0, 500, Color::Red, 0);

        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![id],
        };
        assert_eq!(validate(&state, PlayerId::new(0), &mv), Ok(()));
    }

    #[test]
    fn test_build_single_non_foundation_rejected() {
        let mut state = two_player_state();
        let id = give(&mut state, 0, 500, Color::Red, 3);

        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![id],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::SingleCardNotFoundation)
        );
    }

    #[test]
    fn test_build_mixed_values_rejected() {
        let mut state = two_player_state();
        let a = give(&mut state, 0, 500, Color::Red, 2);
        let b = give(&mut state, 0, 501, Color::Blue, 3);

        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![a, b],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::MixedValues)
        );
    }

    #[test]
    fn test_build_same_value_pair_ok() {
        let mut state = two_player_state();
        let a = give(&mut state, 0, 500, Color::Red, 3);
        let b = give(&mut state, 0, 501, Color::Blue, 3);

        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![a, b],
        };
        assert_eq!(validate(&state, PlayerId::new(0), &mv), Ok(()));
    }

    #[test]
    fn test_build_on_occupied_slot_rejected() {
        let mut state = two_player_state();
        let id = give(&mut state, 0, 500, Color::Red, 0);
        state.players[0].buildings[0]
            .cards
            .push(RegularCard::new(CardId::new(600), Color::Green, 0));

        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![id],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::BuildingNotEmpty)
        );
    }

    #[test]
    fn test_build_duplicate_card_id_rejected() {
        let mut state = two_player_state();
        let id = give(&mut state, 0, 500, Color::Red, 2);

        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![id, id],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::CardNotInHand)
        );
    }

    #[test]
    fn test_build_no_cards_rejected() {
        let state = two_player_state();
        let mv = Move::Build {
            building: BuildingId::new(0),
            cards: smallvec![],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::NoCards)
        );
    }

    #[test]
    fn test_reinforce_must_exceed_top() {
        let mut state = two_player_state();
        state.players[0].buildings[2]
            .cards
            .push(RegularCard::new(CardId::new(600), Color::Green, 3));
        let equal = give(&mut state, 0, 500, Color::Red, 3);
        let higher = give(&mut state, 0, 501, Color::Red, 4);

        let mv = Move::Reinforce {
            building: BuildingId::new(2),
            cards: smallvec![equal],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::ReinforcementTooLow)
        );

        let mv = Move::Reinforce {
            building: BuildingId::new(2),
            cards: smallvec![higher],
        };
        assert_eq!(validate(&state, PlayerId::new(0), &mv), Ok(()));
    }

    #[test]
    fn test_reinforce_modified_building_rejected() {
        let mut state = two_player_state();
        state.players[0].buildings[2]
            .cards
            .push(RegularCard::new(CardId::new(600), Color::Green, 1));
        state.players[0].buildings[2].modified_this_turn = true;
        let id = give(&mut state, 0, 500, Color::Red, 4);

        let mv = Move::Reinforce {
            building: BuildingId::new(2),
            cards: smallvec![id],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::BuildingAlreadyModified)
        );
    }

    #[test]
    fn test_reinforce_empty_building_rejected() {
        let mut state = two_player_state();
        let id = give(&mut state, 0, 500, Color::Red, 4);

        let mv = Move::Reinforce {
            building: BuildingId::new(2),
            cards: smallvec![id],
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::BuildingEmpty)
        );
    }

    #[test]
    fn test_attack_requires_color_match_and_value() {
        let mut state = two_player_state();
        state.players[1].buildings[0]
            .cards
            .push(RegularCard::new(CardId::new(600), Color::Green, 3));
        let wrong_color = give(&mut state, 0, 500, Color::Red, 5);
        let too_low = give(&mut state, 0, 501, Color::Green, 2);
        let equal = give(&mut state, 0, 502, Color::Green, 3);

        let attack = |card| Move::Attack {
            target_player: PlayerId::new(1),
            target_building: BuildingId::new(0),
            card,
        };

        assert_eq!(
            validate(&state, PlayerId::new(0), &attack(wrong_color)),
            Err(MoveError::ColorMismatch)
        );
        assert_eq!(
            validate(&state, PlayerId::new(0), &attack(too_low)),
            Err(MoveError::AttackTooLow)
        );
        // Equal value wins.
        assert_eq!(validate(&state, PlayerId::new(0), &attack(equal)), Ok(()));
    }

    #[test]
    fn test_attack_protected_building_rejected() {
        let mut state = two_player_state();
        state.players[1].buildings[0]
            .cards
            .push(RegularCard::new(CardId::new(600), Color::Green, 3));
        state.players[1].buildings[0].protected = true;
        let id = give(&mut state, 0, 500, Color::Green, 5);

        let mv = Move::Attack {
            target_player: PlayerId::new(1),
            target_building: BuildingId::new(0),
            card: id,
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::BuildingProtected)
        );
    }

    #[test]
    fn test_attack_self_rejected() {
        let mut state = two_player_state();
        state.players[0].buildings[0]
            .cards
            .push(RegularCard::new(CardId::new(600), Color::Green, 3));
        let id = give(&mut state, 0, 500, Color::Green, 5);

        let mv = Move::Attack {
            target_player: PlayerId::new(0),
            target_building: BuildingId::new(0),
            card: id,
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::CannotAttackSelf)
        );
    }

    #[test]
    fn test_attack_empty_building_rejected() {
        let mut state = two_player_state();
        let id = give(&mut state, 0, 500, Color::Green, 5);

        let mv = Move::Attack {
            target_player: PlayerId::new(1),
            target_building: BuildingId::new(0),
            card: id,
        };
        assert_eq!(
            validate(&state, PlayerId::new(0), &mv),
            Err(MoveError::BuildingEmpty)
        );
    }

    #[test]
    fn test_end_turn_always_allowed_for_turn_holder() {
        let state = two_player_state();
        assert_eq!(validate(&state, PlayerId::new(0), &Move::EndTurn), Ok(()));
    }
}
