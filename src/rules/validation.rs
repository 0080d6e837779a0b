//! Legality checks for player intents.
//!
//! Each check reads the game and the current turn and either returns
//! what should be pushed or explains why the intent is illegal. None of
//! them mutate, so a rejected intent leaves no trace.

use crate::cards::Card;
use crate::core::{Action, Game, GameError, PlayerId};
use crate::stack::CurrentTurn;

/// Check that `player` may play `card` right now.
///
/// On an empty stack this is the active player opening a decision
/// window; on a non-empty stack it is a response. Returns the action to
/// push, with targets the card does not use dropped.
pub fn validate_play(
    game: &Game,
    turn: &CurrentTurn,
    player: PlayerId,
    card: Card,
    target_player: Option<PlayerId>,
    target_building: Option<Card>,
) -> Result<Action, GameError> {
    let caster = game.player(player)?;
    let target = target_player.map(|id| game.player(id)).transpose()?;

    if !caster.hand.contains(&card) {
        return Err(GameError::CardNotInHand);
    }

    match turn.top() {
        None => {
            if !turn.is_active(player) {
                return Err(GameError::NotYourTurn);
            }
            if card.is_response() {
                return Err(GameError::ResponseOnly);
            }
            if card.targets_a_player() {
                let target = target.ok_or(GameError::MissingTargetPlayer)?;
                if target.has_barrier {
                    return Err(GameError::TargetHasBarrier);
                }
            }
            if card.targets_another_player() && target_player == Some(player) {
                return Err(GameError::CannotTargetSelf);
            }
            if card.targets_a_building() {
                let building = target_building.ok_or(GameError::MissingTargetBuilding)?;
                let owns_it = target.map_or(false, |t| t.has_building(building));
                if !owns_it {
                    return Err(GameError::BuildingNotFound);
                }
            }
            if card == Card::Attack && turn.attack_count >= caster.attack_limit() {
                return Err(GameError::AttackLimitReached);
            }
            if card.is_spell() && !game.is_spell_tower_present() {
                return Err(GameError::NoSpellTower);
            }
        }
        Some(top) => {
            if !card.is_response() {
                return Err(GameError::NotAResponse);
            }
            if card == Card::Defend && !top.card.is_offensive() {
                return Err(GameError::NotOffensive);
            }
        }
    }

    let mut action = Action::new(player, card);
    if card.targets_a_player() {
        action.target_player = target_player;
    }
    if card.targets_a_building() {
        action.target_building = target_building;
    }
    Ok(action)
}

/// Check that `player` may pass priority.
///
/// With an empty stack only the active player may pass (ending the
/// turn). Anyone may pass a response window.
pub fn validate_pass(game: &Game, turn: &CurrentTurn, player: PlayerId) -> Result<(), GameError> {
    game.player(player)?;
    if turn.stack.is_empty() && !turn.is_active(player) {
        return Err(GameError::NotYourTurn);
    }
    Ok(())
}

/// Check that `player` may discard a Fort to counter the Attack on top
/// of the stack.
pub fn validate_fort_discard(game: &Game, turn: &CurrentTurn, player: PlayerId) -> Result<(), GameError> {
    let owner = game.player(player)?;
    if !owner.has_building(Card::Fort) {
        return Err(GameError::NoFort);
    }
    let top = turn.top().ok_or(GameError::FortNotResponse)?;
    if top.card != Card::Attack {
        return Err(GameError::NotAnAttack);
    }
    Ok(())
}

/// Only the active player may look at this turn's Spy reveal.
pub fn validate_spy_hand(game: &Game, turn: &CurrentTurn, player: PlayerId) -> Result<(), GameError> {
    game.player(player)?;
    if !turn.is_active(player) {
        return Err(GameError::NotSpyPlayer);
    }
    Ok(())
}
