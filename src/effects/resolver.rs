//! Stack resolution - applying card effects to game state.
//!
//! The stack drains top to bottom. Counters (response cards and Fort
//! discards) have no effect of their own: they pop the action beneath
//! them and throw it away unresolved. Every resolved or cancelled card
//! ends up in the discard pile, except buildings (which stay in play)
//! and a resolved Oracle (which leaves the game).

use tracing::{trace, warn};

use crate::cards::Card;
use crate::core::{Action, Game, PlayerId};
use crate::events::{Event, EventSink};
use crate::stack::CurrentTurn;

/// Damage dealt by Backstab, regardless of buildings.
pub const BACKSTAB_DAMAGE: i32 = 1;

/// Cards removed from the target's hand by Sabotage.
pub const SABOTAGE_DISCARDS: usize = 2;

/// Result of resolving one stack entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The action popped from the top.
    pub action: Action,

    /// The action it countered, if it was a counter.
    pub cancelled: Option<Action>,
}

/// Draw `count` cards for `player`, reporting each draw.
pub fn draw_cards(game: &mut Game, player: PlayerId, count: usize, sink: &mut impl EventSink) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        if game.draw(player).is_none() {
            break;
        }
        sink.emit(Event::card_drawn(player));
        drawn += 1;
    }
    drawn
}

/// Draw `player` up to their hand limit, reporting each draw.
pub fn draw_to_hand_limit(game: &mut Game, player: PlayerId, sink: &mut impl EventSink) -> usize {
    let drawn = game.draw_to_hand_limit(player);
    for _ in &drawn {
        sink.emit(Event::card_drawn(player));
    }
    drawn.len()
}

/// Resolve the whole stack, broadcasting a state update after every step.
pub fn resolve_stack(game: &mut Game, turn: &mut CurrentTurn, sink: &mut impl EventSink) -> Vec<Resolution> {
    let mut resolved = Vec::new();
    while let Some(step) = resolve_top(game, turn, sink) {
        resolved.push(step);
        sink.emit(Event::state_update());
    }
    resolved
}

/// Pop and resolve the top of the stack.
///
/// Returns `None` if the stack is empty.
pub fn resolve_top(game: &mut Game, turn: &mut CurrentTurn, sink: &mut impl EventSink) -> Option<Resolution> {
    let action = turn.stack.pop()?;
    trace!(?action, "resolving");

    let mut cancelled = None;
    if action.is_counter() {
        cancelled = counter(game, turn);
    } else {
        apply_effect(game, turn, &action, sink);
    }

    let stays_in_play = action.card.is_building() || action.card == Card::Oracle;
    if !stays_in_play {
        game.discard(action.card);
    }

    Some(Resolution { action, cancelled })
}

/// Throw away the action beneath a counter without resolving it.
fn counter(game: &mut Game, turn: &mut CurrentTurn) -> Option<Action> {
    let Some(cancelled) = turn.stack.pop() else {
        warn!("counter resolved with nothing beneath it");
        return None;
    };
    trace!(?cancelled, "countered");
    // A cancelled Fort discard already sent its Fort to the discard pile.
    if !cancelled.is_fort_discard {
        game.discard(cancelled.card);
    }
    Some(cancelled)
}

fn apply_effect(game: &mut Game, turn: &mut CurrentTurn, action: &Action, sink: &mut impl EventSink) {
    let caster = action.player;

    match action.card {
        Card::Attack => {
            let Some(target) = required_target(action) else { return };
            let damage = game.player(caster).map_or(1, |p| p.attack_damage());
            damage_player(game, target, damage);
            turn.attack_count += 1;
        }
        Card::Destroy => {
            let (Some(target), Some(building)) = (required_target(action), action.target_building) else {
                return;
            };
            let removed = game.player_mut(target).map_or(0, |p| p.take_all_buildings(building));
            if removed == 0 {
                warn!(%target, %building, "building to destroy is gone");
            }
            for _ in 0..removed {
                game.discard(building);
            }
        }
        Card::Capture => {
            let (Some(target), Some(building)) = (required_target(action), action.target_building) else {
                return;
            };
            let Some((thief, victim)) = game.pair_mut(caster, target) else { return };
            if victim.take_building(building) {
                thief.buildings.push(building);
            } else {
                warn!(%target, %building, "building to capture is gone");
            }
        }
        Card::Backstab => {
            let Some(target) = required_target(action) else { return };
            damage_player(game, target, BACKSTAB_DAMAGE);
        }
        Card::Heist => {
            let Some(target) = required_target(action) else { return };
            if let Some((thief, victim)) = game.pair_mut(caster, target) {
                std::mem::swap(&mut thief.hand, &mut victim.hand);
            }
        }
        Card::Sabotage => {
            let Some(target) = required_target(action) else { return };
            sabotage(game, target);
        }
        Card::Spy => {
            let Some(target) = required_target(action) else { return };
            if let Ok(victim) = game.player(target) {
                turn.spy_hand = victim.hand.to_vec();
            }
        }
        Card::GoodyBag => {
            draw_cards(game, caster, 2, sink);
        }
        Card::GoodyBagPlus => {
            draw_cards(game, caster, 3, sink);
        }
        Card::Barracks | Card::Farm | Card::SpellTower | Card::Fort => {
            if let Ok(owner) = game.player_mut(caster) {
                owner.buildings.push(action.card);
            }
        }
        Card::Barrier => {
            if let Ok(owner) = game.player_mut(caster) {
                owner.has_barrier = true;
            }
        }
        Card::BlackHole => {
            let Game { players, discard_pile, .. } = game;
            for player in players.iter_mut() {
                discard_pile.append(&mut player.buildings);
            }
        }
        Card::BloodMagic => {
            let Some(target) = required_target(action) else { return };
            if let Some((mage, victim)) = game.pair_mut(caster, target) {
                std::mem::swap(&mut mage.health, &mut victim.health);
            }
        }
        Card::Oracle => {
            game.oracle_played = true;
        }
        // Resolved as counters.
        Card::Defend | Card::Nullify => {}
    }
}

fn required_target(action: &Action) -> Option<PlayerId> {
    if action.target_player.is_none() {
        warn!(card = %action.card, "resolving without a target player");
    }
    action.target_player
}

fn damage_player(game: &mut Game, target: PlayerId, amount: i32) {
    if let Ok(victim) = game.player_mut(target) {
        victim.health -= amount;
    }
}

/// Discard up to two random cards from `target`'s hand.
fn sabotage(game: &mut Game, target: PlayerId) {
    let Game { players, rng, discard_pile, .. } = game;
    let Some(victim) = players.get_mut(target.index()) else { return };
    for _ in 0..SABOTAGE_DISCARDS {
        let Some(idx) = rng.choose_index(victim.hand.len()) else { break };
        discard_pile.push(victim.hand.remove(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::events::EventName;

    fn setup(players: usize) -> (Game, CurrentTurn) {
        let mut game = Game::new(GameRng::new(5));
        for _ in 0..players {
            game.add_player().unwrap();
        }
        (game, CurrentTurn::new(PlayerId::new(0), players))
    }

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_empty_stack_resolves_nothing() {
        let (mut game, mut turn) = setup(2);
        let mut events = Vec::new();
        assert!(resolve_top(&mut game, &mut turn, &mut events).is_none());
        assert!(resolve_stack(&mut game, &mut turn, &mut events).is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_attack_uses_spell_tower_damage() {
        let (mut game, mut turn) = setup(2);
        game.players[0].buildings = vec![Card::SpellTower, Card::SpellTower];
        turn.push(Action::new(p(0), Card::Attack).with_target_player(p(1)));

        let mut events = Vec::new();
        resolve_stack(&mut game, &mut turn, &mut events);

        assert_eq!(game.players[1].health, 2);
        assert_eq!(turn.attack_count, 1);
        assert_eq!(game.discard_pile, vec![Card::Attack]);
        assert_eq!(events, vec![Event::state_update()]);
    }

    #[test]
    fn test_counter_cancels_action_beneath() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(0), Card::Attack).with_target_player(p(1)));
        turn.push(Action::new(p(1), Card::Defend));

        let mut events = Vec::new();
        let steps = resolve_stack(&mut game, &mut turn, &mut events);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].cancelled.map(|a| a.card), Some(Card::Attack));
        assert_eq!(game.players[1].health, 5);
        assert_eq!(turn.attack_count, 0);
        let mut discarded = game.discard_pile.clone();
        discarded.sort();
        assert_eq!(discarded, vec![Card::Attack, Card::Defend]);
    }

    #[test]
    fn test_nullify_on_defend_lets_attack_through() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(0), Card::Attack).with_target_player(p(1)));
        turn.push(Action::new(p(1), Card::Defend));
        turn.push(Action::new(p(0), Card::Nullify));

        let mut events = Vec::new();
        let steps = resolve_stack(&mut game, &mut turn, &mut events);

        assert_eq!(steps.len(), 2);
        assert_eq!(game.players[1].health, 4);
        assert_eq!(events.len(), 2);
        assert!(turn.stack.is_empty());
    }

    #[test]
    fn test_fort_discard_does_not_discard_fort_twice() {
        let (mut game, mut turn) = setup(2);
        game.discard(Card::Fort);
        turn.push(Action::new(p(0), Card::Attack).with_target_player(p(1)));
        turn.push(Action::fort_discard(p(1)));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(game.players[1].health, 5);
        let forts = game.discard_pile.iter().filter(|&&c| c == Card::Fort).count();
        assert_eq!(forts, 1);
    }

    #[test]
    fn test_destroy_removes_every_copy() {
        let (mut game, mut turn) = setup(2);
        game.players[1].buildings = vec![Card::Farm, Card::Fort, Card::Farm];
        turn.push(
            Action::new(p(0), Card::Destroy)
                .with_target_player(p(1))
                .with_target_building(Card::Farm),
        );

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(game.players[1].buildings, vec![Card::Fort]);
        assert_eq!(game.discard_pile.iter().filter(|&&c| c == Card::Farm).count(), 2);
        assert!(game.discard_pile.contains(&Card::Destroy));
    }

    #[test]
    fn test_capture_moves_building() {
        let (mut game, mut turn) = setup(2);
        game.players[1].buildings = vec![Card::Barracks];
        turn.push(
            Action::new(p(0), Card::Capture)
                .with_target_player(p(1))
                .with_target_building(Card::Barracks),
        );

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert!(game.players[1].buildings.is_empty());
        assert_eq!(game.players[0].buildings, vec![Card::Barracks]);
        assert_eq!(game.players[0].attack_limit(), 2);
    }

    #[test]
    fn test_backstab_ignores_buildings() {
        let (mut game, mut turn) = setup(2);
        game.players[0].buildings = vec![Card::SpellTower];
        turn.push(Action::new(p(0), Card::Backstab).with_target_player(p(1)));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(game.players[1].health, 4);
        assert_eq!(turn.attack_count, 0);
    }

    #[test]
    fn test_heist_swaps_hands() {
        let (mut game, mut turn) = setup(2);
        game.players[0].hand.extend([Card::Farm]);
        game.players[1].hand.extend([Card::Attack, Card::Defend]);
        turn.push(Action::new(p(0), Card::Heist).with_target_player(p(1)));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(game.players[0].hand.to_vec(), vec![Card::Attack, Card::Defend]);
        assert_eq!(game.players[1].hand.to_vec(), vec![Card::Farm]);
    }

    #[test]
    fn test_sabotage_tolerates_small_hands() {
        let (mut game, mut turn) = setup(3);
        game.players[1].hand.extend([Card::Attack, Card::Defend, Card::Farm]);
        game.players[2].hand.extend([Card::Spy]);
        turn.push(Action::new(p(0), Card::Sabotage).with_target_player(p(1)));
        turn.push(Action::new(p(0), Card::Sabotage).with_target_player(p(2)));

        resolve_top(&mut game, &mut turn, &mut Vec::new());
        assert!(game.players[2].hand.is_empty());
        resolve_top(&mut game, &mut turn, &mut Vec::new());
        assert_eq!(game.players[1].hand.len(), 1);
        // Two sabotages plus three cards taken from hands.
        assert_eq!(game.discard_pile.len(), 5);
    }

    #[test]
    fn test_spy_records_copy_of_hand() {
        let (mut game, mut turn) = setup(2);
        game.players[1].hand.extend([Card::Nullify, Card::Oracle]);
        turn.push(Action::new(p(0), Card::Spy).with_target_player(p(1)));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(turn.spy_hand, vec![Card::Nullify, Card::Oracle]);
        assert_eq!(game.players[1].hand.len(), 2);
    }

    #[test]
    fn test_goody_bags_draw_and_report() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(0), Card::GoodyBag));
        turn.push(Action::new(p(0), Card::GoodyBagPlus));

        let mut events = Vec::new();
        resolve_stack(&mut game, &mut turn, &mut events);

        assert_eq!(game.players[0].hand.len(), 5);
        let draws = events.iter().filter(|e| e.name == EventName::CardDrawn).count();
        assert_eq!(draws, 5);
        assert_eq!(events.last(), Some(&Event::state_update()));
    }

    #[test]
    fn test_building_enters_play() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(1), Card::Farm));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(game.players[1].buildings, vec![Card::Farm]);
        assert!(game.discard_pile.is_empty());
    }

    #[test]
    fn test_countered_building_is_discarded() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(0), Card::Fort));
        turn.push(Action::new(p(1), Card::Nullify));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert!(game.players[0].buildings.is_empty());
        let mut discarded = game.discard_pile.clone();
        discarded.sort();
        assert_eq!(discarded, vec![Card::Fort, Card::Nullify]);
    }

    #[test]
    fn test_barrier_and_black_hole() {
        let (mut game, mut turn) = setup(3);
        game.players[1].buildings = vec![Card::Farm, Card::Fort];
        game.players[2].buildings = vec![Card::SpellTower];
        turn.push(Action::new(p(0), Card::BlackHole));
        turn.push(Action::new(p(0), Card::Barrier));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert!(game.players[0].has_barrier);
        assert!(game.players.iter().all(|p| p.buildings.is_empty()));
        assert_eq!(game.discard_pile.len(), 5);
    }

    #[test]
    fn test_blood_magic_swaps_health() {
        let (mut game, mut turn) = setup(2);
        game.players[0].health = 1;
        turn.push(Action::new(p(0), Card::BloodMagic).with_target_player(p(1)));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert_eq!(game.players[0].health, 5);
        assert_eq!(game.players[1].health, 1);
    }

    #[test]
    fn test_oracle_is_retired() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(0), Card::Oracle));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert!(game.oracle_played);
        assert!(!game.discard_pile.contains(&Card::Oracle));
    }

    #[test]
    fn test_countered_oracle_stays_in_circulation() {
        let (mut game, mut turn) = setup(2);
        turn.push(Action::new(p(0), Card::Oracle));
        turn.push(Action::new(p(1), Card::Nullify));

        resolve_stack(&mut game, &mut turn, &mut Vec::new());

        assert!(!game.oracle_played);
        assert!(game.discard_pile.contains(&Card::Oracle));
    }
}
