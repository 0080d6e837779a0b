//! Per-player snapshots of the game.
//!
//! A snapshot is what one seat is allowed to see: everyone's public
//! attributes, their own hand, and the roles that are known to them.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Role};
use crate::core::{Game, GameError, Player, PlayerId};
use crate::stack::CurrentTurn;

/// One player as seen by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub health: i32,
    pub hand_count: usize,
    pub buildings: Vec<Card>,
    pub has_barrier: bool,

    /// Known for The Crown, for the viewer's own seat, and for everyone
    /// once the Oracle has been played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Present only for the viewer's own seat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

/// The turn in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    /// Cards on the stack, bottom to top.
    pub stack: Vec<Card>,
    pub player_id: PlayerId,
}

/// The whole game as seen by one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub players: Vec<PlayerView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<TurnView>,
}

impl GameView {
    /// Build the view for `viewer`. Fails if the viewer has no seat.
    pub fn build(game: &Game, turn: Option<&CurrentTurn>, viewer: PlayerId) -> Result<Self, GameError> {
        game.player(viewer)?;

        let players = game
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| {
                let own = idx == viewer.index();
                PlayerView::build(player, own, game.oracle_played)
            })
            .collect();

        let current_turn = turn.map(|t| TurnView {
            stack: t.stack_cards(),
            player_id: t.player,
        });

        Ok(Self { players, current_turn })
    }
}

impl PlayerView {
    fn build(player: &Player, own: bool, oracle_played: bool) -> Self {
        let role_known = own || oracle_played || player.role == Some(Role::TheCrown);
        Self {
            health: player.health,
            hand_count: player.hand.len(),
            buildings: player.buildings.clone(),
            has_barrier: player.has_barrier,
            role: player.role.filter(|_| role_known),
            hand: own.then(|| player.hand.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, GameRng};

    fn game_with_roles(roles: &[Role]) -> Game {
        let mut game = Game::new(GameRng::new(11));
        for &role in roles {
            let id = game.add_player().unwrap();
            game.players[id.index()].role = Some(role);
            game.draw_to_hand_limit(id);
        }
        game
    }

    #[test]
    fn test_viewer_sees_own_hand_and_role_only() {
        let game = game_with_roles(&[Role::Usurper, Role::TheCrown, Role::DemonLord]);
        let view = GameView::build(&game, None, PlayerId::new(0)).unwrap();

        assert_eq!(view.players.len(), 3);
        assert_eq!(view.players[0].role, Some(Role::Usurper));
        assert_eq!(view.players[0].hand.as_ref().map(Vec::len), Some(5));
        assert_eq!(view.players[1].role, Some(Role::TheCrown));
        assert_eq!(view.players[1].hand, None);
        assert_eq!(view.players[1].hand_count, 5);
        assert_eq!(view.players[2].role, None);
        assert_eq!(view.current_turn, None);
    }

    #[test]
    fn test_oracle_reveals_every_role() {
        let mut game = game_with_roles(&[Role::Usurper, Role::TheCrown, Role::DemonLord]);
        game.oracle_played = true;
        let view = GameView::build(&game, None, PlayerId::new(0)).unwrap();

        assert!(view.players.iter().all(|p| p.role.is_some()));
        assert_eq!(view.players[2].hand, None);
    }

    #[test]
    fn test_turn_view() {
        let game = game_with_roles(&[Role::TheCrown, Role::DemonLord]);
        let mut turn = CurrentTurn::new(PlayerId::new(1), 2);
        turn.push(Action::new(PlayerId::new(1), Card::Attack).with_target_player(PlayerId::new(0)));

        let view = GameView::build(&game, Some(&turn), PlayerId::new(0)).unwrap();
        assert_eq!(
            view.current_turn,
            Some(TurnView {
                stack: vec![Card::Attack],
                player_id: PlayerId::new(1),
            })
        );
    }

    #[test]
    fn test_unknown_viewer() {
        let game = game_with_roles(&[Role::TheCrown, Role::DemonLord]);
        assert_eq!(
            GameView::build(&game, None, PlayerId::new(2)),
            Err(GameError::UnknownPlayer(2))
        );
    }

    #[test]
    fn test_json_shape_hides_unknowns() {
        let game = game_with_roles(&[Role::TheCrown, Role::DemonLord]);
        let view = GameView::build(&game, None, PlayerId::new(0)).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["players"][0]["role"], "THE_CROWN");
        assert!(json["players"][1].get("role").is_none());
        assert!(json["players"][1].get("hand").is_none());
        assert!(json.get("current_turn").is_none());
    }
}
