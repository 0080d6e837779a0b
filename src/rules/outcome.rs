//! Win and draw detection.
//!
//! Only meaningful once roles are assigned. Roles that were never dealt
//! (games with fewer than five players) count as dead.

use rustc_hash::FxHashMap;

use crate::cards::Role;
use crate::core::{Game, PlayerId};

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// One or more players won. The Crown and the Knight can share a win.
    Winners(Vec<PlayerId>),
    /// Only one player is left and nobody's win condition holds.
    Draw,
}

impl Outcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            Outcome::Winners(ps) => ps.contains(&player),
            Outcome::Draw => false,
        }
    }
}

/// Players who have won, in fixed rule order. Empty while the game goes on.
#[must_use]
pub fn detect_win(game: &Game) -> Vec<PlayerId> {
    let seats: FxHashMap<Role, (PlayerId, bool)> = game
        .players
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| p.role.map(|role| (role, (PlayerId::new(idx as u8), p.is_alive()))))
        .collect();
    let living = |role: Role| seats.get(&role).filter(|&&(_, alive)| alive).map(|&(id, _)| id);
    let gone = |role: Role| living(role).is_none();

    if let Some(crown) = living(Role::TheCrown) {
        if gone(Role::DemonLord) && gone(Role::Usurper) && gone(Role::Cultist) {
            return std::iter::once(crown).chain(living(Role::Knight)).collect();
        }
    }
    if let Some(demon_lord) = living(Role::DemonLord) {
        if gone(Role::TheCrown) && gone(Role::Usurper) && gone(Role::Knight) && gone(Role::Cultist) {
            return vec![demon_lord];
        }
    }
    if let Some(usurper) = living(Role::Usurper) {
        if gone(Role::TheCrown) {
            return vec![usurper];
        }
    }
    if let Some(cultist) = living(Role::Cultist) {
        if gone(Role::TheCrown) && gone(Role::Knight) {
            return vec![cultist];
        }
    }
    Vec::new()
}

/// Exactly one player is still alive.
#[must_use]
pub fn detect_draw(game: &Game) -> bool {
    game.alive_count() == 1
}

/// Win first, then draw.
#[must_use]
pub fn check_outcome(game: &Game) -> Option<Outcome> {
    let winners = detect_win(game);
    if !winners.is_empty() {
        return Some(Outcome::Winners(winners));
    }
    detect_draw(game).then_some(Outcome::Draw)
}
