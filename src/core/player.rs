//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! A player's seat in the roster (0-4), handed out by `join()`.
//!
//! ## Player
//!
//! Health, hand, buildings and the one-turn barrier flag, plus the limits
//! derived from buildings.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Role};

/// Health every player starts with.
pub const STARTING_HEALTH: i32 = 5;

/// Hand limit before Farms are counted.
pub const BASE_HAND_LIMIT: usize = 5;

/// Cards held in hand. Hands rarely exceed the limit, so they stay inline.
pub type Hand = SmallVec<[Card; 8]>;

/// Player identifier: the player's index in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a roster of `player_count`.
    ///
    /// ```
    /// use oracle_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Mutable state of one seat.
///
/// A dead player (health at or below zero) keeps their seat, hand and
/// buildings; they are only skipped in turn order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unset until the game starts.
    pub role: Option<Role>,
    pub health: i32,
    pub hand: Hand,
    /// Only building cards live here. Duplicates stack their bonuses.
    pub buildings: Vec<Card>,
    /// Set by Barrier, cleared at the start of every turn.
    pub has_barrier: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A freshly joined player: full health, no role, nothing in hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            role: None,
            health: STARTING_HEALTH,
            hand: Hand::new(),
            buildings: Vec::new(),
            has_barrier: false,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Number of copies of `building` this player owns.
    #[must_use]
    pub fn building_count(&self, building: Card) -> usize {
        self.buildings.iter().filter(|&&b| b == building).count()
    }

    #[must_use]
    pub fn has_building(&self, building: Card) -> bool {
        self.buildings.contains(&building)
    }

    /// The maximum number of cards drawn up to: five plus one per Farm.
    #[must_use]
    pub fn hand_limit(&self) -> usize {
        BASE_HAND_LIMIT + self.building_count(Card::Farm)
    }

    /// Damage dealt by this player's Attack: one plus one per Spell Tower.
    #[must_use]
    pub fn attack_damage(&self) -> i32 {
        1 + self.building_count(Card::SpellTower) as i32
    }

    /// Attacks allowed per turn: one plus one per Barracks.
    #[must_use]
    pub fn attack_limit(&self) -> usize {
        1 + self.building_count(Card::Barracks)
    }

    /// Remove one copy of `card` from hand. Returns whether it was there.
    pub fn take_from_hand(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove one copy of `building`. Returns whether it was there.
    pub fn take_building(&mut self, building: Card) -> bool {
        match self.buildings.iter().position(|&b| b == building) {
            Some(pos) => {
                self.buildings.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every copy of `building`, returning how many there were.
    pub fn take_all_buildings(&mut self, building: Card) -> usize {
        let before = self.buildings.len();
        self.buildings.retain(|&b| b != building);
        before - self.buildings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_serializes_as_integer() {
        let json = serde_json::to_string(&PlayerId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_new_player() {
        let player = Player::new();
        assert_eq!(player.role, None);
        assert_eq!(player.health, STARTING_HEALTH);
        assert!(player.hand.is_empty());
        assert!(player.is_alive());
        assert_eq!(player.hand_limit(), 5);
        assert_eq!(player.attack_damage(), 1);
        assert_eq!(player.attack_limit(), 1);
    }

    #[test]
    fn test_derived_limits_follow_buildings() {
        let mut player = Player::new();
        player.buildings = vec![Card::Farm, Card::Farm, Card::SpellTower, Card::Barracks];

        assert_eq!(player.hand_limit(), 7);
        assert_eq!(player.attack_damage(), 2);
        assert_eq!(player.attack_limit(), 2);
    }

    #[test]
    fn test_dead_at_zero() {
        let mut player = Player::new();
        player.health = 0;
        assert!(player.is_dead());
        player.health = -2;
        assert!(player.is_dead());
    }

    #[test]
    fn test_take_from_hand_removes_one_copy() {
        let mut player = Player::new();
        player.hand.extend([Card::Attack, Card::Defend, Card::Attack]);

        assert!(player.take_from_hand(Card::Attack));
        assert_eq!(player.hand.len(), 2);
        assert!(player.hand.contains(&Card::Attack));
        assert!(!player.take_from_hand(Card::Spy));
    }

    #[test]
    fn test_take_building() {
        let mut player = Player::new();
        player.buildings = vec![Card::Fort, Card::Fort];

        assert!(player.take_building(Card::Fort));
        assert_eq!(player.building_count(Card::Fort), 1);
        assert!(!player.take_building(Card::Farm));
    }

    #[test]
    fn test_take_all_buildings() {
        let mut player = Player::new();
        player.buildings = vec![Card::Farm, Card::Fort, Card::Farm];

        assert_eq!(player.take_all_buildings(Card::Farm), 2);
        assert_eq!(player.buildings, vec![Card::Fort]);
        assert_eq!(player.take_all_buildings(Card::Barracks), 0);
    }
}
