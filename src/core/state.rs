//! Game state: the roster and the card piles.
//!
//! ## Piles
//!
//! - **Draw pile**: ordered, top is the last element. The Oracle, while in
//!   circulation, sits at index 0 and is drawn last.
//! - **Discard pile**: unordered. Shuffled back into the draw pile when the
//!   draw pile runs dry mid-draw.
//!
//! Once the Oracle resolves it leaves circulation for good and
//! `oracle_played` is set.

use rustc_hash::FxHashMap;
use tracing::{debug, error};

use super::action::Action;
use super::config::MAX_PLAYERS;
use super::error::GameError;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{create_deck, shuffle_deck, Card, Role};

/// Complete game state.
#[derive(Clone, Debug)]
pub struct Game {
    /// Roster in seat order. Append-only until full.
    pub players: Vec<Player>,

    pub draw_pile: Vec<Card>,

    pub discard_pile: Vec<Card>,

    /// The Oracle has resolved: every role is now public.
    pub oracle_played: bool,

    pub rng: GameRng,
}

impl Game {
    /// Create an empty lobby with a freshly shuffled deck.
    #[must_use]
    pub fn new(mut rng: GameRng) -> Self {
        let mut draw_pile = create_deck();
        shuffle_deck(&mut draw_pile, &mut rng);

        Self {
            players: Vec::new(),
            draw_pile,
            discard_pile: Vec::new(),
            oracle_played: false,
            rng,
        }
    }

    // === Roster ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Iterate over all seated player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// Seat a new player. Fails once the roster is full.
    pub fn add_player(&mut self) -> Result<PlayerId, GameError> {
        if self.is_full() {
            return Err(GameError::GameFull);
        }
        self.players.push(Player::new());
        Ok(PlayerId::new((self.players.len() - 1) as u8))
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id.index()).ok_or(GameError::UnknownPlayer(id.0))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players.get_mut(id.index()).ok_or(GameError::UnknownPlayer(id.0))
    }

    /// Both players mutably. `None` if either is unknown or they are the same seat.
    pub fn pair_mut(&mut self, a: PlayerId, b: PlayerId) -> Option<(&mut Player, &mut Player)> {
        let (i, j) = (a.index(), b.index());
        if i == j || i >= self.players.len() || j >= self.players.len() {
            return None;
        }
        if i < j {
            let (left, right) = self.players.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.players.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    /// Randomly assign the first `n` roles to the `n` seated players.
    pub fn assign_roles(&mut self) {
        let mut roles: Vec<Role> = Role::ALL.into_iter().take(self.players.len()).collect();
        self.rng.shuffle(&mut roles);
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = Some(role);
        }
    }

    /// The seat holding `role`, if any.
    #[must_use]
    pub fn player_with_role(&self, role: Role) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.role == Some(role))
            .map(|idx| PlayerId::new(idx as u8))
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// The first living seat at or after `seat`, wrapping around the table.
    #[must_use]
    pub fn next_alive_from(&self, seat: PlayerId) -> Option<PlayerId> {
        let n = self.players.len();
        (0..n)
            .map(|offset| (seat.index() + offset) % n)
            .find(|&idx| self.players[idx].is_alive())
            .map(|idx| PlayerId::new(idx as u8))
    }

    /// The first living seat strictly after `seat`, wrapping around.
    ///
    /// Returns `seat` itself if it is the only one alive.
    #[must_use]
    pub fn next_alive_after(&self, seat: PlayerId) -> Option<PlayerId> {
        let n = self.players.len();
        if n == 0 {
            return None;
        }
        self.next_alive_from(PlayerId::new(((seat.index() + 1) % n) as u8))
    }

    /// At least one player, living or dead, owns a Spell Tower.
    #[must_use]
    pub fn is_spell_tower_present(&self) -> bool {
        self.players.iter().any(|p| p.has_building(Card::SpellTower))
    }

    // === Cards ===

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Shuffle the discard pile into the draw pile.
    pub fn recycle_discard_pile(&mut self) {
        debug!(cards = self.discard_pile.len(), "recycling discard pile");
        self.draw_pile.append(&mut self.discard_pile);
        shuffle_deck(&mut self.draw_pile, &mut self.rng);
    }

    /// Draw one card into `player`'s hand, recycling the discard pile first
    /// if the draw pile is empty.
    ///
    /// Returns the card drawn. `None` means both piles were empty (or the
    /// player is unknown), which hand limits make unreachable in play.
    pub fn draw(&mut self, player: PlayerId) -> Option<Card> {
        if player.index() >= self.players.len() {
            return None;
        }
        if self.draw_pile.is_empty() {
            self.recycle_discard_pile();
        }
        let Some(card) = self.draw_pile.pop() else {
            error!(%player, "draw pile and discard pile are both empty");
            return None;
        };
        self.players[player.index()].hand.push(card);
        Some(card)
    }

    /// Draw until `player` holds their hand limit. Returns the cards drawn.
    pub fn draw_to_hand_limit(&mut self, player: PlayerId) -> Vec<Card> {
        let mut drawn = Vec::new();
        while let Ok(p) = self.player(player) {
            if p.hand.len() >= p.hand_limit() {
                break;
            }
            match self.draw(player) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Count every card by variant across all locations.
    ///
    /// `stack` is the current action stack. Fort-discard actions are
    /// skipped because their Fort is already in the discard pile. A
    /// resolved Oracle counts as one retired copy.
    #[must_use]
    pub fn card_census(&self, stack: &[Action]) -> FxHashMap<Card, usize> {
        let mut census = FxHashMap::default();
        let on_stack = stack.iter().filter(|a| !a.is_fort_discard).map(|a| &a.card);
        let held = self
            .players
            .iter()
            .flat_map(|p| p.hand.iter().chain(p.buildings.iter()));

        for &card in self
            .draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(held)
            .chain(on_stack)
        {
            *census.entry(card).or_insert(0) += 1;
        }
        if self.oracle_played {
            *census.entry(Card::Oracle).or_insert(0) += 1;
        }
        census
    }
}
