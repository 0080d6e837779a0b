//! Per-turn priority bookkeeping and the LIFO action stack.
//!
//! A decision round ends when the pass count reaches the roster size.
//! With an empty stack only the active player can end the round (their
//! single pass counts as everyone's); with cards on the stack every
//! seat, active or not, passes once to close the response window.

use crate::cards::Card;
use crate::core::{Action, PlayerId};

/// Details about the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentTurn {
    /// Whose turn it is.
    pub player: PlayerId,

    /// Passes since the current decision round began. Never exceeds
    /// `players_count`.
    pub pass_count: usize,

    /// Roster size when the turn began, dead seats included.
    pub players_count: usize,

    /// Attacks resolved this turn.
    pub attack_count: usize,

    /// Played but unresolved actions (index 0 = bottom, last = top).
    pub stack: Vec<Action>,

    /// The hand revealed by the last Spy this turn.
    pub spy_hand: Vec<Card>,
}

impl CurrentTurn {
    /// Start a turn for `player` at a table of `players_count` seats.
    #[must_use]
    pub fn new(player: PlayerId, players_count: usize) -> Self {
        Self {
            player,
            pass_count: 0,
            players_count,
            attack_count: 0,
            stack: Vec::new(),
            spy_hand: Vec::new(),
        }
    }

    /// Every seat has passed (or the round was passed wholesale).
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.pass_count >= self.players_count
    }

    /// Count one more pass, saturating at the roster size.
    pub fn record_pass(&mut self) {
        self.pass_count = (self.pass_count + 1).min(self.players_count);
    }

    /// Close the round as if every seat had passed.
    pub fn pass_all(&mut self) {
        self.pass_count = self.players_count;
    }

    /// Begin a new decision round.
    pub fn reset_passes(&mut self) {
        self.pass_count = 0;
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.player == player
    }

    /// Peek at the top of the stack without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&Action> {
        self.stack.last()
    }

    pub fn push(&mut self, action: Action) {
        self.stack.push(action);
    }

    /// Cards on the stack, bottom to top.
    #[must_use]
    pub fn stack_cards(&self) -> Vec<Card> {
        self.stack.iter().map(|a| a.card).collect()
    }
}
