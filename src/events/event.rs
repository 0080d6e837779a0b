//! Event types.
//!
//! Events are notifications, not state: observers react to a
//! `StateUpdate` by asking the controller for a fresh snapshot.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;

/// The name of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventName {
    /// A player drew one card. Carries the player, never the card.
    CardDrawn,
    /// Something observable changed.
    StateUpdate,
    /// The game ended with winners.
    Win,
    /// The game ended with nobody winning.
    Draw,
}

/// The payload of an event. Absent fields are left out when serialised.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_ids: Option<Vec<PlayerId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
}

/// A game event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: EventName,
    pub data: EventData,
}

impl Event {
    /// An event with an empty payload.
    #[must_use]
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            data: EventData::default(),
        }
    }

    #[must_use]
    pub fn state_update() -> Self {
        Self::new(EventName::StateUpdate)
    }

    /// The state update that opens `player`'s turn.
    #[must_use]
    pub fn turn_started(player: PlayerId) -> Self {
        Self::state_update().with_player(player)
    }

    /// The state update announcing that `player` put `card` on the stack.
    #[must_use]
    pub fn card_played(player: PlayerId, card: Card) -> Self {
        Self::state_update().with_player(player).with_card(card)
    }

    #[must_use]
    pub fn card_drawn(player: PlayerId) -> Self {
        Self::new(EventName::CardDrawn).with_player(player)
    }

    #[must_use]
    pub fn win(winners: Vec<PlayerId>) -> Self {
        let mut event = Self::new(EventName::Win);
        event.data.winner_ids = Some(winners);
        event
    }

    #[must_use]
    pub fn draw() -> Self {
        Self::new(EventName::Draw)
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.data.player_id = Some(player);
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.data.card = Some(card);
        self
    }

    /// Win and Draw end the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.name, EventName::Win | EventName::Draw)
    }
}
