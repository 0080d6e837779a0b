//! Action representation: a card being played, with its targets.
//!
//! Actions are created when a play is accepted and consumed only by stack
//! resolution. A Fort discard is a special action: the Fort has already
//! left play when it is pushed, and on resolution it counters the action
//! beneath it like a response card.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

use super::player::PlayerId;

/// The playing of a card, with its targets.
///
/// ```
/// use oracle_engine::cards::Card;
/// use oracle_engine::core::{Action, PlayerId};
///
/// let capture = Action::new(PlayerId::new(0), Card::Capture)
///     .with_target_player(PlayerId::new(2))
///     .with_target_building(Card::Farm);
/// assert_eq!(capture.target_player, Some(PlayerId::new(2)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The player who played the card.
    pub player: PlayerId,

    pub card: Card,

    pub target_player: Option<PlayerId>,

    pub target_building: Option<Card>,

    /// Set only for a Fort discarded in response to an Attack.
    pub is_fort_discard: bool,
}

impl Action {
    /// Create an action with no targets.
    #[must_use]
    pub fn new(player: PlayerId, card: Card) -> Self {
        Self {
            player,
            card,
            target_player: None,
            target_building: None,
            is_fort_discard: false,
        }
    }

    /// The action pushed when `player` discards a Fort.
    #[must_use]
    pub fn fort_discard(player: PlayerId) -> Self {
        Self {
            is_fort_discard: true,
            ..Self::new(player, Card::Fort)
        }
    }

    #[must_use]
    pub fn with_target_player(mut self, target: PlayerId) -> Self {
        self.target_player = Some(target);
        self
    }

    #[must_use]
    pub fn with_target_building(mut self, building: Card) -> Self {
        self.target_building = Some(building);
        self
    }

    /// Responses and Fort discards cancel the action beneath them.
    #[must_use]
    pub fn is_counter(&self) -> bool {
        self.card.is_response() || self.is_fort_discard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_no_targets() {
        let action = Action::new(PlayerId::new(1), Card::Farm);

        assert_eq!(action.card, Card::Farm);
        assert_eq!(action.target_player, None);
        assert_eq!(action.target_building, None);
        assert!(!action.is_counter());
    }

    #[test]
    fn test_fort_discard_is_counter() {
        let action = Action::fort_discard(PlayerId::new(3));

        assert_eq!(action.card, Card::Fort);
        assert!(action.is_fort_discard);
        assert!(action.is_counter());
    }

    #[test]
    fn test_responses_are_counters() {
        assert!(Action::new(PlayerId::new(0), Card::Defend).is_counter());
        assert!(Action::new(PlayerId::new(0), Card::Nullify).is_counter());
        assert!(!Action::new(PlayerId::new(0), Card::Fort).is_counter());
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::new(PlayerId::new(0), Card::Destroy)
            .with_target_player(PlayerId::new(1))
            .with_target_building(Card::Fort);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
