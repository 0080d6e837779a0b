//! The nineteen card variants and their fixed classifications.
//!
//! Classification is a pure function of the variant. Nothing about a card
//! is stored per instance, so a `Card` is `Copy` and two Attacks are
//! indistinguishable.

use serde::{Deserialize, Serialize};

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Card {
    Attack,
    Destroy,
    Capture,
    Backstab,
    Heist,
    Sabotage,
    Spy,
    Defend,
    GoodyBag,
    GoodyBagPlus,
    Barracks,
    Farm,
    SpellTower,
    Fort,
    Barrier,
    BlackHole,
    BloodMagic,
    Nullify,
    Oracle,
}

impl Card {
    /// Every variant, in printable-deck order.
    pub const ALL: [Card; 19] = [
        Card::Attack,
        Card::Destroy,
        Card::Capture,
        Card::Backstab,
        Card::Heist,
        Card::Sabotage,
        Card::Spy,
        Card::Defend,
        Card::GoodyBag,
        Card::GoodyBagPlus,
        Card::Barracks,
        Card::Farm,
        Card::SpellTower,
        Card::Fort,
        Card::Barrier,
        Card::BlackHole,
        Card::BloodMagic,
        Card::Nullify,
        Card::Oracle,
    ];

    /// How many copies of this card a fresh deck contains.
    #[must_use]
    pub const fn copies_in_deck(self) -> usize {
        match self {
            Card::Attack => 15,
            Card::Destroy => 4,
            Card::Capture => 3,
            Card::Backstab => 2,
            Card::Defend => 9,
            Card::GoodyBag => 2,
            Card::Barracks => 4,
            Card::Farm => 3,
            Card::SpellTower => 3,
            Card::Fort => 2,
            Card::Heist
            | Card::Sabotage
            | Card::Spy
            | Card::GoodyBagPlus
            | Card::Barrier
            | Card::BlackHole
            | Card::BloodMagic
            | Card::Nullify
            | Card::Oracle => 1,
        }
    }

    /// Can only be played in response to another card.
    #[must_use]
    pub const fn is_response(self) -> bool {
        matches!(self, Card::Defend | Card::Nullify)
    }

    /// Aimed at an opponent. Defend may only answer these.
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        matches!(
            self,
            Card::Attack
                | Card::Destroy
                | Card::Capture
                | Card::Backstab
                | Card::Heist
                | Card::Sabotage
                | Card::Spy
        )
    }

    /// Stays in play in front of its owner after resolving.
    #[must_use]
    pub const fn is_building(self) -> bool {
        matches!(self, Card::Barracks | Card::Farm | Card::SpellTower | Card::Fort)
    }

    /// Needs a Spell Tower somewhere in play to be cast.
    #[must_use]
    pub const fn is_spell(self) -> bool {
        matches!(self, Card::Barrier | Card::BlackHole | Card::BloodMagic | Card::Nullify)
    }

    #[must_use]
    pub const fn targets_a_player(self) -> bool {
        matches!(
            self,
            Card::Attack
                | Card::Destroy
                | Card::Capture
                | Card::Backstab
                | Card::Heist
                | Card::Sabotage
                | Card::Spy
                | Card::BloodMagic
        )
    }

    /// The target must be someone other than the caster.
    #[must_use]
    pub const fn targets_another_player(self) -> bool {
        matches!(self, Card::Capture | Card::Heist | Card::Spy | Card::BloodMagic)
    }

    #[must_use]
    pub const fn targets_a_building(self) -> bool {
        matches!(self, Card::Destroy | Card::Capture)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
