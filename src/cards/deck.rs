//! Deck construction and shuffling.
//!
//! A deck is a `Vec<Card>` whose *last* element is the top: drawing pops
//! from the end, so index 0 is the card drawn last.

use crate::core::rng::GameRng;

use super::Card;

/// Number of cards in a fresh deck: the sum of every card's copy count.
pub const DECK_SIZE: usize = deck_size();

const fn deck_size() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < Card::ALL.len() {
        total += Card::ALL[i].copies_in_deck();
        i += 1;
    }
    total
}

/// Create a deck in printable-deck order.
#[must_use]
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for card in Card::ALL {
        deck.extend(std::iter::repeat(card).take(card.copies_in_deck()));
    }
    deck
}

/// Shuffle a deck, then move the Oracle to the bottom.
///
/// Once the Oracle has been played it is no longer part of the deck and
/// only the shuffle happens.
pub fn shuffle_deck(deck: &mut [Card], rng: &mut GameRng) {
    rng.shuffle(deck);
    if let Some(pos) = deck.iter().position(|&c| c == Card::Oracle) {
        // Rotating keeps the relative order of everything beneath it.
        deck[..=pos].rotate_right(1);
    }
}
