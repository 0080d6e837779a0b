//! Card and role catalog.
//!
//! - `Card`: the nineteen fixed card variants and their classifications
//! - `Role`: the five secret roles
//! - `deck`: the 56-card deck and the Oracle-to-bottom shuffle

mod card;
pub mod deck;
mod role;

pub use card::Card;
pub use deck::{create_deck, shuffle_deck, DECK_SIZE};
pub use role::Role;
