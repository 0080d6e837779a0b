//! Card effects.
//!
//! `resolve_stack` drains the current turn's action stack, applying each
//! card's effect to the game. The draw helpers here are the only way the
//! engine puts cards in hands, so every draw is reported as a
//! `CardDrawn` event.

mod resolver;

pub use resolver::{
    draw_cards, draw_to_hand_limit, resolve_stack, resolve_top, Resolution, BACKSTAB_DAMAGE,
    SABOTAGE_DISCARDS,
};
