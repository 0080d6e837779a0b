//! # oracle-engine
//!
//! Rules engine for Oracle, a social-deduction card game for two to five
//! players with hidden roles, a shared 56-card deck, and a LIFO action
//! stack answered by response cards.
//!
//! ## Design Principles
//!
//! 1. **One game, one monitor**: a [`Controller`] owns a single game behind
//!    one lock. Every operation validates before it mutates, so a rejected
//!    intent leaves no trace.
//!
//! 2. **Closed card set**: [`Card`] is a plain enum and every
//!    classification is a `const fn` on it.
//!
//! 3. **Reproducible**: all randomness flows through one seeded
//!    [`GameRng`], so a seed replays a game's card flow exactly.
//!
//! ## Modules
//!
//! - `core`: players, actions, game state, RNG, configuration, errors
//! - `cards`: card and role catalog, deck construction
//! - `stack`: per-turn priority bookkeeping and the action stack
//! - `effects`: stack resolution and reported draws
//! - `rules`: intent validation, win and draw detection
//! - `events`: notifications and listener fan-out
//! - `controller`: the public call surface and the turn loop

pub mod cards;
pub mod controller;
pub mod core;
pub mod effects;
pub mod events;
pub mod rules;
pub mod stack;

// Re-export commonly used types
pub use crate::core::{Action, EngineConfig, Game, GameError, GameRng, Player, PlayerId};

pub use crate::cards::{Card, Role, DECK_SIZE};

pub use crate::stack::CurrentTurn;

pub use crate::effects::{resolve_stack, Resolution};

pub use crate::rules::Outcome;

pub use crate::events::{Event, EventData, EventName, EventStream};

pub use crate::controller::{Controller, GameView, Phase, PlayerView, TurnView};
