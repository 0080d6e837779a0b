//! Core engine types: players, actions, game state, RNG, configuration,
//! errors.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Action;
pub use config::{EngineConfig, DEFAULT_PRIORITY_TIMEOUT, MAX_PLAYERS, MIN_PLAYERS};
pub use error::GameError;
pub use player::{Hand, Player, PlayerId, BASE_HAND_LIMIT, STARTING_HEALTH};
pub use rng::GameRng;
pub use state::Game;
