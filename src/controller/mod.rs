//! The public call surface.
//!
//! ## Concurrency
//!
//! One `parking_lot::Mutex` guards the game, the current turn, and the
//! listener set. Every operation holds it from validation to broadcast,
//! so observers never see a half-applied change. The turn loop shares the
//! same lock and gives it up only while waiting on the condition variable
//! for players to pass.
//!
//! ## Operations
//!
//! | Operation | Who | When |
//! |-----------|-----|------|
//! | `join` | anyone | lobby |
//! | `start` | anyone | lobby, 2+ players |
//! | `play_card` | active player / any responder | in progress |
//! | `pass_priority` | active player / any responder | in progress |
//! | `discard_fort` | Fort owner, Attack on top | in progress |
//! | `spy_hand` | active player | in progress |
//! | `snapshot`, `register_listener` | anyone | always |

mod handle;
mod turn_loop;
mod view;

pub use handle::{Controller, Phase, TURN_LOOP_THREAD};
pub use view::{GameView, PlayerView, TurnView};
