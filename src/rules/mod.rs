//! Game rules.
//!
//! - `validation`: what a player may do right now
//! - `outcome`: whether the game is over, and who won

mod outcome;
mod validation;

pub use outcome::{check_outcome, detect_draw, detect_win, Outcome};
pub use validation::{validate_fort_discard, validate_pass, validate_play, validate_spy_hand};
