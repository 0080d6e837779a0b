//! The turn-cycling loop.
//!
//! Runs on its own thread for the life of a started game and holds the
//! lock except while waiting for priority. A turn is a series of
//! decision rounds:
//!
//! 1. Wait until every seat has passed. Each wake-up restarts the
//!    window; a window that expires counts as everyone passing.
//! 2. Empty stack: the turn is over. Otherwise resolve the whole stack,
//!    check for a winner or a draw, and open a new round.
//!
//! A turn starts with no passes and the count is only reset after a
//! resolution, so a pass taken while this thread waits for the lock is
//! still counted.
//!
//! At the end of a turn the active player (if still alive) draws up to
//! their hand limit and play moves to the next living seat.

use std::sync::Arc;

use parking_lot::MutexGuard;
use tracing::debug;

use super::handle::{Shared, Table};
use crate::effects::{draw_to_hand_limit, resolve_stack};
use crate::events::Event;
use crate::rules::{check_outcome, Outcome};

/// How a turn's decision rounds ended.
enum TurnEnd {
    /// The active player's turn is over; move on.
    Passed,
    /// The game is over, or nobody is left to drive it.
    Stopped,
}

/// Drive turns until the game finishes.
pub(crate) fn cycle_turns(shared: Arc<Shared>) {
    let mut table = shared.table.lock();
    debug!("turn loop running");

    loop {
        let Some(active) = table.turn.as_ref().map(|t| t.player) else {
            debug!("no turn installed, turn loop exiting");
            return;
        };

        match run_decision_rounds(&shared, &mut table) {
            TurnEnd::Passed => {}
            TurnEnd::Stopped => return,
        }

        let Table { game, listeners, .. } = &mut *table;
        if game.player(active).map_or(false, |p| p.is_alive()) {
            draw_to_hand_limit(game, active, listeners);
        }
        listeners.broadcast(Event::state_update());

        match table.game.next_alive_after(active) {
            Some(next) => table.begin_turn(next),
            None => {
                table.finish(Outcome::Draw);
                return;
            }
        }
    }
}

fn run_decision_rounds(shared: &Arc<Shared>, table: &mut MutexGuard<'_, Table>) -> TurnEnd {
    let timeout = shared.config.priority_timeout;

    loop {
        loop {
            match table.turn.as_ref() {
                Some(turn) if turn.is_passed() => break,
                Some(_) => {}
                None => return TurnEnd::Stopped,
            }
            if shared.wake.wait_for(table, timeout).timed_out() {
                // Only this thread still holds the game: every handle is gone.
                if Arc::strong_count(shared) == 1 {
                    debug!("controller dropped, turn loop exiting");
                    return TurnEnd::Stopped;
                }
                debug!("priority window expired");
                if let Some(turn) = table.turn.as_mut() {
                    turn.pass_all();
                }
            }
        }

        let Table {
            game,
            turn: Some(turn),
            listeners,
            ..
        } = &mut **table
        else {
            return TurnEnd::Stopped;
        };
        if turn.stack.is_empty() {
            return TurnEnd::Passed;
        }

        resolve_stack(game, turn, listeners);
        turn.reset_passes();
        if let Some(outcome) = check_outcome(game) {
            table.finish(outcome);
            return TurnEnd::Stopped;
        }
    }
}
