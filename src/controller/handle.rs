//! The controller: one game behind a monitor.
//!
//! Callers on any thread invoke operations on a cloned [`Controller`]; each
//! operation takes the lock for its whole duration, validates, mutates,
//! broadcasts, and wakes the turn loop before releasing it.

use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info};

use super::turn_loop;
use super::view::GameView;
use crate::cards::{Card, Role};
use crate::core::{Action, EngineConfig, Game, GameError, GameRng, PlayerId, MIN_PLAYERS};
use crate::effects::draw_to_hand_limit;
use crate::events::{Event, EventStream, ListenerRegistry};
use crate::rules::{validate_fort_discard, validate_pass, validate_play, validate_spy_hand, Outcome};
use crate::stack::CurrentTurn;

/// Name of the background thread running the turn loop.
pub const TURN_LOOP_THREAD: &str = "oracle-turns";

/// Where the game is in its single lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Accepting players.
    Lobby,
    /// Roles dealt, turns cycling.
    InProgress,
    /// Someone won, or the game was drawn.
    Finished,
}

/// Everything guarded by the lock.
#[derive(Debug)]
pub(crate) struct Table {
    pub(crate) game: Game,
    pub(crate) turn: Option<CurrentTurn>,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) phase: Phase,
}

impl Table {
    /// The parts an in-game operation touches, or the lifecycle error.
    fn in_play(&mut self) -> Result<(&mut Game, &mut CurrentTurn, &mut ListenerRegistry), GameError> {
        match (self.phase, self.turn.as_mut()) {
            (_, Some(turn)) => Ok((&mut self.game, turn, &mut self.listeners)),
            (Phase::Finished, None) => Err(GameError::GameOver),
            (_, None) => Err(GameError::NotStarted),
        }
    }

    /// Install a fresh turn for `player` and announce it.
    pub(crate) fn begin_turn(&mut self, player: PlayerId) {
        for p in &mut self.game.players {
            p.has_barrier = false;
        }
        self.turn = Some(CurrentTurn::new(player, self.game.player_count()));
        info!(%player, "turn started");
        self.listeners.broadcast(Event::turn_started(player));
    }

    /// End the game with `outcome`.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        let event = match outcome {
            Outcome::Winners(winners) => {
                info!(?winners, "game won");
                Event::win(winners)
            }
            Outcome::Draw => {
                info!("game drawn");
                Event::draw()
            }
        };
        self.turn = None;
        self.phase = Phase::Finished;
        self.listeners.broadcast(event);
    }
}

/// Lock, wake-up signal, and the settings the turn loop reads.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) table: Mutex<Table>,
    pub(crate) wake: Condvar,
    pub(crate) config: EngineConfig,
}

/// Handle to a single game. Cheap to clone; all clones drive the same game.
///
/// ```no_run
/// use oracle_engine::controller::Controller;
/// use oracle_engine::core::EngineConfig;
///
/// let controller = Controller::new(EngineConfig::from_env());
/// let alice = controller.join()?;
/// let bob = controller.join()?;
/// controller.start()?;
/// let view = controller.snapshot(alice)?;
/// assert_eq!(view.players.len(), 2);
/// # let _ = bob;
/// # Ok::<(), oracle_engine::core::GameError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Controller {
    shared: Arc<Shared>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Controller {
    /// An empty lobby with a freshly shuffled deck.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::from_game(config, Game::new(rng))
    }

    /// A lobby around a prepared game. Players already seated stay seated.
    #[must_use]
    pub fn from_game(config: EngineConfig, game: Game) -> Self {
        let table = Table {
            game,
            turn: None,
            listeners: ListenerRegistry::new(),
            phase: Phase::Lobby,
        };
        Self {
            shared: Arc::new(Shared {
                table: Mutex::new(table),
                wake: Condvar::new(),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.table.lock().phase
    }

    /// Run `f` against the game and the current turn under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Game, Option<&CurrentTurn>) -> R) -> R {
        let table = self.shared.table.lock();
        f(&table.game, table.turn.as_ref())
    }

    // === Lifecycle ===

    /// Take the next free seat.
    pub fn join(&self) -> Result<PlayerId, GameError> {
        let mut table = self.shared.table.lock();
        if table.phase != Phase::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        let id = table.game.add_player()?;
        info!(player = %id, "player joined");
        table.listeners.broadcast(Event::state_update());
        Ok(id)
    }

    /// Deal roles and hands, then hand the game to the turn loop.
    ///
    /// Returns once the first turn is installed; the loop runs on its own
    /// thread from then on.
    pub fn start(&self) -> Result<(), GameError> {
        let mut guard = self.shared.table.lock();
        match guard.phase {
            Phase::Lobby => {}
            Phase::InProgress => return Err(GameError::AlreadyStarted),
            Phase::Finished => return Err(GameError::GameOver),
        }
        if guard.game.player_count() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }

        // The loop blocks on the lock until this operation returns.
        let shared = Arc::clone(&self.shared);
        thread::Builder::new()
            .name(TURN_LOOP_THREAD.to_owned())
            .spawn(move || turn_loop::cycle_turns(shared))
            .map_err(|err| GameError::TurnLoopUnavailable(err.to_string()))?;

        let table = &mut *guard;
        table.phase = Phase::InProgress;
        table.game.assign_roles();
        for id in table.game.player_ids().collect::<Vec<_>>() {
            draw_to_hand_limit(&mut table.game, id, &mut table.listeners);
        }
        table.listeners.broadcast(Event::state_update());
        info!(players = table.game.player_count(), seed = table.game.rng.seed(), "game started");

        let crown = table.game.player_with_role(Role::TheCrown).unwrap_or(PlayerId::new(0));
        match table.game.next_alive_from(crown) {
            Some(first) => table.begin_turn(first),
            None => table.finish(Outcome::Draw),
        }
        Ok(())
    }

    // === Player intents ===

    /// Play `card` from `player`'s hand onto the stack.
    pub fn play_card(
        &self,
        player: PlayerId,
        card: Card,
        target_player: Option<PlayerId>,
        target_building: Option<Card>,
    ) -> Result<(), GameError> {
        let mut table = self.shared.table.lock();
        let (game, turn, listeners) = table.in_play()?;
        let action = validate_play(game, turn, player, card, target_player, target_building)?;

        if !game.player_mut(player)?.take_from_hand(card) {
            return Err(GameError::CardNotInHand);
        }
        debug!(?action, "card played");
        turn.push(action);
        listeners.broadcast(Event::card_played(player, card));
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Pass priority.
    ///
    /// On an empty stack the active player ends the turn. On a non-empty
    /// stack any player may pass the response window.
    pub fn pass_priority(&self, player: PlayerId) -> Result<(), GameError> {
        let mut table = self.shared.table.lock();
        let (game, turn, _) = table.in_play()?;
        validate_pass(game, turn, player)?;

        if turn.stack.is_empty() {
            turn.pass_all();
        } else {
            turn.record_pass();
        }
        debug!(%player, passes = turn.pass_count, "priority passed");
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Sacrifice a Fort to counter the Attack on top of the stack.
    pub fn discard_fort(&self, player: PlayerId) -> Result<(), GameError> {
        let mut table = self.shared.table.lock();
        let (game, turn, listeners) = table.in_play()?;
        validate_fort_discard(game, turn, player)?;

        if !game.player_mut(player)?.take_building(Card::Fort) {
            return Err(GameError::NoFort);
        }
        game.discard(Card::Fort);
        turn.push(Action::fort_discard(player));
        debug!(%player, "fort discarded");
        listeners.broadcast(Event::state_update());
        self.shared.wake.notify_one();
        Ok(())
    }

    /// The hand revealed by the last Spy this turn.
    pub fn spy_hand(&self, player: PlayerId) -> Result<Vec<Card>, GameError> {
        let mut table = self.shared.table.lock();
        let (game, turn, _) = table.in_play()?;
        validate_spy_hand(game, turn, player)?;
        Ok(turn.spy_hand.clone())
    }

    // === Observation ===

    /// The game as `player` may see it. Available in every phase.
    pub fn snapshot(&self, player: PlayerId) -> Result<GameView, GameError> {
        let table = self.shared.table.lock();
        GameView::build(&table.game, table.turn.as_ref(), player)
    }

    /// Subscribe to every event broadcast from now on.
    pub fn register_listener(&self) -> EventStream {
        self.shared.table.lock().listeners.register()
    }
}
