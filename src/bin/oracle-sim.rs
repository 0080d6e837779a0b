//! Oracle Headless Simulation
//!
//! Seats five random bots and drives one full game through the public
//! controller API, the way a transport adapter would.
//!
//! Usage:
//!   cargo run --bin oracle-sim
//!   cargo run --bin oracle-sim -- --verbose --seed 7
//!
//! Logging is controlled by `ORACLE_LOG` (default `warn`).

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use oracle_engine::core::{EngineConfig, GameRng, MAX_PLAYERS};
use oracle_engine::{Card, Controller, EventName, GameView, PlayerId};
use tracing_subscriber::EnvFilter;

/// Short implicit-pass window so idle responders never stall the game.
const SIM_PRIORITY_TIMEOUT: Duration = Duration::from_millis(30);

/// Pause between bot ticks.
const TICK: Duration = Duration::from_millis(2);

/// Give up after this many ticks.
const MAX_TICKS: usize = 50_000;

/// Chance (in percent) that a bot answers a stack it could answer.
const RESPONSE_CHANCE: usize = 35;

// ── Arguments ───────────────────────────────────────────────────────────

struct Args {
    verbose: bool,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args { verbose: false, seed: None };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--seed" => args.seed = iter.next().and_then(|s| s.parse().ok()),
            other => eprintln!("ignoring unknown argument {other}"),
        }
    }
    args
}

// ── Bots ────────────────────────────────────────────────────────────────

/// Pick a living target for `card`, if it needs one.
fn pick_target(rng: &mut GameRng, view: &GameView, me: PlayerId, card: Card) -> Option<PlayerId> {
    if !card.targets_a_player() {
        return None;
    }
    let candidates: Vec<PlayerId> = view
        .players
        .iter()
        .enumerate()
        .filter(|(idx, p)| *idx != me.index() && p.health > 0 && !p.has_barrier)
        .filter(|(_, p)| !card.targets_a_building() || !p.buildings.is_empty())
        .map(|(idx, _)| PlayerId::new(idx as u8))
        .collect();
    rng.choose_index(candidates.len()).map(|i| candidates[i])
}

/// The active player opens a window with a random card, or ends the turn.
fn act(controller: &Controller, rng: &mut GameRng, me: PlayerId, view: &GameView, verbose: bool) {
    let hand = view.players[me.index()].hand.clone().unwrap_or_default();
    let playable: Vec<Card> = hand.into_iter().filter(|c| !c.is_response()).collect();

    if let Some(i) = rng.choose_index(playable.len()) {
        let card = playable[i];
        let target = pick_target(rng, view, me, card);
        let building = target.and_then(|t| {
            let buildings = &view.players[t.index()].buildings;
            card.targets_a_building()
                .then(|| rng.choose_index(buildings.len()).map(|b| buildings[b]))
                .flatten()
        });
        match controller.play_card(me, card, target, building) {
            Ok(()) => {
                if verbose {
                    let on = target.map(|t| format!(" on {t}")).unwrap_or_default();
                    println!("  {me} plays {card}{on}");
                }
                return;
            }
            Err(err) if verbose => println!("  {me} cannot play {card}: {err}"),
            Err(_) => {}
        }
    }

    if controller.pass_priority(me).is_ok() && verbose {
        println!("  {me} ends their turn");
    }
}

/// Every seat answers or passes a stack once.
fn respond(controller: &Controller, rng: &mut GameRng, me: PlayerId, view: &GameView, verbose: bool) {
    let answer = rng.gen_range_usize(0..100) < RESPONSE_CHANCE;
    if answer {
        let hand = view.players[me.index()].hand.clone().unwrap_or_default();
        for card in hand.into_iter().filter(|c| c.is_response()) {
            if controller.play_card(me, card, None, None).is_ok() {
                if verbose {
                    println!("  {me} responds with {card}");
                }
                return;
            }
        }
        if controller.discard_fort(me).is_ok() {
            if verbose {
                println!("  {me} discards a Fort");
            }
            return;
        }
    }
    let _ = controller.pass_priority(me);
}

// ── Driver ──────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("ORACLE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = parse_args();
    println!("=== Oracle Simulation ===\n");

    let mut config = EngineConfig::from_env().with_priority_timeout(SIM_PRIORITY_TIMEOUT);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    let config = config.with_seed(seed);
    let mut rng = GameRng::new(seed.wrapping_add(1));

    let controller = Controller::new(config);
    let mut events = controller.register_listener();
    let seats: Vec<PlayerId> = (0..MAX_PLAYERS).filter_map(|_| controller.join().ok()).collect();
    if let Err(err) = controller.start() {
        eprintln!("failed to start: {err}");
        std::process::exit(1);
    }
    println!("seed {seed}, {} players", seats.len());

    let began = Instant::now();
    let mut answered: HashMap<PlayerId, (u64, Vec<Card>)> = HashMap::new();
    let mut window: u64 = 0;
    let mut counts: HashMap<EventName, usize> = HashMap::new();
    let mut result = None;

    for _ in 0..MAX_TICKS {
        while let Ok(event) = events.try_recv() {
            *counts.entry(event.name).or_default() += 1;
            if event.is_game_over() {
                result = Some(event);
            }
        }
        if result.is_some() {
            break;
        }

        let Ok(view) = controller.snapshot(seats[0]) else { break };
        let Some(turn) = view.current_turn.clone() else {
            thread::sleep(TICK);
            continue;
        };

        if turn.stack.is_empty() {
            window += 1;
            if let Ok(own) = controller.snapshot(turn.player_id) {
                act(&controller, &mut rng, turn.player_id, &own, args.verbose);
            }
        } else {
            for &seat in &seats {
                let key = (window, turn.stack.clone());
                if answered.get(&seat) == Some(&key) {
                    continue;
                }
                answered.insert(seat, key);
                if let Ok(own) = controller.snapshot(seat) {
                    respond(&controller, &mut rng, seat, &own, args.verbose);
                }
            }
        }
        thread::sleep(TICK);
    }

    // ── Summary ──
    println!();
    match result {
        Some(event) if event.name == EventName::Win => {
            let winners = event.data.winner_ids.unwrap_or_default();
            let names: Vec<String> = winners
                .iter()
                .filter_map(|id| {
                    controller
                        .inspect(|game, _| game.player(*id).ok().and_then(|p| p.role))
                        .map(|role| format!("{id} ({role})"))
                })
                .collect();
            println!("Winners: {}", names.join(", "));
        }
        Some(_) => println!("The game ended in a draw."),
        None => println!("No result after {MAX_TICKS} ticks."),
    }
    println!("Elapsed: {:.2?}", began.elapsed());
    let mut tally: Vec<_> = counts.into_iter().collect();
    tally.sort_by_key(|(name, _)| format!("{name:?}"));
    for (name, count) in tally {
        println!("  {name:?}: {count}");
    }
}
