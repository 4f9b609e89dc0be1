//! Headless pit runner (default binary).
//!
//! Plays one session with the placement planner on a fixed timestep and
//! logs what happens. Usage:
//!
//! ```text
//! pit-sim [config.json|-] [seed] [max_pieces]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use blockout_pit::core::{PitConfig, PitEvent, Session, SpecialOutcome};
use blockout_pit::place::{apply_place, best_placement};
use blockout_pit::types::TICK_MS;

const DEFAULT_SEED: u32 = 1;
const DEFAULT_MAX_PIECES: u32 = 500;
/// Fixed ticks simulated before each placement
const THINK_TICKS: u32 = 8;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => load_config(Path::new(&path))?,
        _ => PitConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse().context("seed must be an unsigned integer")?,
        None => DEFAULT_SEED,
    };
    let max_pieces = match args.next() {
        Some(s) => s.parse().context("max_pieces must be an unsigned integer")?,
        None => DEFAULT_MAX_PIECES,
    };

    let mut session = Session::new(config, seed)?;
    run(&mut session, max_pieces);
    Ok(())
}

fn load_config(path: &Path) -> Result<PitConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: PitConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[derive(Debug, Default)]
struct Tally {
    specials_cleared: u32,
    penalties: u32,
    full_clears: u32,
}

fn run(session: &mut Session, max_pieces: u32) {
    let mut tally = Tally::default();
    session.start();

    while session.is_running() && session.blocks_placed() < max_pieces {
        for _ in 0..THINK_TICKS {
            session.tick(TICK_MS);
        }
        record(&mut tally, session.drain_events());
        if !session.is_running() {
            break;
        }

        match best_placement(session) {
            Some(placement) => {
                if let Err(err) = apply_place(session, placement) {
                    tracing::warn!(code = err.code(), "{}", err.message());
                    session.drop_piece();
                }
            }
            None => {
                tracing::warn!("no legal placement, dropping in place");
                session.drop_piece();
            }
        }
        record(&mut tally, session.drain_events());
    }

    let snapshot = session.snapshot();
    tracing::info!(
        score = snapshot.score,
        level = snapshot.level,
        blocks = snapshot.blocks_placed,
        layers = snapshot.layers_cleared,
        phase = ?snapshot.phase,
        "run finished"
    );
    println!(
        "score {} | level {} | blocks {} | layers {} | specials {} cleared / {} penalties | full clears {}",
        snapshot.score,
        snapshot.level,
        snapshot.blocks_placed,
        snapshot.layers_cleared,
        tally.specials_cleared,
        tally.penalties,
        tally.full_clears,
    );
}

fn record(tally: &mut Tally, events: Vec<PitEvent>) {
    for event in events {
        match event {
            PitEvent::SpecialTriggered(SpecialOutcome::Clearing { .. }) => {
                tally.specials_cleared += 1
            }
            PitEvent::SpecialTriggered(SpecialOutcome::Penalty { .. }) => tally.penalties += 1,
            PitEvent::PitCleared { .. } => tally.full_clears += 1,
            PitEvent::PieceSpawned { shape, special, .. } => {
                tracing::debug!(%shape, special, "next piece")
            }
            _ => {}
        }
    }
}
