//! Self-play simulator CLI.
//!
//! Drives complete games in memory through the engine facade with scripted
//! bot policies, checks engine invariants along the way, and prints per-seat
//! win/score statistics.

mod simulator;

use std::collections::BTreeMap;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use simulator::{GameReport, Policy, Simulator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "In-memory self-play simulator for the card game engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; per-game seeds are derived from it. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Bot policy for all four seats
    #[arg(long, value_enum, default_value = "greedy")]
    policy: Policy,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Derive a 32-byte shuffle seed for one game from the base seed, or take
/// fresh OS entropy when no base was given.
fn game_seed(base: Option<u64>, game_no: u32) -> [u8; 32] {
    match base {
        Some(base) => {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&base.wrapping_add(u64::from(game_no)).to_le_bytes());
            seed
        }
        None => rand::random(),
    }
}

#[derive(Default)]
struct Stats {
    wins_by_slot: [u32; PLAYERS],
    score_by_slot: [i64; PLAYERS],
    outcomes: BTreeMap<String, u32>,
    total_steps: u64,
}

const PLAYERS: usize = 4;

impl Stats {
    fn record(&mut self, report: &GameReport) {
        self.wins_by_slot[report.winner_slot as usize] += 1;
        for score in report.score_result.final_scores.iter() {
            // Ids 1..=4 are seated at slots 0..=3.
            let slot = (score.id - 1) as usize;
            self.score_by_slot[slot] += i64::from(
                report.score_result.score_changes[&score.id],
            );
        }
        *self
            .outcomes
            .entry(report.outcome.label().to_string())
            .or_default() += 1;
        self.total_steps += report.steps as u64;
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    info!(games = args.games, policy = ?args.policy, seed = ?args.seed, "starting simulation");

    let start = Instant::now();
    let mut stats = Stats::default();
    let mut failures = 0u32;

    for game_no in 1..=args.games {
        let seed = game_seed(args.seed, game_no);
        let mut sim = Simulator::new(game_no, args.policy, seed);
        match sim.run(seed) {
            Ok(report) => {
                if args.verbose > 0 {
                    match serde_json::to_string(&report.score_result) {
                        Ok(json) => info!(game_no, steps = report.steps, result = %json, "game finished"),
                        Err(err) => warn!(game_no, %err, "result serialization failed"),
                    }
                }
                stats.record(&report);
            }
            Err(err) => {
                failures += 1;
                warn!(game_no, %err, "game failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let completed = args.games - failures;

    println!("simulated {completed}/{} games in {elapsed:.2?}", args.games);
    if completed > 0 {
        println!(
            "average actions per game: {:.1}",
            stats.total_steps as f64 / f64::from(completed)
        );
        println!("wins by seat:");
        for (slot, wins) in stats.wins_by_slot.iter().enumerate() {
            println!(
                "  seat {slot}: {wins} wins, total score {}",
                stats.score_by_slot[slot]
            );
        }
        println!("outcomes:");
        for (label, count) in &stats.outcomes {
            println!("  {label}: {count}");
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
