//! Command-line front end for the equity engine.
//!
//! Usage:
//!   cargo run --release --bin equity -- equity AhKs --board "Qh Jh 2c" --opponents 3
//!   cargo run --release --bin equity -- classify KdAd
//!   cargo run --release --bin equity -- texture 9s8s --flops 500
//!   cargo run --release --bin equity -- analyze AsKs --json
//!
//! Global options: `--seed`, `--threads`, `--batch-size`, `--json`, `--verbose`.
//! Log output honours `RUST_LOG`.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;

use poker_equity::api::{BatchRequest, Engine, EquityRequest};
use poker_equity::cards::{parse_cards, Card};
use poker_equity::preflop::GtoAdvice;
use poker_equity::sim::{
    EquityResult, SimConfig, TextureReport, TrialPreset, DEFAULT_FLOP_SAMPLES,
    DEFAULT_TRIALS_PER_FLOP,
};

#[derive(Parser)]
#[command(name = "equity")]
#[command(about = "Monte Carlo hold'em equity and preflop advice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Random seed for reproducible results
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Worker threads (default: all cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Trials per parallel batch
    #[arg(long, global = true, default_value_t = 1000)]
    batch_size: usize,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate equity against random opponents
    Equity {
        /// Hero's hole cards, e.g. "AhKs"
        hero: String,
        /// Known board cards: none, flop, turn or river
        #[arg(short, long, default_value = "")]
        board: String,
        /// Number of opponents (1-9)
        #[arg(short, long, default_value_t = 1)]
        opponents: usize,
        /// Monte Carlo trials
        #[arg(short = 'n', long, default_value_t = TrialPreset::Manual.trials())]
        trials: u32,
    },
    /// Preflop category, table ranking and suggested action
    Classify {
        /// Hero's hole cards
        hero: String,
    },
    /// Average equity per flop texture
    Texture {
        /// Hero's hole cards
        hero: String,
        /// Number of opponents (1-9)
        #[arg(short, long, default_value_t = 1)]
        opponents: usize,
        /// Flops to sample
        #[arg(long, default_value_t = DEFAULT_FLOP_SAMPLES)]
        flops: u32,
        /// Trials per sampled flop
        #[arg(long, default_value_t = DEFAULT_TRIALS_PER_FLOP)]
        trials_per_flop: u32,
    },
    /// Preflop equity, advice and flop textures together
    Analyze {
        /// Hero's hole cards
        hero: String,
        /// Number of opponents (1-9)
        #[arg(short, long, default_value_t = 1)]
        opponents: usize,
        /// Flops to sample
        #[arg(long, default_value_t = DEFAULT_FLOP_SAMPLES)]
        flops: u32,
        /// Trials per sampled flop
        #[arg(long, default_value_t = DEFAULT_TRIALS_PER_FLOP)]
        trials_per_flop: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = SimConfig {
        seed: cli.seed,
        num_threads: cli.threads,
        batch_size: cli.batch_size,
    };
    let engine = Engine::new(config).context("invalid simulator configuration")?;
    let start = Instant::now();

    match cli.command {
        Commands::Equity {
            hero,
            board,
            opponents,
            trials,
        } => {
            let request = EquityRequest {
                hero: codes(&hero)?,
                board: codes(&board)?,
                opponents,
                trials,
            };
            let result = engine.compute_equity(&request)?;
            emit(cli.json, &result, || print_equity(&request, &result))?;
        }
        Commands::Classify { hero } => {
            let advice = engine.classify_hand(&codes(&hero)?)?;
            emit(cli.json, &advice, || print_advice(&advice))?;
        }
        Commands::Texture {
            hero,
            opponents,
            flops,
            trials_per_flop,
        } => {
            let request = BatchRequest {
                hero: codes(&hero)?,
                opponents,
                flop_samples: flops,
                trials_per_flop,
            };
            let bar = flop_progress(flops, cli.json)?;
            let report =
                engine.compute_board_texture_batch_with_progress(&request, || bar.inc(1))?;
            bar.finish_and_clear();
            emit(cli.json, &report, || print_textures(&report))?;
        }
        Commands::Analyze {
            hero,
            opponents,
            flops,
            trials_per_flop,
        } => {
            let request = BatchRequest {
                hero: codes(&hero)?,
                opponents,
                flop_samples: flops,
                trials_per_flop,
            };
            let bar = flop_progress(flops, cli.json)?;
            let analysis = engine.analyze_hand_with_progress(&request, || bar.inc(1))?;
            bar.finish_and_clear();
            emit(cli.json, &analysis, || {
                println!("Preflop vs {} opponent(s)", opponents);
                print_result(&analysis.preflop);
                print_advice(&analysis.advice);
                println!();
                print_textures(&analysis.textures);
            })?;
        }
    }

    info!("done in {:.2?}", start.elapsed());
    Ok(())
}

/// Split a run of card codes into individual codes.
fn codes(text: &str) -> Result<Vec<String>> {
    let cards = parse_cards(text).with_context(|| format!("could not read cards {:?}", text))?;
    Ok(cards.iter().map(Card::to_string).collect())
}

/// Progress bar over sampled flops; hidden for JSON output.
fn flop_progress(flops: u32, json: bool) -> Result<ProgressBar> {
    if json {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(flops as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} flops [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

/// Print `value` as JSON, or run the human-readable printer.
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

fn pretty(codes: &[String]) -> String {
    codes
        .iter()
        .filter_map(|c| c.parse::<Card>().ok())
        .map(|c| c.pretty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_equity(request: &EquityRequest, result: &EquityResult) {
    if request.board.is_empty() {
        println!("{} vs {} opponent(s)", pretty(&request.hero), request.opponents);
    } else {
        println!(
            "{} on {} vs {} opponent(s)",
            pretty(&request.hero),
            pretty(&request.board),
            request.opponents
        );
    }
    print_result(result);
}

fn print_result(result: &EquityResult) {
    println!("  Equity: {:>6.2}%", result.equity);
    println!(
        "  Win {:.2}%  Tie {:.2}%  Lose {:.2}%  ({} trials)",
        result.win, result.tie, result.lose, result.trials
    );
}

fn print_advice(advice: &GtoAdvice) {
    println!("  {}", advice);
}

fn print_textures(report: &TextureReport) {
    println!("{:<16}{:>8}{:>8}", "Texture", "Equity", "Flops");
    for (texture, stats) in report.iter() {
        println!("{:<16}{:>7.1}%{:>8}", texture.label(), stats.avg, stats.count);
    }
}
