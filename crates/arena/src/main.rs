//! Code Reversi CLI
//!
//! Play a script against a CPU rank, run series between ranks and show
//! unlocked ranks.

use anyhow::{bail, Context, Result};
use arena::{
    quick_series, ArenaConfig, GameController, GameEvent, JsonProgressStore, Progress,
    ProgressStore, Rank,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Code Reversi battle arena", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a script against a CPU rank
    Play {
        /// Script defining `fn decide_move(board, my_color)`
        #[arg(short, long)]
        script: PathBuf,

        /// Opponent: E, C, A or S (or novice, apprentice, expert, master)
        #[arg(short, long, default_value = "E")]
        rank: Rank,

        /// TOML file with arena and sandbox settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,

        /// Progress file (defaults to the user data directory)
        #[arg(long)]
        progress: Option<PathBuf>,

        /// Play a rank that is still locked
        #[arg(long)]
        force: bool,
    },

    /// Play CPU ranks against each other
    Series {
        #[arg(long, default_value = "S")]
        black: Rank,

        #[arg(long, default_value = "A")]
        white: Rank,

        #[arg(short, long, default_value_t = 10)]
        games: u32,
    },

    /// List ranks and which ones are unlocked
    Ranks {
        #[arg(long)]
        progress: Option<PathBuf>,
    },
}

fn progress_store(path: Option<PathBuf>) -> JsonProgressStore {
    path.map(JsonProgressStore::new)
        .unwrap_or_else(JsonProgressStore::default_location)
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::GameStart {
            board,
            cpu_rank,
            human_color,
        } => {
            println!("=== You ({human_color}) vs {} ===", cpu_rank.title());
            println!("{board}");
        }
        GameEvent::TurnStart {
            player,
            turn_number,
            ..
        } => println!("Turn {turn_number}: {player} to move"),
        GameEvent::MoveMade {
            board,
            player,
            position,
            flipped,
            execution_time_ms,
        } => {
            println!(
                "{player} plays {position}, flips {} ({execution_time_ms}ms)",
                flipped.len()
            );
            println!("{board}");
        }
        GameEvent::Pass { player } => println!("{player} has no legal move and passes"),
        GameEvent::PlayerError { error, kind } => println!("Error ({kind}): {error}"),
        GameEvent::GameEnd { result, .. } => {
            println!();
            println!("=== Final Result ===");
            println!(
                "Winner: {} ({} - {}) after {} turns{}",
                result.winner,
                result.black_score,
                result.white_score,
                result.total_turns,
                if result.forfeit { ", by forfeit" } else { "" }
            );
        }
    }
}

async fn run_play(
    script: PathBuf,
    rank: Rank,
    config: Option<PathBuf>,
    json: bool,
    progress_path: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let store = progress_store(progress_path);
    let mut progress = store.load()?;
    if !progress.is_unlocked(rank) && !force {
        bail!("{} is locked. Beat the rank below it first, or pass --force", rank.title());
    }

    let source = std::fs::read_to_string(&script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let config = match config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    let human = config.human_color;

    let mut handle = GameController::new(source.clone(), rank, config).spawn();
    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(event) if json => println!("{}", serde_json::to_string(&event)?),
                Some(event) => print_event(&event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted, cancelling match");
                handle.cancel();
                break;
            }
        }
    }
    let result = handle.join().await?;

    progress.last_code = Some(source);
    if let Some(unlocked) = progress.apply_result(rank, human, &result) {
        info!(rank = %unlocked, "rank unlocked");
        if !json {
            println!("{} unlocked!", unlocked.title());
        }
    }
    store.save(&progress)?;
    Ok(())
}

fn run_series(black: Rank, white: Rank, games: u32) -> Result<()> {
    println!("=== Series: {} vs {} ===", black.title(), white.title());
    println!("Games: {games}");
    println!();

    let result = quick_series(black, white, games)?;

    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        black.title(),
        result.wins,
        result.losses,
        result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);
    Ok(())
}

fn show_ranks(progress_path: Option<PathBuf>) -> Result<()> {
    let progress: Progress = progress_store(progress_path).load()?;
    for rank in Rank::ORDER {
        let status = if progress.is_unlocked(rank) { "unlocked" } else { "locked" };
        println!(
            "{:<22} {:<9} wins: {}",
            rank.title(),
            status,
            progress.wins_against(rank)
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,script=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play {
            script,
            rank,
            config,
            json,
            progress,
            force,
        } => run_play(script, rank, config, json, progress, force).await,
        Command::Series {
            black,
            white,
            games,
        } => {
            tokio::task::spawn_blocking(move || run_series(black, white, games)).await?
        }
        Command::Ranks { progress } => show_ranks(progress),
    }
}
