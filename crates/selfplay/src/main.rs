//! Self-play and arena driver for the ox board.
//!
//! `play` pits two time-budgeted MCTS bots against each other and prints the
//! board after every move. `arena` plays many fixed-playout games in
//! parallel between two bots and reports the tally.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ox_core::GameState;
use ox_mcts::{
    games::{Board, Cell, Mark},
    Agent, MctsConfig, RolloutEvaluator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

type BoardAgent = Agent<Board, RolloutEvaluator<ChaCha8Rng>, ChaCha8Rng>;

/// Ox board MCTS self-play tool.
#[derive(Parser)]
#[command(name = "ox-selfplay")]
#[command(about = "Play k-in-a-row games between MCTS bots")]
struct Cli {
    /// TOML file with search parameters.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two time-budgeted bots, printing every move.
    Play {
        /// Board side length.
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Marks in a row needed to win.
        #[arg(short, long, default_value = "3")]
        win_length: usize,

        /// Seconds per move for X.
        #[arg(long, default_value = "1.0")]
        time_x: f64,

        /// Seconds per move for O.
        #[arg(long, default_value = "1.0")]
        time_o: f64,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Play many games between two fixed-playout bots.
    Arena {
        /// Number of games to play.
        #[arg(short, long, default_value = "20")]
        games: usize,

        /// Board side length.
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Marks in a row needed to win.
        #[arg(short, long, default_value = "3")]
        win_length: usize,

        /// Playouts per move for bot A.
        #[arg(long, default_value = "1000")]
        playouts_a: usize,

        /// Playouts per move for bot B.
        #[arg(long, default_value = "100")]
        playouts_b: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Write the game records as JSON to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// A finished arena game.
#[derive(Serialize, Debug)]
struct GameRecord {
    seed: u64,

    /// Whether bot A played X (and moved first).
    a_plays_x: bool,

    /// Moves as (row, col), in order.
    moves: Vec<(u8, u8)>,

    /// "X", "O", or None for a draw.
    winner: Option<String>,
}

impl GameRecord {
    fn a_won(&self) -> bool {
        self.winner.as_deref() == Some(if self.a_plays_x { "X" } else { "O" })
    }

    fn b_won(&self) -> bool {
        self.winner.is_some() && !self.a_won()
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn create_agent(config: &MctsConfig, seed: u64) -> Result<BoardAgent> {
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    Agent::new(config.clone(), evaluator, ChaCha8Rng::seed_from_u64(seed))
        .context("Failed to create agent")
}

fn budget(seconds: f64, mark: Mark) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("Invalid time limit for {}: {}", mark, seconds))
}

/// Run the play command.
fn cmd_play(
    config: &MctsConfig,
    size: usize,
    win_length: usize,
    time_x: f64,
    time_o: f64,
    seed: u64,
) -> Result<()> {
    let mut board = Board::new(size, win_length)?;
    let budgets = [budget(time_x, Mark::X)?, budget(time_o, Mark::O)?];
    let mut agents = [
        create_agent(config, seed)?,
        create_agent(config, seed.wrapping_add(1000))?,
    ];

    info!(
        "Playing {}x{} (win length {}), X {:.2}s/move, O {:.2}s/move",
        size, size, win_length, time_x, time_o
    );

    while !board.is_terminal() {
        let mark = board.current_mark();
        let player = board.current_player();
        let agent = &mut agents[player];

        let cell = agent.choose_action(&board, budgets[player])?;
        if let Some(report) = agent.last_search() {
            debug!(
                %mark,
                playouts = report.playouts,
                tree_size = report.tree_size,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "move chosen"
            );
        }
        for child in agent.engine().root_children(&board) {
            debug!(
                action = %child.action,
                visits = child.visits,
                mean = child.mean_reward.unwrap_or(f64::NAN),
                "root child"
            );
        }

        board.play(cell)?;
        println!("{}: {} ->\n{}", mark, cell, board);
    }

    match board.winner() {
        None => println!("-> It's a draw!"),
        Some(mark) => println!("-> {} wins!", mark),
    }

    Ok(())
}

/// Play one arena game. Bot A plays X when `a_plays_x`.
fn play_arena_game(
    config: &MctsConfig,
    size: usize,
    win_length: usize,
    playouts: [usize; 2],
    a_plays_x: bool,
    seed: u64,
) -> Result<GameRecord> {
    let mut board = Board::new(size, win_length)?;
    let mut a = create_agent(config, seed)?;
    let mut b = create_agent(config, seed.wrapping_add(1))?;
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let a_to_move = (board.current_mark() == Mark::X) == a_plays_x;
        let cell: Cell = if a_to_move {
            a.choose_action_with_playouts(&board, playouts[0])?
        } else {
            b.choose_action_with_playouts(&board, playouts[1])?
        };
        board.play(cell)?;
        moves.push((cell.row, cell.col));
    }

    Ok(GameRecord {
        seed,
        a_plays_x,
        moves,
        winner: board.winner().map(|mark| mark.to_string()),
    })
}

/// Run the arena command.
#[allow(clippy::too_many_arguments)]
fn cmd_arena(
    config: &MctsConfig,
    games: usize,
    size: usize,
    win_length: usize,
    playouts_a: usize,
    playouts_b: usize,
    seed: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }
    // Fail on a bad board before spawning any work
    Board::new(size, win_length)?;

    println!(
        "Playing {} games on {}x{} (win length {}): A ({} playouts) vs B ({} playouts)",
        games, size, size, win_length, playouts_a, playouts_b
    );
    let start = Instant::now();

    // Games are independent; each owns its agents and trees
    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_arena_game(
                config,
                size,
                win_length,
                [playouts_a, playouts_b],
                i % 2 == 0,
                game_seed,
            )
        })
        .collect::<Result<_>>()?;

    let a_wins = records.iter().filter(|r| r.a_won()).count();
    let b_wins = records.iter().filter(|r| r.b_won()).count();
    let draws = games - a_wins - b_wins;

    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!("A wins: {} ({:.1}%)", a_wins, a_wins as f64 / games as f64 * 100.0);
    println!("B wins: {} ({:.1}%)", b_wins, b_wins as f64 / games as f64 * 100.0);
    println!("Draws:  {} ({:.1}%)", draws, draws as f64 / games as f64 * 100.0);

    if let Some(path) = output {
        let file =
            File::create(&path).with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &records)
            .with_context(|| format!("Failed to write game records to {:?}", path))?;
        println!("Game records saved to: {:?}", path);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = config::load_config(cli.config.as_deref())?;
    debug!(?config, "search config");

    match cli.command {
        Commands::Play {
            size,
            win_length,
            time_x,
            time_o,
            seed,
        } => cmd_play(&config, size, win_length, time_x, time_o, seed),

        Commands::Arena {
            games,
            size,
            win_length,
            playouts_a,
            playouts_b,
            seed,
            output,
        } => cmd_arena(
            &config, games, size, win_length, playouts_a, playouts_b, seed, output,
        ),
    }
}
