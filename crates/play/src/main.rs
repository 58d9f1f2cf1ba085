//! Play connect-n in the terminal against the MCTS engine.
//!
//! By default the engine plays "x" and moves first, and the human answers
//! as "o". `--human none` lets the engine play both sides.

mod input;

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use connectn_board::GameState;
use connectn_core::{Mark, Outcome};
use connectn_mcts::{Mcts, MctsConfig};
use input::Command;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Connect-N against a Monte Carlo Tree Search engine.
#[derive(Parser, Debug)]
#[command(name = "connectn")]
#[command(about = "Play N-in-a-row against an MCTS engine")]
struct Cli {
    /// Board edge length.
    #[arg(long, default_value = "3")]
    size: usize,

    /// Marks in a row needed to win.
    #[arg(short, long, default_value = "3")]
    run_length: usize,

    /// MCTS iterations per engine move.
    #[arg(short, long, default_value = "1000")]
    iterations: usize,

    /// UCB1 exploration constant used inside the tree.
    #[arg(long, default_value = "1.0")]
    exploration: f64,

    /// Random seed for reproducible engine play.
    #[arg(long)]
    seed: Option<u64>,

    /// Side played by the human.
    #[arg(long, value_enum, default_value = "o")]
    human: HumanSide,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HumanSide {
    X,
    O,
    #[value(name = "none")]
    Neither,
}

impl HumanSide {
    fn mark(self) -> Option<Mark> {
        match self {
            HumanSide::X => Some(Mark::A),
            HumanSide::O => Some(Mark::B),
            HumanSide::Neither => None,
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let state = GameState::new(cli.size, cli.run_length).context("invalid board geometry")?;

    let config = MctsConfig {
        iterations: cli.iterations,
        exploration: cli.exploration,
        ..Default::default()
    };
    config.validate().context("invalid search settings")?;

    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    info!(
        size = cli.size,
        run_length = cli.run_length,
        iterations = cli.iterations,
        seed = ?cli.seed,
        "Starting game"
    );

    let mut mcts = Mcts::new(config, rng);
    let stdin = io::stdin();
    game_loop(state, &mut mcts, cli.human.mark(), &mut stdin.lock())
}

/// Alternate human and engine moves until the game ends or the human quits.
fn game_loop<R: BufRead>(
    mut state: GameState,
    mcts: &mut Mcts<ChaCha8Rng>,
    human: Option<Mark>,
    input: &mut R,
) -> Result<()> {
    if human.is_some() {
        println!("  Type \"exit\" to quit the game");
        println!("  Move format [x,y]: 1,2 where 1 is column and 2 is row");
    }
    println!("{}", state);

    while !state.is_terminal() {
        state = if human == Some(state.side_to_move()) {
            match human_move(&state, input)? {
                Some(next) => next,
                None => return Ok(()),
            }
        } else {
            engine_move(mcts, &state)?
        };
        println!("{}", state);
    }

    match state.outcome() {
        Some(Outcome::Win(mark)) => println!("player \"{}\" has won the game!\n", mark),
        Some(Outcome::Draw) => println!("Game is drawn!\n"),
        None => unreachable!("loop exits only on a terminal state"),
    }

    Ok(())
}

/// Prompt until the human enters a legal move. Returns `None` on exit or EOF.
fn human_move<R: BufRead>(state: &GameState, input: &mut R) -> Result<Option<GameState>> {
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read move from stdin")?;
        if read == 0 {
            return Ok(None);
        }

        match input::parse_command(&line, state) {
            Ok(Command::Play(mv)) => {
                let next = state.apply_move(mv).context("move rejected by board")?;
                debug!(mv = mv.0, "Human move");
                return Ok(Some(next));
            }
            Ok(Command::Exit) => return Ok(None),
            Ok(Command::Skip) => continue,
            Err(err) => {
                println!("  Error: {:#}", err);
                println!("  Illegal command!");
                println!("  Move format [x,y]: 1,2 where 1 is column and 2 is row");
            }
        }
    }
}

/// Let the engine pick a move, printing how long the search took.
fn engine_move(mcts: &mut Mcts<ChaCha8Rng>, state: &GameState) -> Result<GameState> {
    let start = Instant::now();
    let result = mcts
        .analyze(state)
        .context("engine could not find a move")?;
    let elapsed = start.elapsed();
    println!("{}", search_time(elapsed));

    let size = state.size();
    info!(
        side = %state.side_to_move(),
        col = result.best_move.col(size) + 1,
        row = result.best_move.row(size) + 1,
        elapsed_ms = elapsed.as_millis() as u64,
        tree_size = result.tree_size,
        "Engine move"
    );
    for child in &result.children {
        debug!(
            col = child.mv.col(size) + 1,
            row = child.mv.row(size) + 1,
            visits = child.visits,
            value = child.value,
            "Root child"
        );
    }

    Ok(result.state)
}

fn search_time(elapsed: Duration) -> String {
    format!("  engine searched for {:.3}s", elapsed.as_secs_f64())
}
