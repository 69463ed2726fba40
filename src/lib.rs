pub mod card;
pub mod error;
pub mod zones;
pub mod moves;
pub mod game;
pub mod hash;
pub mod display;

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use crate::card::{Card, Color, Rank, Suit};
pub use crate::error::{MoveError, Violation, ZoneKind};
pub use crate::game::{Game, History};
pub use crate::hash::ContentHash;
pub use crate::moves::{Action, possible_actions, run_action};

/// Command-line options for the `klondike` binary.
#[derive(Debug, Parser)]
#[command(name = "klondike", about = "Play single-draw Klondike in the terminal")]
pub struct Args {
    /// Deal a specific game. Without it a random seed is chosen and shown.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the current state digest above the board after every move.
    #[arg(long)]
    pub show_hash: bool,
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`), so log lines stay out of the board on stdout.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Entry point for the `klondike` binary.
///
/// Deals a game, then loops:
///   - render the board
///   - list every legal action, numbered from 1
///   - read a choice from stdin and apply it
///
/// A rejected or unparsable choice is reported and the prompt repeats.
/// `q` or end of input quits.
///
/// Example:
///   cargo run -- --seed=12345
pub fn run() -> io::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut game = Game::create(args.seed);
    info!(seed = game.seed(), "game started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    writeln!(stdout, "Klondike, seed {}", game.seed())?;

    loop {
        writeln!(stdout)?;
        if args.show_hash {
            writeln!(stdout, "State: {}", game.sha256_hex())?;
        }
        writeln!(stdout, "{}", display::render_game(&game))?;

        let actions = game.possible_actions();
        if actions.is_empty() {
            writeln!(stdout, "No legal moves left.")?;
            return Ok(());
        }
        for (i, action) in actions.iter().enumerate() {
            writeln!(stdout, "{:2}. {}", i + 1, action)?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let action = match choice.parse::<usize>() {
            Ok(n) if (1..=actions.len()).contains(&n) => actions[n - 1],
            _ => {
                writeln!(stdout, "Enter a number from 1 to {}, or q to quit.", actions.len())?;
                continue;
            }
        };

        if let Err(err) = game.run_action(action) {
            warn!(%action, %err, "action rejected");
            writeln!(stdout, "{err}")?;
        }
    }
}
