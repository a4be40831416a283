use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use klondike_common::{
    action::{Action, format_actions, parse_actions},
    board::{Board, CardRef},
};
use klondike_engine::GameState;
use std::io::{IsTerminal, Read, stdin};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deal a new game and print the board
    Deal {
        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the hinted card for a board
    Hint {
        /// File to load the board from; read from stdin if omitted
        file: Option<String>,
    },
    /// Replay actions and print the resulting board
    Play {
        /// Seed for a reproducible deal
        #[arg(long, conflicts_with = "board")]
        seed: Option<u64>,
        /// File to load the starting board from
        #[arg(long, value_name = "FILE")]
        board: Option<String>,
        /// Actions such as `3D W:F1 T1:T2@3 R Z X`; read from stdin if omitted
        actions: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deal { seed } => {
            let state = new_game(seed);
            println!("{}", state.board());
        }
        Commands::Hint { file } => {
            let board = load_board(file.as_deref())?;
            let state = GameState::from_board(board)?;
            println!("{}", format_hint(&state));
        }
        Commands::Play {
            seed,
            board,
            actions,
        } => {
            let state = match board {
                Some(file) => GameState::from_board(load_board(Some(&file))?)?,
                None => new_game(seed),
            };
            let actions = if actions.is_empty() {
                parse_actions(&read_stdin()?)?
            } else {
                parse_actions(&actions.join(" "))?
            };
            let state = play(state, &actions)?;
            println!("{}\n", state.board());
            println!("Moves: {}", state.history().len());
            println!("{}", format_hint(&state));
            if state.is_won() {
                println!("✓ Won");
            } else if state.can_autofinish() {
                println!("Ready to autofinish");
            }
        }
    }

    Ok(())
}

fn new_game(seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::new_with_seed(seed),
        None => GameState::new_game(),
    }
}

fn load_board(file: Option<&str>) -> Result<Board> {
    let content = match file {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read board file '{file}'"))?,
        None => read_stdin()?,
    };
    Board::parse(&content).context("Failed to parse board")
}

fn read_stdin() -> Result<String> {
    let mut input = stdin();
    if input.is_terminal() {
        bail!("Nothing to read; pass a file or pipe the input through stdin.");
    }
    let mut content = String::new();
    input.read_to_string(&mut content)?;
    Ok(content)
}

fn play(mut state: GameState, actions: &[Action]) -> Result<GameState> {
    for (step, action) in actions.iter().enumerate() {
        let notation = format_actions(std::slice::from_ref(action));
        let ctx = || format!("Step {}: '{}'", step + 1, notation.trim());
        state = apply(&state, *action).with_context(ctx)?;
        debug!(step, ?action, "applied action");
    }
    Ok(state)
}

fn apply(state: &GameState, action: Action) -> Result<GameState> {
    let next = match action {
        Action::Draw => {
            if state.board().stock.is_empty() {
                bail!("The stock is empty; redeal with 'R'");
            }
            state.deal_from_stock()
        }
        Action::Redeal => {
            if !state.board().stock.is_empty() {
                bail!("Cannot redeal while the stock still holds cards");
            }
            if state.board().waste.is_empty() {
                bail!("Nothing to redeal");
            }
            state.deal_from_stock()
        }
        Action::Move { from, to, count } => {
            let len = state
                .board()
                .pile(from)
                .with_context(|| format!("No such pile: {from}"))?
                .len();
            let index = len
                .checked_sub(count)
                .with_context(|| format!("{from} holds only {len} cards"))?;
            state.propose_move(CardRef::new(from, index), to)?
        }
        Action::Undo => state.undo()?,
        Action::Redo => state.redo()?,
    };
    Ok(next)
}

fn format_hint(state: &GameState) -> String {
    match state.hint() {
        Some(card) => format!("Hint: {card}"),
        None if state.board().stock.is_empty() && state.board().waste.is_empty() => {
            "Hint: no moves left".into()
        }
        None => "Hint: deal from the stock".into(),
    }
}
