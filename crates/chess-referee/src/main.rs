//! Referee command line interface.
//!
//! A thin front end over [`Referee`]: every subcommand is one service
//! call. Square arguments use algebraic notation ("e2"), colors and
//! piece kinds their lowercase names.

use std::path::PathBuf;

use chess_core::{Color, PieceKind, Position, RuleViolation};
use chess_referee::config::RefereeConfig;
use chess_referee::db::init_db;
use chess_referee::referee::{Referee, RefereeError};
use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "chess-referee")]
#[command(about = "Turn-based chess referee over SQLite")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "referee.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new game with the standard starting position
    New,
    /// Seat a player on a color
    Seat {
        /// Game id
        game: Uuid,
        /// Player color, "white" or "black"
        #[arg(value_parser = color_arg)]
        color: Color,
    },
    /// Play a move
    Move {
        /// Game id
        game: Uuid,
        /// Source square, e.g. "e2"
        #[arg(value_parser = square_arg)]
        from: Position,
        /// Destination square, e.g. "e4"
        #[arg(value_parser = square_arg)]
        to: Position,
    },
    /// Promote a pawn standing on its promotion row
    Promote {
        /// Piece id of the pawn
        piece: Uuid,
        /// New piece kind, e.g. "queen"
        #[arg(value_parser = kind_arg)]
        kind: PieceKind,
    },
    /// Resign the game for a color
    Resign {
        /// Game id
        game: Uuid,
        /// Resigning color, "white" or "black"
        #[arg(value_parser = color_arg)]
        color: Color,
    },
    /// Show the board and status of a game
    Show {
        /// Game id
        game: Uuid,
        /// Print the game as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
    /// List the move history of a game
    History {
        /// Game id
        game: Uuid,
    },
}

fn color_arg(raw: &str) -> Result<Color, String> {
    raw.parse()
        .map_err(|_| format!("expected 'white' or 'black', got '{}'", raw))
}

fn square_arg(raw: &str) -> Result<Position, String> {
    Position::from_algebraic(raw).ok_or_else(|| RuleViolation::OffBoard.to_string())
}

fn kind_arg(raw: &str) -> Result<PieceKind, String> {
    raw.parse()
        .map_err(|_| format!("unknown piece kind '{}'", raw))
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = RefereeConfig::load_or_default(&cli.config).expect("Failed to load configuration");
    let db = init_db(&config.database_path).expect("Failed to initialize database");
    let referee = Referee::new(db, config.event_capacity);

    if let Err(err) = run(&referee, cli.command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(referee: &Referee, command: Commands) -> Result<(), RefereeError> {
    match command {
        Commands::New => {
            let game = referee.create_game()?;
            println!("{}", game.id);
        }
        Commands::Seat { game, color } => {
            let updated = referee.seat_player(game, color)?;
            println!("{}", updated.status);
        }
        Commands::Move { game, from, to } => {
            let record = referee.attempt_move(game, from, to)?;
            let status = referee.game(game)?.status;
            println!("{}", record);
            println!("{}", status);
        }
        Commands::Promote { piece, kind } => {
            let promoted = referee.promote(piece, kind)?;
            let square = promoted.position.expect("promoted piece is on the board");
            println!("{} {} at {}", promoted.color, promoted.kind, square);
        }
        Commands::Resign { game, color } => {
            let updated = referee.resign(game, color)?;
            println!("{}", updated.status);
        }
        Commands::Show { game, json } => {
            let current = referee.game(game)?;
            if json {
                let board = referee.board(game)?;
                let snapshot = json!({
                    "game": current,
                    "placement": board.placement(),
                    "pieces": referee.active_pieces(game)?,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&snapshot).expect("game snapshot serializes")
                );
            } else {
                println!("{}", referee.board(game)?);
                println!("{}", current.status);
            }
        }
        Commands::History { game } => {
            for record in referee.move_history(game)? {
                println!("{:>3}. {}", record.ply, record);
            }
        }
    }
    Ok(())
}
