// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI - play a move list and print the result
//!
//! Builds a board from flags and an optional JSON config file, applies a
//! whitespace-separated list of positions (`pass` for a pass) and prints a
//! text diagram, an SGF record or the position fingerprint.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use goban_core::{Board, BoardConfig, GameKind};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "goban", about = "Play moves on a goban and print the board", version)]
pub struct Args {
    /// JSON board configuration; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board size (5 to 26)
    #[arg(short, long)]
    pub size: Option<u8>,

    /// Game kind (go, othello, renju, gomoku)
    #[arg(short, long)]
    pub kind: Option<GameKind>,

    /// Black player's name
    #[arg(long)]
    pub black: Option<String>,

    /// White player's name
    #[arg(long)]
    pub white: Option<String>,

    /// Skip the letter `i` in positions
    #[arg(long)]
    pub skip_i: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Frame text diagrams with row and column letters
    #[arg(long)]
    pub labels: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Moves to play; read from stdin when empty
    pub moves: Vec<String>,
}

/// What to print once the moves are played
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Text diagram
    Text,
    /// SGF record
    Sgf,
    /// Position fingerprint in hex
    Hash,
}

/// One entry of a move list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Play at a position
    Play(String),
    /// Pass the turn
    Pass,
}

/// Split a move list on whitespace
pub fn parse_moves(text: &str) -> Vec<Step> {
    text.split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case("pass") {
                Step::Pass
            } else {
                Step::Play(word.to_string())
            }
        })
        .collect()
}

/// Resolve the board configuration from the config file and flags
pub fn board_config(args: &Args) -> Result<BoardConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            BoardConfig::from_json(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => BoardConfig::default(),
    };

    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(kind) = args.kind {
        config.kind = kind;
    }
    if let Some(black) = &args.black {
        config.black = black.clone();
    }
    if let Some(white) = &args.white {
        config.white = white.clone();
    }
    if args.skip_i {
        config.skip_i = true;
    }

    Ok(config)
}

/// Apply every step, stopping at the first refused move
pub fn apply(board: &mut Board, steps: &[Step]) -> Result<()> {
    for step in steps {
        match step {
            Step::Pass => board.pass(),
            Step::Play(position) => {
                let move_number = board.move_number();
                if let Err(err) = board.play(position) {
                    tracing::warn!(move_number, position = %position, error = %err, "move refused");
                    return Err(anyhow!("Move {move_number} ({position}) refused: {err}"));
                }
            }
        }
    }
    Ok(())
}

/// Render the board in the requested format
pub fn render(board: &Board, format: Format, labels: bool) -> String {
    match format {
        Format::Text if labels => board.as_labeled_text(),
        Format::Text => board.as_text(),
        Format::Sgf => board.as_sgf(),
        Format::Hash => format!("{}\n", board.position_hash().to_hex()),
    }
}

/// Build the board, play `moves` and return the rendered output
pub fn run(args: &Args, moves: &str) -> Result<String> {
    let config = board_config(args)?;
    let mut board = Board::new(config).context("Invalid board configuration")?;
    tracing::info!(board = %board.id(), size = board.size(), kind = %board.kind(), "starting game");

    let steps = parse_moves(moves);
    apply(&mut board, &steps)?;
    tracing::info!(moves = board.moves().len(), turn = ?board.turn(), "moves applied");

    Ok(render(&board, args.format, args.labels))
}
