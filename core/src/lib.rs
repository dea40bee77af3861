// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Board State and Notation
//!
//! This crate models a generic goban shared by go, othello, renju and gomoku:
//! - Board state, move placement and turn management
//! - Two-letter coordinate notation, with optional skipping of `i`
//! - Hoshi (star point) computation
//! - SGF export/import and text diagrams
//! - Position fingerprints for repetition detection
//!
//! Game legality is delegated to a pluggable [`rules::Referee`].

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod coords;
pub mod hash;
pub mod hoshi;
pub mod observer;
pub mod render;
pub mod rules;
pub mod sgf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::{Board, MoveRecord, Piece};
pub use config::{BoardConfig, GameKind};
pub use hash::PositionHash;
pub use observer::{Notes, ObserverKey};
pub use rules::{AllowAll, GameReferee, Referee};

/// Player color (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (always moves first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// SGF property letter for this player
    pub fn sgf_letter(&self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    /// Diagram symbol for a stone of this color
    pub fn symbol(&self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

/// Zero-based grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column, first letter)
    pub x: u8,
    /// Y coordinate (row, second letter)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is valid for a board of given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.x < board_size && self.y < board_size
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x, y)
    }
}

/// Errors raised while building a board
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board size outside 5..=26
    #[error(
        "Invalid board size {0}: must be between {min} and {max}",
        min = config::MIN_SIZE,
        max = config::MAX_SIZE
    )]
    InvalidSize(u8),

    /// Game kind name not recognised
    #[error("Unknown game kind: {0}")]
    UnknownGameKind(String),

    /// Skipping a letter leaves too few letters for this size
    #[error("Board size {0} is too large to skip a coordinate letter")]
    SkipLetterOverflow(u8),

    /// Configuration text could not be parsed
    #[error("Invalid configuration: {0}")]
    Parse(String),
}

/// Errors raised while translating a position string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Not exactly two letters
    #[error("Invalid position: {0:?}")]
    Malformed(String),

    /// Decoded coordinate lies outside the board
    #[error("Position {position} is off the board")]
    OutOfBounds {
        /// The offending position, re-encoded
        position: String,
    },
}

/// Errors returned by the move pipeline
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Position could not be decoded or is off the board
    #[error(transparent)]
    Position(#[from] PositionError),

    /// The cell already holds a piece
    #[error("Position {position} is already occupied")]
    Occupied {
        /// The occupied position
        position: String,
    },

    /// The referee declined the move
    #[error("Move {position} rejected: {reason}")]
    Rejected {
        /// The proposed position
        position: String,
        /// The referee's reason, verbatim
        reason: String,
    },
}

impl MoveError {
    /// True when the referee declined an otherwise well-formed move
    pub fn is_rejection(&self) -> bool {
        matches!(self, MoveError::Rejected { .. })
    }
}
