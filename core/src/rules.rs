// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move referees
//!
//! A referee decides whether a well-formed move on an empty cell is legal.
//! The board consults it after decoding and bounds checks and before any
//! mutation; a rejection leaves the board untouched.

use crate::board::Board;
use crate::GameKind;

/// Strategy deciding move legality
pub trait Referee {
    /// Review a proposed move at `position` (as written by the caller).
    ///
    /// Returns the reason on rejection.
    fn review(&self, board: &Board, position: &str) -> Result<(), String>;
}

impl<F> Referee for F
where
    F: Fn(&Board, &str) -> Result<(), String>,
{
    fn review(&self, board: &Board, position: &str) -> Result<(), String> {
        self(board, position)
    }
}

/// Referee that accepts every move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl Referee for AllowAll {
    fn review(&self, _board: &Board, _position: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Default referee for a game kind.
///
/// No capture, ko, flipping or five-in-a-row rules are enforced yet, so every
/// variant accepts all moves. Game-specific rules plug in through [`Referee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameReferee {
    /// Go
    Go,
    /// Othello
    Othello,
    /// Renju
    Renju,
    /// Gomoku
    Gomoku,
}

impl From<GameKind> for GameReferee {
    fn from(kind: GameKind) -> Self {
        match kind {
            GameKind::Go => GameReferee::Go,
            GameKind::Othello => GameReferee::Othello,
            GameKind::Renju => GameReferee::Renju,
            GameKind::Gomoku => GameReferee::Gomoku,
        }
    }
}

impl Referee for GameReferee {
    fn review(&self, board: &Board, position: &str) -> Result<(), String> {
        tracing::trace!(
            referee = ?self,
            position,
            move_number = board.move_number(),
            "reviewing move"
        );
        AllowAll.review(board, position)
    }
}
