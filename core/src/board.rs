// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board state and the move pipeline

use crate::config::BoardConfig;
use crate::coords;
use crate::hash::PositionHash;
use crate::hoshi;
use crate::observer::{Notes, ObserverKey, ObserverRegistry};
use crate::render;
use crate::rules::{GameReferee, Referee};
use crate::sgf;
use crate::{Color, ConfigError, Coord, GameKind, MoveError, PositionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// A stone placed on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    move_number: u32,
    coord: Coord,
    board: Uuid,
}

impl Piece {
    /// Color of the stone
    pub fn color(&self) -> Color {
        self.color
    }

    /// Move on which the stone was placed
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Where the stone sits
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Id of the board holding the stone
    pub fn board_id(&self) -> Uuid {
        self.board
    }
}

/// One entry of the move history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Player who moved
    pub player: Color,
    /// Where the stone went, `None` for a pass
    pub coord: Option<Coord>,
}

impl MoveRecord {
    /// True if the player passed
    pub fn is_pass(&self) -> bool {
        self.coord.is_none()
    }
}

/// A goban and the game played on it
pub struct Board {
    id: Uuid,
    size: u8,
    kind: GameKind,
    black: String,
    white: String,
    skip_i: bool,
    grid: Vec<Option<Piece>>,
    turn: Color,
    move_number: u32,
    moves: Vec<MoveRecord>,
    hoshi: BTreeSet<Coord>,
    observers: ObserverRegistry,
    referee: Box<dyn Referee>,
}

impl Board {
    /// Create an empty board refereed by the default referee for its kind
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let referee = GameReferee::from(config.kind);
        Self::with_referee(config, referee)
    }

    /// Create an empty board with a custom referee
    pub fn with_referee(
        config: BoardConfig,
        referee: impl Referee + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let cells = (config.size as usize) * (config.size as usize);
        let board = Self {
            id: Uuid::new_v4(),
            size: config.size,
            kind: config.kind,
            black: config.black,
            white: config.white,
            skip_i: config.skip_i,
            grid: vec![None; cells],
            turn: Color::Black,
            move_number: 1,
            moves: Vec::new(),
            hoshi: hoshi::compute(config.size),
            observers: ObserverRegistry::default(),
            referee: Box::new(referee),
        };

        tracing::debug!(
            board = %board.id,
            size = board.size,
            kind = %board.kind,
            skip_i = board.skip_i,
            "created board"
        );
        Ok(board)
    }

    /// Unique id of this board
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of lines on each side
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Game played on this board
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Whether positions skip the letter `i`
    pub fn skip_i(&self) -> bool {
        self.skip_i
    }

    /// Name of the player with the given color
    pub fn player(&self, color: Color) -> &str {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    /// Player to move
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Number the next move will carry
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Every move and pass so far, oldest first
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Star points of this board
    pub fn hoshi_points(&self) -> &BTreeSet<Coord> {
        &self.hoshi
    }

    /// Number of passes at the end of the history
    pub fn consecutive_passes(&self) -> usize {
        self.moves.iter().rev().take_while(|mv| mv.is_pass()).count()
    }

    /// Decode a position string and check it lies on the board
    pub fn decode(&self, position: &str) -> Result<Coord, PositionError> {
        let coord = coords::decode(position, self.skip_i)?;
        self.check_bounds(coord)?;
        Ok(coord)
    }

    /// Position string for a coordinate, in this board's notation
    pub fn encode(&self, coord: Coord) -> String {
        coords::encode_coord(coord, self.skip_i)
    }

    fn check_bounds(&self, coord: Coord) -> Result<(), PositionError> {
        if coord.is_valid(self.size) {
            Ok(())
        } else {
            Err(PositionError::OutOfBounds {
                position: self.encode(coord),
            })
        }
    }

    fn index(&self, coord: Coord) -> usize {
        (coord.y as usize) * (self.size as usize) + (coord.x as usize)
    }

    /// Piece at a coordinate, `None` when empty or off the board
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        if !coord.is_valid(self.size) {
            return None;
        }
        self.grid[self.index(coord)].as_ref()
    }

    /// Piece at a position string
    pub fn get(&self, position: &str) -> Result<Option<&Piece>, PositionError> {
        let coord = self.decode(position)?;
        Ok(self.piece_at(coord))
    }

    /// All pieces on the board, row by row
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.grid.iter().flatten()
    }

    /// The piece placed by the latest move, unless that move was a pass
    pub fn last_piece(&self) -> Option<&Piece> {
        let coord = self.moves.last()?.coord?;
        self.piece_at(coord)
    }

    /// Play the current player's stone at a position string.
    ///
    /// Fails without touching the board if the position is malformed, off
    /// the board, occupied, or rejected by the referee.
    pub fn play(&mut self, position: &str) -> Result<Piece, MoveError> {
        let coord = self.decode(position)?;
        self.place(coord, position)
    }

    /// Play the current player's stone at a coordinate
    pub fn play_at(&mut self, coord: Coord) -> Result<Piece, MoveError> {
        self.check_bounds(coord)?;
        let position = self.encode(coord);
        self.place(coord, &position)
    }

    fn place(&mut self, coord: Coord, position: &str) -> Result<Piece, MoveError> {
        if self.piece_at(coord).is_some() {
            tracing::trace!(board = %self.id, position, "cell occupied");
            return Err(MoveError::Occupied {
                position: self.encode(coord),
            });
        }

        if let Err(reason) = self.referee.review(self, position) {
            tracing::trace!(board = %self.id, position, %reason, "referee rejected move");
            return Err(MoveError::Rejected {
                position: position.to_string(),
                reason,
            });
        }

        let piece = Piece {
            color: self.turn,
            move_number: self.move_number,
            coord,
            board: self.id,
        };
        let idx = self.index(coord);
        self.grid[idx] = Some(piece);
        self.moves.push(MoveRecord {
            player: self.turn,
            coord: Some(coord),
        });
        self.move_number += 1;
        self.turn = self.turn.opposite();

        tracing::debug!(
            board = %self.id,
            color = ?piece.color,
            position,
            move_number = piece.move_number,
            "move played"
        );

        // Callbacks borrow the board, so the registry is lifted out while they run.
        let mut observers = std::mem::take(&mut self.observers);
        observers.notify(self);
        self.observers = observers;

        Ok(piece)
    }

    /// Pass the turn. Observers are not notified.
    pub fn pass(&mut self) {
        self.moves.push(MoveRecord {
            player: self.turn,
            coord: None,
        });
        tracing::debug!(
            board = %self.id,
            color = ?self.turn,
            move_number = self.move_number,
            "pass"
        );
        self.move_number += 1;
        self.turn = self.turn.opposite();
    }

    /// Register a callback run after every accepted move.
    ///
    /// The callback gets its own notes as an argument. While callbacks run the
    /// registry is detached from the board, so inside a callback
    /// [`Board::observer_count`] reads 0 and [`Board::notes`] returns `None`.
    /// A panicking callback unwinds out of [`Board::play`] and the board loses
    /// every registration.
    pub fn register<F>(&mut self, callback: F) -> ObserverKey
    where
        F: FnMut(&ObserverKey, &Board, &mut Notes) + 'static,
    {
        self.observers.register(Box::new(callback))
    }

    /// Remove an observer and its notes
    pub fn unregister(&mut self, key: &ObserverKey) -> bool {
        self.observers.unregister(key)
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// An observer's notes
    pub fn notes(&self, key: &ObserverKey) -> Option<&Notes> {
        self.observers.notes(key)
    }

    /// An observer's notes, mutably
    pub fn notes_mut(&mut self, key: &ObserverKey) -> Option<&mut Notes> {
        self.observers.notes_mut(key)
    }

    /// True if the position is one of this board's star points
    pub fn is_hoshi(&self, position: &str) -> bool {
        let position = position.to_ascii_lowercase();
        self.hoshi.iter().any(|&coord| self.encode(coord) == position)
    }

    /// Game record in SGF
    pub fn as_sgf(&self) -> String {
        sgf::to_sgf(self)
    }

    /// Text diagram without labels
    pub fn as_text(&self) -> String {
        render::to_text(self, false)
    }

    /// Text diagram with row and column letters
    pub fn as_labeled_text(&self) -> String {
        render::to_text(self, true)
    }

    /// Fingerprint of the current position
    pub fn position_hash(&self) -> PositionHash {
        PositionHash::of(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("kind", &self.kind)
            .field("skip_i", &self.skip_i)
            .field("turn", &self.turn)
            .field("move_number", &self.move_number)
            .field("moves", &self.moves.len())
            .field("observers", &self.observers)
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(size: u8) -> Board {
        Board::new(BoardConfig::new(size, GameKind::Go)).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = go(19);
        assert_eq!(board.size(), 19);
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.move_number(), 1);
        assert!(board.moves().is_empty());
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board.get("aa"), Ok(None));
    }

    #[test]
    fn test_play_places_piece() {
        let mut board = go(19);
        let piece = board.play("pd").unwrap();
        assert_eq!(piece.color(), Color::Black);
        assert_eq!(piece.coord(), Coord::new(15, 3));
        assert_eq!(piece.move_number(), 1);
        assert_eq!(piece.board_id(), board.id());
        assert_eq!(board.get("pd").unwrap(), Some(&piece));
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.move_number(), 2);
    }

    #[test]
    fn test_play_at_matches_play() {
        let mut board = go(9);
        let piece = board.play_at(Coord::new(2, 6)).unwrap();
        assert_eq!(board.get("cg").unwrap(), Some(&piece));
        assert!(matches!(
            board.play_at(Coord::new(9, 0)),
            Err(MoveError::Position(PositionError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_out_of_bounds_carries_position() {
        let mut board = go(9);
        assert_eq!(
            board.play("JA"),
            Err(MoveError::Position(PositionError::OutOfBounds {
                position: "ja".to_string()
            }))
        );
    }

    #[test]
    fn test_play_at_far_off_board() {
        let mut board = Board::new(BoardConfig::new(9, GameKind::Go).with_skip_i(true)).unwrap();
        assert_eq!(
            board.play_at(Coord::new(255, 0)),
            Err(MoveError::Position(PositionError::OutOfBounds {
                position: "(255,0)".to_string()
            }))
        );

        let mut board = go(9);
        assert_eq!(
            board.play_at(Coord::new(26, 0)),
            Err(MoveError::Position(PositionError::OutOfBounds {
                position: "(26,0)".to_string()
            }))
        );
        assert_eq!(
            board.play_at(Coord::new(25, 0)),
            Err(MoveError::Position(PositionError::OutOfBounds {
                position: "za".to_string()
            }))
        );
        assert!(board.moves().is_empty());
    }

    #[test]
    fn test_occupied() {
        let mut board = go(9);
        board.play("ee").unwrap();
        assert_eq!(
            board.play("ee"),
            Err(MoveError::Occupied {
                position: "ee".to_string()
            })
        );
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.moves().len(), 1);
    }

    #[test]
    fn test_pass_alternates_turn() {
        let mut board = go(9);
        board.pass();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.move_number(), 2);
        assert!(board.moves()[0].is_pass());
        assert_eq!(board.moves()[0].player, Color::Black);
        assert!(board.last_piece().is_none());
    }

    #[test]
    fn test_consecutive_passes() {
        let mut board = go(9);
        board.play("ee").unwrap();
        assert_eq!(board.consecutive_passes(), 0);
        board.pass();
        board.pass();
        assert_eq!(board.consecutive_passes(), 2);
        board.play("cc").unwrap();
        assert_eq!(board.consecutive_passes(), 0);
    }

    #[test]
    fn test_last_piece() {
        let mut board = go(9);
        board.play("ee").unwrap();
        let second = board.play("cc").unwrap();
        assert_eq!(board.last_piece(), Some(&second));
    }

    #[test]
    fn test_is_hoshi() {
        let board = go(19);
        assert!(board.is_hoshi("dd"));
        assert!(board.is_hoshi("JJ"));
        assert!(board.is_hoshi("pj"));
        assert!(!board.is_hoshi("aa"));
        assert!(!board.is_hoshi("bogus"));
    }

    #[test]
    fn test_is_hoshi_with_skip_i() {
        let board = Board::new(BoardConfig::new(19, GameKind::Go).with_skip_i(true)).unwrap();
        assert!(board.is_hoshi("kk"));
        assert!(board.is_hoshi("dk"));
        assert!(!board.is_hoshi("jj"));
    }

    #[test]
    fn test_skip_i_positions() {
        let mut board = Board::new(BoardConfig::new(9, GameKind::Go).with_skip_i(true)).unwrap();
        let piece = board.play("jj").unwrap();
        assert_eq!(piece.coord(), Coord::new(8, 8));
        assert!(matches!(
            board.play("kk"),
            Err(MoveError::Position(PositionError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_player_names() {
        let board = Board::new(BoardConfig::default().with_players("Honinbo", "Kitani")).unwrap();
        assert_eq!(board.player(Color::Black), "Honinbo");
        assert_eq!(board.player(Color::White), "Kitani");
    }
}
