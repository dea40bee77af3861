// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-board position fingerprints
//!
//! Each cell contributes a two-bit code (0 empty, 1 black, 2 white), packed
//! four to a byte, walking the board column by column. The buffer holds a
//! full 19x19 board (91 bytes) and grows for larger boards. Repetition
//! policies such as superko are left to callers.

use crate::board::Board;
use crate::{Color, Coord};
use std::fmt;

/// Bytes needed for a 19x19 board
pub const HASH_LEN: usize = 91;

const BITS_PER_CELL: usize = 2;
const CELLS_PER_BYTE: usize = 8 / BITS_PER_CELL;

/// Packed board position
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionHash(Vec<u8>);

impl PositionHash {
    /// Fingerprint the current position of `board`
    pub fn of(board: &Board) -> Self {
        let size = board.size() as usize;
        let len = HASH_LEN.max((size * size).div_ceil(CELLS_PER_BYTE));
        let mut bytes = vec![0u8; len];

        let cells = (0..board.size())
            .flat_map(|x| (0..board.size()).map(move |y| Coord::new(x, y)));
        for (i, coord) in cells.enumerate() {
            let code = match board.piece_at(coord).map(|piece| piece.color()) {
                None => 0u8,
                Some(Color::Black) => 1,
                Some(Color::White) => 2,
            };
            bytes[i / CELLS_PER_BYTE] |= code << ((i % CELLS_PER_BYTE) * BITS_PER_CELL);
        }

        Self(bytes)
    }

    /// Raw fingerprint bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Fingerprint as lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// BLAKE3 digest of the fingerprint, for compact storage
    pub fn digest(&self) -> [u8; 32] {
        *blake3::hash(&self.0).as_bytes()
    }
}

impl fmt::Debug for PositionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PositionHash({})", self.to_hex())
    }
}

impl AsRef<[u8]> for PositionHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardConfig, GameKind};

    fn board(size: u8) -> Board {
        Board::new(BoardConfig::new(size, GameKind::Go)).unwrap()
    }

    #[test]
    fn test_empty_board_is_zero() {
        let hash = board(19).position_hash();
        assert_eq!(hash.as_bytes().len(), HASH_LEN);
        assert!(hash.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_cell_codes_column_major() {
        let mut board = board(9);
        board.play("aa").unwrap();
        board.play("ab").unwrap();
        board.play("ba").unwrap();
        let bytes = board.position_hash();
        let bytes = bytes.as_bytes();
        // aa -> cell 0 black, ab -> cell 1 white, ba -> cell 9 black
        assert_eq!(bytes[0], 0b0000_1001);
        assert_eq!(bytes[2], 0b0000_0100);
    }

    #[test]
    fn test_large_board_grows() {
        let hash = board(26).position_hash();
        assert_eq!(hash.as_bytes().len(), 169);
    }

    #[test]
    fn test_hex_and_digest() {
        let mut board = board(9);
        board.play("aa").unwrap();
        let hash = board.position_hash();
        assert!(hash.to_hex().starts_with("01"));
        assert_eq!(hash.to_hex().len(), HASH_LEN * 2);
        assert_eq!(hash.digest(), *blake3::hash(hash.as_bytes()).as_bytes());
    }
}
