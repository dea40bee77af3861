// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-letter position notation
//!
//! A position is written as two letters, column first: `"pd"` is x = 15,
//! y = 3. With `skip_i` set, the letter `i` is never produced, following the
//! traditional go convention, so index 8 is written `j`. SGF always uses the
//! direct mapping.

use crate::{Coord, PositionError};

/// Index at and above which `i` is skipped
const SKIP_FROM: u8 = 8;

/// Letters available for coordinates
const ALPHABET_LEN: u8 = 26;

/// Decode a two-letter position into a grid coordinate.
///
/// Letters are case-insensitive. Bounds are not checked here.
pub fn decode(pos: &str, skip_i: bool) -> Result<Coord, PositionError> {
    let bytes = pos.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return Err(PositionError::Malformed(pos.to_string()));
    }

    let x = letter_to_index(bytes[0], skip_i);
    let y = letter_to_index(bytes[1], skip_i);
    Ok(Coord::new(x, y))
}

/// Encode a grid coordinate as a lowercase two-letter position.
///
/// Indices past the last letter cannot be written as letters; they come
/// back as `(x,y)`, which never decodes.
pub fn encode(x: u8, y: u8, skip_i: bool) -> String {
    match (letter(x, skip_i), letter(y, skip_i)) {
        (Some(col), Some(row)) => [col, row].iter().collect(),
        _ => format!("({x},{y})"),
    }
}

/// Encode a [`Coord`], see [`encode`]
pub fn encode_coord(coord: Coord, skip_i: bool) -> String {
    encode(coord.x, coord.y, skip_i)
}

/// Letter used for a single axis index, `None` past `z`
pub fn letter(index: u8, skip_i: bool) -> Option<char> {
    let shifted = if skip_i && index >= SKIP_FROM {
        index.checked_add(1)?
    } else {
        index
    };
    (shifted < ALPHABET_LEN).then(|| char::from(b'a' + shifted))
}

fn letter_to_index(letter: u8, skip_i: bool) -> u8 {
    let index = letter.to_ascii_lowercase() - b'a';
    if skip_i && index > SKIP_FROM {
        index - 1
    } else {
        index
    }
}
