// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board diagrams
//!
//! Rows are drawn from the highest row letter down. Cells read `X` (black),
//! `O` (white), `+` (empty star point) or `.` (empty). The stone placed by
//! the latest move is wrapped in parentheses.

use crate::board::Board;
use crate::coords::letter;
use crate::Coord;

/// Render the board, optionally framed with row and column letters
pub fn to_text(board: &Board, labels: bool) -> String {
    let size = board.size();
    let skip_i = board.skip_i();
    let last = board.last_piece().map(|piece| piece.coord());
    let mut output = String::new();

    let header = column_labels(size, skip_i);
    if labels {
        output.push_str(&header);
        output.push('\n');
    }

    for y in (0..size).rev() {
        let row = render_row(board, y, last);
        if labels {
            let label = letter(y, skip_i).unwrap_or('?');
            output.push(label);
            output.push_str(&row);
            output.push(label);
        } else {
            output.push_str(&row);
        }
        output.push('\n');
    }

    if labels {
        output.push_str(&header);
        output.push('\n');
    }

    output
}

/// One row of cells. Each cell is preceded by a separator, and one more
/// separator closes the row, so the latest stone can be bracketed in place.
fn render_row(board: &Board, y: u8, last: Option<Coord>) -> String {
    let mut row = String::with_capacity(board.size() as usize * 2 + 1);
    let mut closing = false;

    for x in 0..board.size() {
        let coord = Coord::new(x, y);
        let is_last = last == Some(coord);
        row.push(match (is_last, closing) {
            (true, _) => '(',
            (false, true) => ')',
            (false, false) => ' ',
        });
        row.push(cell_symbol(board, coord));
        closing = is_last;
    }
    row.push(if closing { ')' } else { ' ' });

    row
}

fn cell_symbol(board: &Board, coord: Coord) -> char {
    match board.piece_at(coord) {
        Some(piece) => piece.color().symbol(),
        None if board.hoshi_points().contains(&coord) => '+',
        None => '.',
    }
}

fn column_labels(size: u8, skip_i: bool) -> String {
    let mut labels = String::from(" ");
    for x in 0..size {
        labels.push(' ');
        labels.push(letter(x, skip_i).unwrap_or('?'));
    }
    labels.push(' ');
    labels
}
