// SPDX-License-Identifier: MIT OR Apache-2.0

//! SGF (Smart Game Format) export and import
//!
//! Export writes one root node with game info followed by one node per move:
//!
//! ```text
//! (;GM[1]FF[4]AP[goban:0.1.0]SZ[19]PB[Black]PW[White]
//! ;B[pd];W[dd]
//! )
//! ```
//!
//! SGF coordinates always use the direct letter mapping, whatever the
//! board's `skip_i` setting.

use crate::board::Board;
use crate::config::BoardConfig;
use crate::coords;
use crate::{Color, ConfigError, GameKind, MoveError};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Application tag written to `AP`
pub const APPLICATION: &str = concat!("goban:", env!("CARGO_PKG_VERSION"));

/// Largest board on which `tt` means pass
const TT_PASS_MAX_SIZE: u8 = 19;

/// Errors raised while reading an SGF record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SgfError {
    /// Text is not well-formed SGF
    #[error("SGF syntax error: {0}")]
    Syntax(String),

    /// Root properties describe a board that cannot be built
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `GM` names a game this crate does not model
    #[error("Unsupported SGF game type: {0}")]
    UnsupportedGame(String),

    /// A move is recorded for the wrong player
    #[error("Move {move_number} played by {found:?} but {expected:?} is to move")]
    OutOfTurn {
        /// Number the move would have carried
        move_number: u32,
        /// Player whose turn it was
        expected: Color,
        /// Player recorded in the file
        found: Color,
    },

    /// A recorded move was refused by the board
    #[error("Move {move_number} is invalid: {source}")]
    Move {
        /// Number the move would have carried
        move_number: u32,
        /// Why the board refused it
        source: MoveError,
    },
}

/// Render the board's game record
pub fn to_sgf(board: &Board) -> String {
    let mut sgf = format!(
        "(;GM[{}]FF[4]AP[{}]SZ[{}]PB[{}]PW[{}]\n",
        board.kind().sgf_code(),
        APPLICATION,
        board.size(),
        escape(board.player(Color::Black)),
        escape(board.player(Color::White)),
    );

    for mv in board.moves() {
        let pos = mv
            .coord
            .map(|coord| coords::encode_coord(coord, false))
            .unwrap_or_default();
        sgf.push(';');
        sgf.push(mv.player.sgf_letter());
        sgf.push('[');
        sgf.push_str(&pos);
        sgf.push(']');
    }

    sgf.push_str("\n)\n");
    sgf
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ']' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Rebuild a board from an SGF record, replaying its main line.
///
/// `GM` 4 is read as gomoku. The board uses the direct letter mapping.
pub fn parse(text: &str) -> Result<Board, SgfError> {
    let tree = Parser::new(text).game_tree()?;
    let root = tree
        .nodes
        .first()
        .ok_or_else(|| SgfError::Syntax("Game tree has no nodes".to_string()))?;

    let kind = match root.value("GM") {
        Some(code) => code
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(GameKind::from_sgf_code)
            .ok_or_else(|| SgfError::UnsupportedGame(code.to_string()))?,
        None => GameKind::Go,
    };
    let size = match root.value("SZ") {
        Some(sz) => sz
            .trim()
            .parse::<u8>()
            .map_err(|_| SgfError::Syntax(format!("Unsupported board size: {sz:?}")))?,
        None => 19,
    };

    let mut config = BoardConfig::new(size, kind);
    if let Some(black) = root.value("PB") {
        config.black = black.to_string();
    }
    if let Some(white) = root.value("PW") {
        config.white = white.to_string();
    }

    let mut board = Board::new(config)?;
    replay_main_line(&mut board, &tree)?;

    tracing::debug!(board = %board.id(), moves = board.moves().len(), "loaded SGF record");
    Ok(board)
}

fn replay_main_line(board: &mut Board, tree: &GameTree) -> Result<(), SgfError> {
    for node in &tree.nodes {
        for prop in &node.properties {
            let color = match prop.id.as_str() {
                "B" => Color::Black,
                "W" => Color::White,
                _ => continue,
            };
            replay_move(board, color, prop.values.first().map(String::as_str))?;
        }
    }

    // First variation is the main line.
    if let Some(main_line) = tree.variations.first() {
        replay_main_line(board, main_line)?;
    }

    Ok(())
}

fn replay_move(board: &mut Board, color: Color, value: Option<&str>) -> Result<(), SgfError> {
    let move_number = board.move_number();
    if color != board.turn() {
        return Err(SgfError::OutOfTurn {
            move_number,
            expected: board.turn(),
            found: color,
        });
    }

    let value = value.unwrap_or("").trim();
    if value.is_empty() || (value == "tt" && board.size() <= TT_PASS_MAX_SIZE) {
        board.pass();
        return Ok(());
    }

    let coord = coords::decode(value, false).map_err(|err| SgfError::Move {
        move_number,
        source: err.into(),
    })?;
    board
        .play_at(coord)
        .map(|_| ())
        .map_err(|source| SgfError::Move {
            move_number,
            source,
        })
}

/// An SGF property
#[derive(Debug, Clone)]
struct Property {
    id: String,
    values: Vec<String>,
}

/// An SGF node
#[derive(Debug, Clone)]
struct Node {
    properties: Vec<Property>,
}

impl Node {
    fn value(&self, id: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|prop| prop.id == id)
            .and_then(|prop| prop.values.first())
            .map(String::as_str)
    }
}

/// An SGF game tree
#[derive(Debug, Clone)]
struct GameTree {
    nodes: Vec<Node>,
    variations: Vec<GameTree>,
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }

    fn expect(&mut self, wanted: char, context: &str) -> Result<(), SgfError> {
        match self.chars.next() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(SgfError::Syntax(format!(
                "Expected '{wanted}' {context}, found '{c}'"
            ))),
            None => Err(SgfError::Syntax(format!(
                "Expected '{wanted}' {context}, found end of input"
            ))),
        }
    }

    fn game_tree(&mut self) -> Result<GameTree, SgfError> {
        self.skip_whitespace();
        self.expect('(', "at start of game tree")?;
        self.skip_whitespace();

        let mut nodes = Vec::new();
        while self.chars.peek() == Some(&';') {
            nodes.push(self.node()?);
            self.skip_whitespace();
        }

        let mut variations = Vec::new();
        while self.chars.peek() == Some(&'(') {
            variations.push(self.game_tree()?);
            self.skip_whitespace();
        }

        self.expect(')', "at end of game tree")?;
        Ok(GameTree { nodes, variations })
    }

    fn node(&mut self) -> Result<Node, SgfError> {
        self.expect(';', "at start of node")?;
        self.skip_whitespace();

        let mut properties = Vec::new();
        while self.chars.peek().is_some_and(|c| c.is_ascii_uppercase()) {
            properties.push(self.property()?);
            self.skip_whitespace();
        }

        Ok(Node { properties })
    }

    fn property(&mut self) -> Result<Property, SgfError> {
        let mut id = String::new();
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_uppercase()) {
            id.push(c);
        }
        self.skip_whitespace();

        let mut values = Vec::new();
        while self.chars.peek() == Some(&'[') {
            values.push(self.property_value()?);
            self.skip_whitespace();
        }

        if values.is_empty() {
            return Err(SgfError::Syntax(format!("Property {id} has no value")));
        }
        Ok(Property { id, values })
    }

    fn property_value(&mut self) -> Result<String, SgfError> {
        self.expect('[', "at start of property value")?;

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some('\\') => {
                    if let Some(c) = self.chars.next() {
                        value.push(c);
                    }
                }
                Some(']') => return Ok(value),
                Some(c) => value.push(c),
                None => {
                    return Err(SgfError::Syntax(
                        "Unterminated property value".to_string(),
                    ))
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    #[test]
    fn test_empty_record() {
        let board = Board::new(BoardConfig::new(9, GameKind::Othello)).unwrap();
        assert_eq!(
            to_sgf(&board),
            format!("(;GM[2]FF[4]AP[{APPLICATION}]SZ[9]PB[Black]PW[White]\n\n)\n")
        );
    }

    #[test]
    fn test_passes_render_empty() {
        let mut board = Board::new(BoardConfig::new(9, GameKind::Go)).unwrap();
        board.play("ee").unwrap();
        board.pass();
        assert!(to_sgf(&board).ends_with("\n;B[ee];W[]\n)\n"));
    }

    #[test]
    fn test_export_ignores_skip_i() {
        let mut board =
            Board::new(BoardConfig::new(19, GameKind::Go).with_skip_i(true)).unwrap();
        board.play("kk").unwrap();
        assert_eq!(board.moves()[0].coord, Some(Coord::new(9, 9)));
        assert!(to_sgf(&board).contains(";B[jj]"));
    }

    #[test]
    fn test_escape_names() {
        let board = Board::new(BoardConfig::default().with_players("a]b", "c\\d")).unwrap();
        let sgf = to_sgf(&board);
        assert!(sgf.contains(r"PB[a\]b]PW[c\\d]"));
        let parsed = parse(&sgf).unwrap();
        assert_eq!(parsed.player(Color::Black), "a]b");
        assert_eq!(parsed.player(Color::White), "c\\d");
    }

    #[test]
    fn test_parse_simple() {
        let sgf = "(;GM[1]FF[4]SZ[9];B[ee];W[dc];B[fc];W[];B[hh])";
        let board = parse(sgf).unwrap();
        assert_eq!(board.size(), 9);
        assert_eq!(board.kind(), GameKind::Go);
        assert_eq!(board.moves().len(), 5);
        assert_eq!(board.pieces().count(), 4);
        assert_eq!(board.turn(), Color::White);
    }

    #[test]
    fn test_parse_tt_pass() {
        let board = parse("(;SZ[19];B[tt];W[dd])").unwrap();
        assert!(board.moves()[0].is_pass());
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_parse_follows_first_variation() {
        let board = parse("(;SZ[9];B[ee](;W[cc];B[gg])(;W[gc]))").unwrap();
        assert_eq!(board.moves().len(), 3);
        assert!(board.get("gc").unwrap().is_none());
    }

    #[test]
    fn test_parse_out_of_turn() {
        assert_eq!(
            parse("(;SZ[9];B[ee];B[cc])").unwrap_err(),
            SgfError::OutOfTurn {
                move_number: 2,
                expected: Color::White,
                found: Color::Black,
            }
        );
    }

    #[test]
    fn test_parse_bad_move() {
        assert!(matches!(
            parse("(;SZ[9];B[ee];W[ee])"),
            Err(SgfError::Move {
                move_number: 2,
                source: MoveError::Occupied { .. }
            })
        ));
        assert!(matches!(
            parse("(;SZ[9];B[zz])"),
            Err(SgfError::Move { move_number: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_root() {
        assert!(matches!(parse("(;GM[3]SZ[9])"), Err(SgfError::UnsupportedGame(_))));
        assert_eq!(
            parse("(;SZ[30])").unwrap_err(),
            SgfError::Config(ConfigError::InvalidSize(30))
        );
        assert!(matches!(parse("(;SZ[9];B[ee]"), Err(SgfError::Syntax(_))));
        assert!(matches!(parse("(;SZ[9];B[ee)"), Err(SgfError::Syntax(_))));
        assert!(matches!(parse("()"), Err(SgfError::Syntax(_))));
    }
}
