// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest supported board
pub const MIN_SIZE: u8 = 5;
/// Largest supported board
pub const MAX_SIZE: u8 = 26;

/// Kind of game played on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GameKind {
    /// Go (囲碁)
    Go,
    /// Othello / Reversi
    Othello,
    /// Renju
    Renju,
    /// Gomoku
    Gomoku,
}

impl GameKind {
    /// All supported kinds
    pub const ALL: [GameKind; 4] = [
        GameKind::Go,
        GameKind::Othello,
        GameKind::Renju,
        GameKind::Gomoku,
    ];

    /// SGF `GM` property value
    pub fn sgf_code(&self) -> u8 {
        match self {
            GameKind::Go => 1,
            GameKind::Othello => 2,
            GameKind::Renju | GameKind::Gomoku => 4,
        }
    }

    /// Kind for an SGF `GM` value. Code 4 is read as gomoku.
    pub fn from_sgf_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(GameKind::Go),
            2 => Some(GameKind::Othello),
            4 => Some(GameKind::Gomoku),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Go => "go",
            GameKind::Othello => "othello",
            GameKind::Renju => "renju",
            GameKind::Gomoku => "gomoku",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ConfigError::UnknownGameKind(s.to_string()))
    }
}

impl TryFrom<String> for GameKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameKind> for String {
    fn from(kind: GameKind) -> Self {
        kind.name().to_string()
    }
}

/// Settings fixed when a board is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of lines on each side (5..=26)
    pub size: u8,
    /// Game played on the board
    pub kind: GameKind,
    /// Black player's name
    pub black: String,
    /// White player's name
    pub white: String,
    /// Never use the letter `i` in positions
    pub skip_i: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: 19,
            kind: GameKind::Go,
            black: "Black".to_string(),
            white: "White".to_string(),
            skip_i: false,
        }
    }
}

impl BoardConfig {
    /// Configuration for the given size and kind, other fields defaulted
    pub fn new(size: u8, kind: GameKind) -> Self {
        Self {
            size,
            kind,
            ..Self::default()
        }
    }

    /// Set both player names
    pub fn with_players(mut self, black: impl Into<String>, white: impl Into<String>) -> Self {
        self.black = black.into();
        self.white = white.into();
        self
    }

    /// Set the skip-letter convention
    pub fn with_skip_i(mut self, skip_i: bool) -> Self {
        self.skip_i = skip_i;
        self
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Check the invariants a board relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if self.skip_i && self.size == MAX_SIZE {
            return Err(ConfigError::SkipLetterOverflow(self.size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("go".parse::<GameKind>().unwrap(), GameKind::Go);
        assert_eq!("Othello".parse::<GameKind>().unwrap(), GameKind::Othello);
        assert_eq!(" RENJU ".parse::<GameKind>().unwrap(), GameKind::Renju);
        assert_eq!(
            "chess".parse::<GameKind>(),
            Err(ConfigError::UnknownGameKind("chess".to_string()))
        );
    }

    #[test]
    fn test_validate_sizes() {
        for size in MIN_SIZE..=MAX_SIZE {
            assert!(BoardConfig::new(size, GameKind::Go).validate().is_ok());
        }
        for size in [0, 1, 4, 27, 255] {
            assert_eq!(
                BoardConfig::new(size, GameKind::Go).validate(),
                Err(ConfigError::InvalidSize(size))
            );
        }
    }

    #[test]
    fn test_skip_i_on_largest_board() {
        let config = BoardConfig::new(26, GameKind::Go).with_skip_i(true);
        assert_eq!(config.validate(), Err(ConfigError::SkipLetterOverflow(26)));
        assert!(config.with_skip_i(false).validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config =
            BoardConfig::from_json(r#"{"size": 9, "kind": "gomoku", "black": "Shusaku"}"#).unwrap();
        assert_eq!(config.size, 9);
        assert_eq!(config.kind, GameKind::Gomoku);
        assert_eq!(config.black, "Shusaku");
        assert_eq!(config.white, "White");
        assert!(!config.skip_i);
    }

    #[test]
    fn test_from_json_unknown_kind() {
        let err = BoardConfig::from_json(r#"{"kind": "shogi"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.contains("shogi")));
    }

    #[test]
    fn test_sgf_codes() {
        assert_eq!(GameKind::Go.sgf_code(), 1);
        assert_eq!(GameKind::Othello.sgf_code(), 2);
        assert_eq!(GameKind::Renju.sgf_code(), 4);
        assert_eq!(GameKind::Gomoku.sgf_code(), 4);
        assert_eq!(GameKind::from_sgf_code(2), Some(GameKind::Othello));
        assert_eq!(GameKind::from_sgf_code(3), None);
    }
}
