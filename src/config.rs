//! Game configuration: player types, difficulty profiles and board size
//!
//! Loaded from an optional TOML file and overridden by command-line flags:
//!
//! ```toml
//! board_size = 13
//! black = "human"
//! white = "hard"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::{Board, BoardSize, Stone};
use crate::search::SearchConfig;

/// Board sizes offered to players
pub const PLAYABLE_SIZES: [usize; 3] = [9, 13, 19];

/// Computer strength, mapped to a `(depth, distance)` search profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }

    /// Plies searched after the root move
    pub fn search_depth(self) -> u8 {
        match self {
            Difficulty::Easy | Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Impossible => 4,
        }
    }

    /// Candidate radius around existing stones.
    /// Deeper profiles look at a narrower area.
    pub fn search_distance(self) -> u8 {
        match self {
            Difficulty::Easy | Difficulty::Impossible => 1,
            Difficulty::Medium | Difficulty::Hard => 2,
        }
    }

    /// Search parameters for a move on `board`; the opening flag is set on
    /// an empty board.
    pub fn search_config(self, board: &Board) -> SearchConfig {
        SearchConfig {
            max_depth: self.search_depth(),
            max_distance: self.search_distance(),
            opening: board.is_board_empty(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who plays a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlayerKind {
    Human,
    Computer(Difficulty),
}

impl PlayerKind {
    #[inline]
    pub fn is_computer(self) -> bool {
        matches!(self, PlayerKind::Computer(_))
    }

    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            PlayerKind::Computer(d) => Some(d),
            PlayerKind::Human => None,
        }
    }

    /// Every selectable option, human first
    pub fn options() -> impl Iterator<Item = PlayerKind> {
        std::iter::once(PlayerKind::Human).chain(Difficulty::ALL.into_iter().map(PlayerKind::Computer))
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => f.write_str("Human"),
            PlayerKind::Computer(d) => write!(f, "Computer ({d})"),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "easy" => Ok(PlayerKind::Computer(Difficulty::Easy)),
            "medium" => Ok(PlayerKind::Computer(Difficulty::Medium)),
            "hard" => Ok(PlayerKind::Computer(Difficulty::Hard)),
            "impossible" => Ok(PlayerKind::Computer(Difficulty::Impossible)),
            other => Err(ConfigError::Invalid {
                reason: format!(
                    "unknown player type '{other}' (expected human, easy, medium, hard or impossible)"
                ),
            }),
        }
    }
}

impl TryFrom<String> for PlayerKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlayerKind> for String {
    fn from(kind: PlayerKind) -> Self {
        match kind {
            PlayerKind::Human => "human".to_string(),
            PlayerKind::Computer(d) => d.name().to_ascii_lowercase(),
        }
    }
}

/// Settings for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub black: PlayerKind,
    pub white: PlayerKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 13,
            black: PlayerKind::Human,
            white: PlayerKind::Computer(Difficulty::Medium),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!(size = config.board_size, black = %config.black, white = %config.white, "Config loaded");
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PLAYABLE_SIZES.contains(&self.board_size) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "board size {} is not one of {:?}",
                    self.board_size, PLAYABLE_SIZES
                ),
            });
        }
        Ok(())
    }

    /// Validated board dimension
    pub fn size(&self) -> Result<BoardSize, ConfigError> {
        self.validate()?;
        BoardSize::new(self.board_size).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })
    }

    pub fn player(&self, color: Stone) -> PlayerKind {
        match color {
            Stone::White => self.white,
            _ => self.black,
        }
    }
}

/// Configuration error.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[display("failed to parse config: {source}")]
    Parse { source: toml::de::Error },
    #[display("invalid config: {reason}")]
    Invalid { reason: String },
}
