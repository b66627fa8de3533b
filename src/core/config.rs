//! Game configuration.
//!
//! The rules are fixed; the board is not. A `GameConfig` carries:
//! - the track layout (mirror/fight/bonus flags per cell),
//! - the number of dice per roll,
//! - pieces per player,
//! - the two player colors.
//!
//! Defaults reproduce the standard 14-cell board with four dice, five
//! pieces each, and the colors `white` and `orange`.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PLAYER_COUNT;
use crate::board::{CellSpec, DEFAULT_LAYOUT};
use crate::dice::DEFAULT_DIE_COUNT;

/// Default pieces per player.
pub const DEFAULT_MAX_PIECES: u8 = 5;

/// Default player colors, seat 0 then seat 1.
pub const DEFAULT_COLORS: [&str; PLAYER_COUNT] = ["white", "orange"];

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use royal_ur::core::GameConfig;
/// use royal_ur::board::CellSpec;
///
/// let config = GameConfig::default()
///     .with_track(vec![CellSpec::mirror(); 6])
///     .with_max_pieces(3)
///     .with_colors("black", "red");
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.track.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cell flags in track order.
    pub track: Vec<CellSpec>,

    /// Dice thrown per roll.
    pub die_count: usize,

    /// Pieces each player owns.
    pub max_pieces: u8,

    /// Color identifier per seat.
    pub colors: [String; PLAYER_COUNT],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            track: DEFAULT_LAYOUT.to_vec(),
            die_count: DEFAULT_DIE_COUNT,
            max_pieces: DEFAULT_MAX_PIECES,
            colors: DEFAULT_COLORS.map(String::from),
        }
    }
}

impl GameConfig {
    /// Replace the track layout.
    #[must_use]
    pub fn with_track(mut self, track: Vec<CellSpec>) -> Self {
        self.track = track;
        self
    }

    /// Set the number of dice per roll.
    #[must_use]
    pub fn with_die_count(mut self, die_count: usize) -> Self {
        self.die_count = die_count;
        self
    }

    /// Set the number of pieces per player.
    #[must_use]
    pub fn with_max_pieces(mut self, max_pieces: u8) -> Self {
        self.max_pieces = max_pieces;
        self
    }

    /// Set both player colors.
    #[must_use]
    pub fn with_colors(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.colors = [first.into(), second.into()];
        self
    }

    /// Check the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.track.is_empty() {
            return Err(ConfigError::EmptyTrack);
        }
        if self.die_count == 0 {
            return Err(ConfigError::NoDice);
        }
        if self.max_pieces == 0 {
            return Err(ConfigError::NoPieces);
        }
        if self.colors[0] == self.colors[1] {
            return Err(ConfigError::DuplicateColor(self.colors[0].clone()));
        }
        Ok(())
    }
}
