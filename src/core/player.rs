//! Player identification, per-player storage and piece reserves.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. The game always has exactly two seats,
//! `PlayerId(0)` and `PlayerId(1)`.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`.
//!
//! ## PlayerRegistry
//!
//! The two `Player`s (color + reserve) with bounds-checked reserve updates.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use tracing::error;

use super::error::{ConfigError, EngineError};

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier, `0` or `1`.
///
/// The field is public for `const` construction; it must be below
/// [`PLAYER_COUNT`]. Deserialization checks this through `TryFrom<u8>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Both seats, in index order.
    pub const ALL: [PlayerId; PLAYER_COUNT] = [PlayerId(0), PlayerId(1)];

    /// Create a new player ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < PLAYER_COUNT, "Player id must be 0 or 1");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use royal_ur::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if usize::from(id) < PLAYER_COUNT {
            Ok(Self(id))
        } else {
            Err(ConfigError::InvalidSeat(id))
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use royal_ur::core::{PlayerId, PlayerMap};
///
/// let mut reserve: PlayerMap<u8> = PlayerMap::new(|_| 5);
/// reserve[PlayerId::new(1)] -= 1;
///
/// assert_eq!(reserve[PlayerId::new(0)], 5);
/// assert_eq!(reserve[PlayerId::new(1)], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One participant: a color and the pieces not yet placed on the track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Color identifier, unique within a game.
    pub color: String,

    /// Pieces waiting off-board to enter the track.
    reserve: u8,
}

impl Player {
    /// Create a player with a full reserve.
    pub fn new(color: impl Into<String>, reserve: u8) -> Self {
        Self {
            color: color.into(),
            reserve,
        }
    }

    /// Pieces still in reserve.
    #[must_use]
    pub fn reserve(&self) -> u8 {
        self.reserve
    }
}

/// Both players plus the shared per-player piece limit.
///
/// Reserves can only change through [`PlayerRegistry::adjust_reserve`],
/// which refuses to leave `0..=max_pieces`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: PlayerMap<Player>,
    max_pieces: u8,
}

impl PlayerRegistry {
    /// Create a registry where each player starts with `max_pieces` in reserve.
    pub fn new(colors: &[String; PLAYER_COUNT], max_pieces: u8) -> Result<Self, ConfigError> {
        if max_pieces == 0 {
            return Err(ConfigError::NoPieces);
        }
        if colors[0] == colors[1] {
            return Err(ConfigError::DuplicateColor(colors[0].clone()));
        }

        Ok(Self {
            players: PlayerMap::new(|p| Player::new(colors[p.index()].clone(), max_pieces)),
            max_pieces,
        })
    }

    /// Maximum number of pieces each player owns.
    #[must_use]
    pub fn max_pieces(&self) -> u8 {
        self.max_pieces
    }

    /// Get a player.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Reserve count for a player.
    #[must_use]
    pub fn reserve(&self, player: PlayerId) -> u8 {
        self.players[player].reserve
    }

    /// Find the seat holding a color.
    #[must_use]
    pub fn by_color(&self, color: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.color == color)
            .map(|(id, _)| id)
    }

    /// Iterate over (PlayerId, &Player) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    /// Add `delta` to a player's reserve, staying within `0..=max_pieces`.
    ///
    /// Returns the new reserve. On failure the reserve is unchanged.
    pub fn adjust_reserve(&mut self, player: PlayerId, delta: i8) -> Result<u8, EngineError> {
        let max = self.max_pieces;
        let current = i16::from(self.players[player].reserve);
        let next = current + i16::from(delta);

        if next < 0 {
            error!(%player, current, delta, "reserve underflow");
            return Err(EngineError::ReserveUnderflow { player });
        }
        if next > i16::from(max) {
            error!(%player, current, delta, max, "reserve overflow");
            return Err(EngineError::ReserveOverflow { player, max });
        }

        // next is within 0..=max, which fits u8
        let next = next as u8;
        self.players[player].reserve = next;
        Ok(next)
    }
}

impl Index<PlayerId> for PlayerRegistry {
    type Output = Player;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}
