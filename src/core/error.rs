//! Engine and configuration errors.
//!
//! Illegal moves are *not* errors: they come back as
//! [`Rejection`](crate::rules::Rejection) values. The types here cover
//! misuse of the turn protocol (rolling twice, moving without a roll),
//! bad configuration, and broken piece-count invariants. The latter are
//! unreachable when every move goes through validation first.

use thiserror::Error;

use super::player::PlayerId;

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The dice have never been rolled.
    #[error("the dice have not been rolled yet")]
    NoRollYet,

    /// A move was attempted without a fresh, unconsumed roll.
    #[error("roll the dice before moving")]
    StaleRoll,

    /// A roll was attempted while the previous roll is still unused.
    #[error("the dice were already rolled this turn")]
    RollPending,

    /// The game has a winner; no further rolls or moves are accepted.
    #[error("the game is over")]
    GameOver,

    /// A cell index outside the track.
    #[error("cell {index} is outside the track of length {len}")]
    OriginOutOfRange { index: usize, len: usize },

    /// A reserve decrement would go below zero.
    #[error("{player} has no pieces left in reserve")]
    ReserveUnderflow { player: PlayerId },

    /// A reserve increment would exceed the piece limit.
    #[error("{player} already holds the maximum of {max} pieces in reserve")]
    ReserveOverflow { player: PlayerId, max: u8 },

    /// Placing a piece would break a cell's occupancy rule.
    #[error("cell {index} cannot hold another player's piece")]
    CellConflict { index: usize },

    /// Removing a piece that is not on the cell.
    #[error("no matching piece on cell {index}")]
    PieceNotOnCell { index: usize },

    /// Invalid game configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors found while validating a [`GameConfig`](crate::core::GameConfig).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the track must have at least one cell")]
    EmptyTrack,

    #[error("at least one die is required")]
    NoDice,

    #[error("each player needs at least one piece")]
    NoPieces,

    #[error("both players use the color {0:?}")]
    DuplicateColor(String),

    #[error("{player} has more than {max} pieces in the starting position")]
    TooManyPieces { player: PlayerId, max: u8 },

    #[error("{player} has no pieces left to play in the starting position")]
    NoPiecesInPlay { player: PlayerId },

    #[error("seat {0} does not exist; seats are 0 and 1")]
    InvalidSeat(u8),
}
