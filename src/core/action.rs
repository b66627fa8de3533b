//! Action representation: what a player did on a turn.
//!
//! A move is identified by its [`Origin`]: either a track cell holding one
//! of the mover's pieces, or the reserve (bring a new piece on). The engine
//! records every roll, automatic pass, and applied move as an
//! [`ActionRecord`] for replay and debugging.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Where the moving piece comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Origin {
    /// Enter a new piece from the player's reserve.
    Reserve,
    /// Move the piece on this track index.
    Cell(usize),
}

impl Origin {
    /// Track index the distance is counted from; `None` for the reserve,
    /// which sits one step before index 0.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Origin::Reserve => None,
            Origin::Cell(i) => Some(i),
        }
    }

    /// Position reached after `distance` steps.
    ///
    /// ```
    /// use royal_ur::core::Origin;
    ///
    /// assert_eq!(Origin::Reserve.target(3), Some(2));
    /// assert_eq!(Origin::Cell(5).target(2), Some(7));
    /// assert_eq!(Origin::Reserve.target(0), None);
    /// ```
    #[must_use]
    pub const fn target(self, distance: usize) -> Option<usize> {
        match self {
            Origin::Reserve => distance.checked_sub(1),
            Origin::Cell(i) => Some(i + distance),
        }
    }
}

impl From<Option<usize>> for Origin {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Origin::Reserve, Origin::Cell)
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Reserve => write!(f, "reserve"),
            Origin::Cell(i) => write!(f, "cell {}", i),
        }
    }
}

/// What an accepted move does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// The piece moves past the last cell and leaves the board.
    ExitBoard,
    /// The piece lands on an empty or shared cell.
    Advance,
    /// The piece lands on a fight cell and sends the opponent home.
    Capture,
}

impl MoveKind {
    /// Message shown to players when this move is applied.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            MoveKind::ExitBoard => "piece leaves the board",
            MoveKind::Advance => "cell taken",
            MoveKind::Capture => "cell taken and opponent piece captured",
        }
    }
}

/// A single recorded step of play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Dice thrown.
    Roll { distance: usize },
    /// Zero rolled; the turn passed without a move.
    Pass,
    /// A validated move was applied.
    Move {
        origin: Origin,
        kind: MoveKind,
        target: usize,
        bonus: bool,
    },
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
