//! Results of validating and applying moves.
//!
//! - [`Decision`]: output of validation, either a [`PlannedMove`] or a
//!   [`Rejection`] with a human-readable reason.
//! - [`MoveResult`]: output of playing a move. `Rejected`, `Applied` and
//!   `Won` are distinct variants, so a finished game never looks like an
//!   illegal move.

use crate::core::{MoveKind, Origin, PlayerId};
use crate::dice::DiceRoll;

/// Why a proposed move is illegal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// A new piece was requested but the reserve is empty.
    NoPiecesInReserve,
    /// The origin cell holds no piece of the mover.
    NotYourPiece,
    /// The distance is zero, so nothing can move.
    ZeroDistance,
    /// The mover already has a piece on the target cell.
    OwnPieceOnTarget,
    /// The target is held by the opponent and is neither mirror nor fight.
    TargetProtected,
}

impl Rejection {
    /// Human-readable reason.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Rejection::NoPiecesInReserve => "no pieces in reserve",
            Rejection::NotYourPiece => "selected cell has no piece of yours",
            Rejection::ZeroDistance => "a roll of zero cannot move a piece",
            Rejection::OwnPieceOnTarget => "target already held by your own piece",
            Rejection::TargetProtected => "target occupied and protected",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// A validated move, ready to be applied to the state it was computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlannedMove {
    /// The mover.
    pub player: PlayerId,

    pub origin: Origin,

    pub kind: MoveKind,

    /// Landing index. For `ExitBoard` this is past the last cell.
    pub target: usize,

    /// Landing grants another roll. Always false for `ExitBoard`.
    pub bonus: bool,
}

/// Outcome of validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Accept(PlannedMove),
    Reject(Rejection),
}

impl Decision {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accept(_))
    }

    /// Human-readable description: the move's message, or why it was refused.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Decision::Accept(plan) => plan.kind.message(),
            Decision::Reject(rejection) => rejection.reason(),
        }
    }

    /// Move kind; `None` when rejected.
    #[must_use]
    pub fn kind(&self) -> Option<MoveKind> {
        self.planned().map(|p| p.kind)
    }

    /// Target position; `None` when rejected.
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        self.planned().map(|p| p.target)
    }

    /// Bonus flag; false when rejected.
    #[must_use]
    pub fn bonus(&self) -> bool {
        self.planned().is_some_and(|p| p.bonus)
    }

    #[must_use]
    pub fn planned(&self) -> Option<&PlannedMove> {
        match self {
            Decision::Accept(plan) => Some(plan),
            Decision::Reject(_) => None,
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Decision::Accept(_) => None,
            Decision::Reject(rejection) => Some(*rejection),
        }
    }
}

/// What the caller learns about an applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub message: &'static str,

    /// The mover rolls again instead of passing the turn.
    pub bonus: bool,
}

/// Result of playing a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// Illegal move; nothing changed, the same player may try another.
    Rejected(Rejection),
    /// The move was applied.
    Applied(Outcome),
    /// The move took the player's last piece off the board.
    Won(PlayerId),
}

impl MoveResult {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResult::Applied(_) | MoveResult::Won(_))
    }
}

/// Result of a throw of the dice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollReport {
    /// Who rolled.
    pub player: PlayerId,

    pub roll: DiceRoll,

    /// Zero was rolled and the turn already passed to the opponent.
    pub passed: bool,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner. The game has no draws.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }
}

/// Where the turn state machine stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// The player must roll.
    AwaitingRoll(PlayerId),
    /// The player rolled a non-zero distance and must move.
    Rolled(PlayerId),
    /// Terminal: the player has moved every piece off the board.
    Won(PlayerId),
}
