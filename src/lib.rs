//! # royal-ur
//!
//! Rules engine for a two-player race-and-capture board game in the family
//! of the Royal Game of Ur.
//!
//! Players roll four binary dice, advance pieces along a shared track by
//! the rolled distance, capture lone opponents on fight cells, share mirror
//! cells, and win by moving all of their pieces off the end of the track.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: a `GameState` value owned by the caller. No globals.
//!
//! 2. **Rejections are values**: an illegal move yields a `Rejection` with a
//!    human-readable reason; winning yields `MoveResult::Won`. The two are
//!    never conflated.
//!
//! 3. **Invariants in one place**: only the move engine writes to the track
//!    and the reserves, so `reserve + on_board + finished == max_pieces`
//!    always holds.
//!
//! 4. **Deterministic dice**: a seedable ChaCha8 RNG behind the `DieSource`
//!    trait; tests can script exact rolls.
//!
//! ## Modules
//!
//! - `core`: players, reserves, configuration, actions, errors, game state
//! - `board`: cells and the track layout
//! - `dice`: die sources and the roller
//! - `rules`: move validation/application and the turn state machine
//! - `game`: the `Game` facade and its builder

pub mod core;
pub mod board;
pub mod dice;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, EngineError, GameConfig, GameRng, GameState, MoveKind,
    Origin, PieceCount, Player, PlayerId, PlayerMap, PlayerRegistry,
};

pub use crate::board::{Cell, CellSpec, Occupants, Track, DEFAULT_LAYOUT};

pub use crate::dice::{DiceRoll, DiceRoller, DieSource, ScriptedDice};

pub use crate::rules::{
    Decision, GameResult, MoveEngine, MoveResult, Outcome, PlannedMove, Rejection, RollReport,
    TurnPhase,
};

pub use crate::game::{Game, GameBuilder};
