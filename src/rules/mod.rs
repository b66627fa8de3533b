//! Rules: move validation, move application, and the turn state machine.
//!
//! - `MoveEngine::validate` decides legality without side effects
//! - `MoveEngine::apply` mutates track and reserves for an accepted move
//! - `MoveEngine::roll` / `play` / `switch_turn` drive turns
//!
//! Illegal moves are values (`Rejection`), not errors.

pub mod decision;
pub mod engine;

pub use decision::{
    Decision, GameResult, MoveResult, Outcome, PlannedMove, Rejection, RollReport, TurnPhase,
};
pub use engine::MoveEngine;
