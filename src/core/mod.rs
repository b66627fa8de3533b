//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! This module contains the building blocks shared by the board, dice,
//! and rules modules.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap, PlayerRegistry, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{GameConfig, DEFAULT_COLORS, DEFAULT_MAX_PIECES};
pub use action::{Action, ActionRecord, MoveKind, Origin};
pub use error::{ConfigError, EngineError};
pub use state::{GameState, PieceCount};
