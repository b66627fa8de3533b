//! Dice subsystem.
//!
//! - `DieSource`: injectable source of binary faces (seeded RNG or script)
//! - `DiceRoller`: throws N dice, caches the last roll, tracks consumption

pub mod roller;
pub mod source;

pub use roller::{DiceRoll, DiceRoller, DEFAULT_DIE_COUNT};
pub use source::{DieSource, ScriptedDice};
