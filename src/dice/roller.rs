//! Binary dice: each die shows 0 or 1, the roll's distance is their sum.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::source::DieSource;
use crate::core::error::EngineError;

/// Default number of dice thrown per roll.
pub const DEFAULT_DIE_COUNT: usize = 4;

/// Faces of one roll plus the distance they add up to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Per-die faces in throw order, each 0 or 1.
    pub values: SmallVec<[u8; DEFAULT_DIE_COUNT]>,

    /// Sum of `values`.
    pub distance: usize,
}

impl DiceRoll {
    /// Build a roll from explicit faces.
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
            distance: values.iter().map(|&v| usize::from(v)).sum(),
        }
    }
}

/// Throws the dice and remembers whether the last throw has been used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceRoller {
    die_count: usize,
    last: Option<DiceRoll>,
    consumed: bool,
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(DEFAULT_DIE_COUNT)
    }
}

impl DiceRoller {
    /// Create a roller for `die_count` dice. Starts with no roll, consumed.
    #[must_use]
    pub fn new(die_count: usize) -> Self {
        Self {
            die_count,
            last: None,
            consumed: true,
        }
    }

    #[must_use]
    pub fn die_count(&self) -> usize {
        self.die_count
    }

    /// Throw every die once. The new roll starts unconsumed.
    pub fn roll(&mut self, source: &mut impl DieSource) -> DiceRoll {
        let values: SmallVec<[u8; DEFAULT_DIE_COUNT]> =
            (0..self.die_count).map(|_| u8::from(source.flip())).collect();
        let roll = DiceRoll::from_values(&values);

        debug!(values = ?roll.values, distance = roll.distance, "dice rolled");

        self.last = Some(roll.clone());
        self.consumed = false;
        roll
    }

    /// The most recent roll, without throwing.
    pub fn last_result(&self) -> Result<&DiceRoll, EngineError> {
        self.last.as_ref().ok_or(EngineError::NoRollYet)
    }

    /// Mark the current roll as used. Idempotent.
    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// The current roll if it has not been used yet.
    pub fn fresh_roll(&self) -> Result<&DiceRoll, EngineError> {
        match &self.last {
            Some(roll) if !self.consumed => Ok(roll),
            _ => Err(EngineError::StaleRoll),
        }
    }
}
