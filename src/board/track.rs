//! The track: an ordered, fixed-length sequence of cells.
//!
//! Pieces enter before index 0 and leave past the last index. The default
//! layout is the 14-cell board below; any other layout may be supplied
//! through [`GameConfig`](crate::core::GameConfig).
//!
//! | idx | mirror | fight | bonus |
//! |-----|--------|-------|-------|
//! | 0-2 | yes    |       |       |
//! | 3   | yes    |       | yes   |
//! | 4-6 |        | yes   |       |
//! | 7   |        |       | yes   |
//! | 8-11|        | yes   |       |
//! | 12  | yes    |       |       |
//! | 13  | yes    |       | yes   |

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellSpec, Occupants};
use crate::core::error::{ConfigError, EngineError};
use crate::core::player::PlayerId;

/// Length of the default track.
pub const DEFAULT_TRACK_LENGTH: usize = 14;

const M: CellSpec = CellSpec::mirror();
const F: CellSpec = CellSpec::fight();

/// Flags of the default 14-cell track, in track order.
pub const DEFAULT_LAYOUT: [CellSpec; DEFAULT_TRACK_LENGTH] = [
    M,
    M,
    M,
    M.with_bonus(),
    F,
    F,
    F,
    CellSpec::protected().with_bonus(),
    F,
    F,
    F,
    F,
    M,
    M.with_bonus(),
];

/// Ordered cells pieces traverse from entry to exit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    cells: Vec<Cell>,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            cells: DEFAULT_LAYOUT.iter().copied().map(Cell::new).collect(),
        }
    }
}

impl Track {
    /// Build an empty track from a layout.
    pub fn from_layout(layout: &[CellSpec]) -> Result<Self, ConfigError> {
        if layout.is_empty() {
            return Err(ConfigError::EmptyTrack);
        }
        Ok(Self {
            cells: layout.iter().copied().map(Cell::new).collect(),
        })
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed track; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the final cell. Anything beyond it is off the board.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.cells.len() - 1
    }

    /// Get a cell by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Get a cell, or an `OriginOutOfRange` error.
    pub fn cell(&self, index: usize) -> Result<&Cell, EngineError> {
        self.cells.get(index).ok_or(EngineError::OriginOutOfRange {
            index,
            len: self.cells.len(),
        })
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Cell, EngineError> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(EngineError::OriginOutOfRange { index, len })
    }

    /// Players on a cell; empty for out-of-range indices.
    #[must_use]
    pub fn occupants(&self, index: usize) -> Occupants {
        self.get(index).map(Cell::occupants).unwrap_or_default()
    }

    /// Iterate over cells in track order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The layout this track was built from.
    #[must_use]
    pub fn layout(&self) -> Vec<CellSpec> {
        self.cells.iter().map(Cell::spec).collect()
    }

    /// Number of pieces `player` has on the track.
    #[must_use]
    pub fn pieces_on_board(&self, player: PlayerId) -> usize {
        self.cells.iter().filter(|c| c.contains(player)).count()
    }

    /// Indices of cells holding a piece of `player`, ascending.
    pub fn positions(&self, player: PlayerId) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.contains(player))
            .map(|(i, _)| i)
    }

    // === Mutation (engine only) ===

    pub(crate) fn place(&mut self, index: usize, player: PlayerId) -> Result<(), EngineError> {
        self.cell_mut(index)?.place(player, index)
    }

    pub(crate) fn remove(&mut self, index: usize, player: PlayerId) -> Result<(), EngineError> {
        self.cell_mut(index)?.remove(player, index)
    }

    pub(crate) fn replace(&mut self, index: usize, player: PlayerId) -> Result<Occupants, EngineError> {
        Ok(self.cell_mut(index)?.replace(player))
    }
}
