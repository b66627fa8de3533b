//! Track cells: behavioral flags plus the set of players standing on them.
//!
//! ## Occupancy rules
//!
//! - A player has at most one piece per cell (`Occupants` is a set).
//! - A **mirror** cell may hold one piece of each player at once.
//! - Every other cell holds at most one piece overall. A capture on a
//!   **fight** cell replaces the occupant instead of joining it.
//!
//! `Cell::place` enforces these rules on every mutation.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::player::PlayerId;

/// Fixed behavioral flags of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSpec {
    /// Pieces of both players may share this cell.
    pub mirror: bool,

    /// A lone opponent piece here can be captured.
    pub fight: bool,

    /// Landing here grants another roll.
    pub bonus: bool,
}

impl CellSpec {
    /// A shared cell.
    #[must_use]
    pub const fn mirror() -> Self {
        Self { mirror: true, fight: false, bonus: false }
    }

    /// A capture cell.
    #[must_use]
    pub const fn fight() -> Self {
        Self { mirror: false, fight: true, bonus: false }
    }

    /// A protected cell: neither shared nor capturable.
    #[must_use]
    pub const fn protected() -> Self {
        Self { mirror: false, fight: false, bonus: false }
    }

    /// Mark the cell as granting a bonus roll.
    #[must_use]
    pub const fn with_bonus(mut self) -> Self {
        self.bonus = true;
        self
    }

    /// Neither mirror nor fight: an occupant blocks the opponent entirely.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        !self.mirror && !self.fight
    }
}

/// Set of players with a piece on a cell.
///
/// One bit per seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupants(u8);

impl Occupants {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A set containing only `player`.
    #[must_use]
    pub const fn only(player: PlayerId) -> Self {
        Self(1 << player.0)
    }

    #[must_use]
    pub const fn contains(&self, player: PlayerId) -> bool {
        self.0 & (1 << player.0) != 0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the players in the set, in seat order.
    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all().filter(move |&p| self.contains(p))
    }

    fn insert(&mut self, player: PlayerId) {
        self.0 |= 1 << player.0;
    }

    fn remove(&mut self, player: PlayerId) -> bool {
        let present = self.contains(player);
        self.0 &= !(1 << player.0);
        present
    }
}

/// A single position on the track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    spec: CellSpec,
    occupants: Occupants,
}

impl Cell {
    /// Create an empty cell with the given flags.
    #[must_use]
    pub const fn new(spec: CellSpec) -> Self {
        Self {
            spec,
            occupants: Occupants::empty(),
        }
    }

    #[must_use]
    pub const fn spec(&self) -> CellSpec {
        self.spec
    }

    #[must_use]
    pub const fn occupants(&self) -> Occupants {
        self.occupants
    }

    #[must_use]
    pub const fn contains(&self, player: PlayerId) -> bool {
        self.occupants.contains(player)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// True if the other player has a piece here.
    #[must_use]
    pub const fn held_by_opponent_of(&self, player: PlayerId) -> bool {
        self.occupants.contains(player.opponent())
    }

    /// True if a piece of `player` may be put here without breaking the
    /// occupancy rules.
    #[must_use]
    pub const fn can_accept(&self, player: PlayerId) -> bool {
        !self.occupants.contains(player) && (self.spec.mirror || self.occupants.is_empty())
    }

    /// Put a piece of `player` on this cell.
    ///
    /// Fails if the player is already here, or if the cell is not a
    /// mirror cell and someone else is already here.
    pub(crate) fn place(&mut self, player: PlayerId, index: usize) -> Result<(), EngineError> {
        if !self.can_accept(player) {
            return Err(EngineError::CellConflict { index });
        }
        self.occupants.insert(player);
        Ok(())
    }

    /// Take a piece of `player` off this cell.
    pub(crate) fn remove(&mut self, player: PlayerId, index: usize) -> Result<(), EngineError> {
        if self.occupants.remove(player) {
            Ok(())
        } else {
            Err(EngineError::PieceNotOnCell { index })
        }
    }

    /// Capture: the cell ends up holding exactly `player`.
    ///
    /// Returns the players that were removed.
    pub(crate) fn replace(&mut self, player: PlayerId) -> Occupants {
        let previous = self.occupants;
        self.occupants = Occupants::only(player);
        let mut removed = previous;
        removed.remove(player);
        removed
    }
}
