//! Where die faces come from.
//!
//! Games use [`GameRng`] (seeded ChaCha8). Tests and replays can plug in
//! [`ScriptedDice`] to get an exact sequence of faces.

use crate::core::rng::GameRng;

/// Produces independent, unbiased binary die faces.
pub trait DieSource {
    /// Throw one die: `true` for the marked face (counts 1).
    fn flip(&mut self) -> bool;
}

impl DieSource for GameRng {
    fn flip(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn flip(&mut self) -> bool {
        (**self).flip()
    }
}

/// Replays a fixed list of faces, cycling when it runs out.
///
/// ```
/// use royal_ur::dice::{DieSource, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([1, 0]);
/// assert!(dice.flip());
/// assert!(!dice.flip());
/// assert!(dice.flip());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create from faces; any non-zero face counts as 1.
    ///
    /// Panics if `faces` is empty.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: Vec<u8> = faces.into_iter().collect();
        assert!(!faces.is_empty(), "ScriptedDice needs at least one face");
        Self { faces, cursor: 0 }
    }

    /// Script whole rolls by distance for `die_count` dice per roll.
    ///
    /// A distance `d` is written as `d` ones followed by zeros.
    pub fn from_distances(die_count: usize, distances: &[usize]) -> Self {
        let faces = distances.iter().flat_map(|&d| {
            assert!(d <= die_count, "distance {} exceeds {} dice", d, die_count);
            (0..die_count).map(move |i| u8::from(i < d))
        });
        Self::new(faces)
    }

    /// Faces still to come before the script wraps.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len() - self.cursor
    }
}

impl DieSource for ScriptedDice {
    fn flip(&mut self) -> bool {
        let face = self.faces[self.cursor];
        self.cursor = (self.cursor + 1) % self.faces.len();
        face != 0
    }
}
