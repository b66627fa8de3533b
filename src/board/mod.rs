//! Board model: cells with mirror/fight/bonus flags laid out on a track.
//!
//! The track is owned by [`GameState`](crate::core::GameState); only the
//! move engine mutates it.

pub mod cell;
pub mod track;

pub use cell::{Cell, CellSpec, Occupants};
pub use track::{Track, DEFAULT_LAYOUT, DEFAULT_TRACK_LENGTH};
