//! Standard game wiring: a `GameState`, a die source, and the move engine
//! behind one handle.
//!
//! - Roll, validate, move, and pass the turn
//! - Read accessors for rendering (current player, board snapshot, phase)
//! - Builder for seeds, custom boards, fixed starting players and positions

mod ur;

pub use ur::{Game, GameBuilder};
