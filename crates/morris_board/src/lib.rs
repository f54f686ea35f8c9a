//! Pure domain model for nine men's morris, as mirrored on the client.
//!
//! The engine on the other end of the wire is the sole authority on
//! legality. This crate only models what the client needs to keep an
//! accurate mirror of the game and to give instant feedback on clicks:
//!
//! - [`Square`]: a point on the three-ring board
//! - [`Move`]: placements, shifts, captures and the explicit pass
//! - [`BoardState`]: the piece set, turn indicator, and the legal-move
//!   set most recently declared by the engine

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod moves;
mod square;

pub use board::{BoardError, BoardState, Color, Piece};
pub use moves::Move;
pub use square::Square;
