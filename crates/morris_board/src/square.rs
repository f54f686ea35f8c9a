//! Board positions.

use serde::{Deserialize, Serialize};

/// A point on the morris board.
///
/// The board is three concentric rings of eight points each. A square is
/// addressed as `(ring, spoke)`: ring 0 is the outermost ring, and spokes
/// count clockwise from each ring's top-left corner. On the wire a square
/// travels as the two-element array `[ring, spoke]`.
///
/// Squares are opaque positions: the only operation the client ever needs
/// is equality. Adjacency and mill geometry belong to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square(u8, u8);

impl Square {
    /// Number of concentric rings.
    pub const RINGS: u8 = 3;
    /// Points per ring.
    pub const SPOKES: u8 = 8;

    /// Creates a square at the given ring and spoke.
    pub fn new(ring: u8, spoke: u8) -> Self {
        Self(ring, spoke)
    }

    /// The ring this square sits on, outermost first.
    pub fn ring(self) -> u8 {
        self.0
    }

    /// Clockwise position on the ring, starting at the top-left corner.
    pub fn spoke(self) -> u8 {
        self.1
    }

    /// Iterates over all 24 points of the board.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::RINGS).flat_map(|ring| (0..Self::SPOKES).map(move |spoke| Square(ring, spoke)))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.0, self.1)
    }
}
