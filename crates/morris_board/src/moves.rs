//! First-class move types.
//!
//! Moves are domain events: they are compared against the engine's legal
//! set before anything is sent, and re-applied to the local board when the
//! engine reports them. Equality is structural, so a move built from a
//! click compares equal to the same move decoded off the wire.

use crate::square::Square;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// A single turn's action.
///
/// `capture` is present on both [`Move::Place`] and [`Move::Shift`]: the
/// engine attaches a capture to whichever move completed a mill, including
/// placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// The explicit no-move turn, taken when the mover has no legal move.
    Pass,
    /// Introduce a new piece on an empty square.
    Place {
        /// Destination square.
        to: Square,
        /// Opponent square captured by this placement, if any.
        capture: Option<Square>,
    },
    /// Relocate an existing piece.
    Shift {
        /// Square the piece leaves.
        from: Square,
        /// Destination square.
        to: Square,
        /// Opponent square captured by this shift, if any.
        capture: Option<Square>,
    },
}

impl Move {
    /// Destination square, if this is not a pass.
    pub fn to(&self) -> Option<Square> {
        match self {
            Move::Pass => None,
            Move::Place { to, .. } | Move::Shift { to, .. } => Some(*to),
        }
    }

    /// Source square of a shift.
    pub fn from(&self) -> Option<Square> {
        match self {
            Move::Shift { from, .. } => Some(*from),
            _ => None,
        }
    }

    /// The captured opponent square, if any.
    pub fn capture(&self) -> Option<Square> {
        match self {
            Move::Pass => None,
            Move::Place { capture, .. } | Move::Shift { capture, .. } => *capture,
        }
    }

    /// True if this move is the explicit pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    /// True if both moves take the same path, ignoring any capture.
    ///
    /// Used to recognize that a clicked placement or shift only appears in
    /// the legal set with a capture attached, which means the player still
    /// has to name an opponent piece to remove.
    pub fn same_path(&self, other: &Move) -> bool {
        match (self, other) {
            (Move::Pass, Move::Pass) => true,
            (Move::Place { to: a, .. }, Move::Place { to: b, .. }) => a == b,
            (
                Move::Shift { from: fa, to: ta, .. },
                Move::Shift { from: fb, to: tb, .. },
            ) => fa == fb && ta == tb,
            _ => false,
        }
    }

    /// The same path with the given capture attached. A pass is unchanged.
    pub fn with_capture(self, square: Square) -> Move {
        match self {
            Move::Pass => Move::Pass,
            Move::Place { to, .. } => Move::Place {
                to,
                capture: Some(square),
            },
            Move::Shift { from, to, .. } => Move::Shift {
                from,
                to,
                capture: Some(square),
            },
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Place { to, capture } => {
                write!(f, "place {to}")?;
                if let Some(square) = capture {
                    write!(f, " removing {square}")?;
                }
                Ok(())
            }
            Move::Shift { from, to, capture } => {
                write!(f, "{from} to {to}")?;
                if let Some(square) = capture {
                    write!(f, " removing {square}")?;
                }
                Ok(())
            }
        }
    }
}

const FIELDS: [&str; 3] = ["square", "from_square", "remove_square"];

// The wire form is the engine's three-field record; a pass is JSON null.
// All three keys are always written so the frame shape never depends on
// the move kind.
impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_pass() {
            return serializer.serialize_none();
        }
        let mut s = serializer.serialize_struct("Move", 3)?;
        s.serialize_field("square", &self.to())?;
        s.serialize_field("from_square", &self.from())?;
        s.serialize_field("remove_square", &self.capture())?;
        s.end()
    }
}

struct MoveVisitor;

impl<'de> Visitor<'de> for MoveVisitor {
    type Value = Move;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a move object or null")
    }

    fn visit_unit<E>(self) -> Result<Move, E>
    where
        E: serde::de::Error,
    {
        Ok(Move::Pass)
    }

    fn visit_none<E>(self) -> Result<Move, E>
    where
        E: serde::de::Error,
    {
        Ok(Move::Pass)
    }

    fn visit_map<V>(self, mut map: V) -> Result<Move, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut square = None;
        let mut from_square = None;
        let mut remove_square = None;
        while let Some(key) = map.next_key::<String>()? {
            let field = match key.as_str() {
                "square" => &mut square,
                "from_square" => &mut from_square,
                "remove_square" => &mut remove_square,
                _ => return Err(serde::de::Error::unknown_field(&key, &FIELDS)),
            };
            // Absent keys and explicit nulls mean the same thing, so both
            // ends agree no matter which form a peer emits.
            *field = map.next_value::<Option<Square>>()?;
        }
        let to = square.ok_or_else(|| serde::de::Error::missing_field("square"))?;
        Ok(match from_square {
            Some(from) => Move::Shift {
                from,
                to,
                capture: remove_square,
            },
            None => Move::Place {
                to,
                capture: remove_square,
            },
        })
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoveVisitor)
    }
}
