//! The client-side board mirror.

use crate::moves::Move;
use crate::square::Square;
use tracing::{debug, instrument};

/// Owning color of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Color {
    /// Black places first.
    Black,
    /// White.
    White,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Maps the protocol's black flag to a color.
    pub fn from_is_black(is_black: bool) -> Self {
        if is_black { Color::Black } else { Color::White }
    }
}

/// A piece on the board.
///
/// Pieces come into being only through a placement move and leave only as
/// the capture target of some move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Stable identity, assigned in placement order.
    pub id: u32,
    /// Owning color.
    pub color: Color,
    /// Current position.
    pub square: Square,
}

/// Errors from applying a move the board cannot satisfy.
///
/// The engine guarantees every move it reports or permits is applicable,
/// so these only fire when the mirror and the engine have diverged. They
/// fail the session loudly rather than corrupt the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// A move targets an occupied destination square.
    #[display("destination {} is already occupied", _0)]
    SquareOccupied(Square),
    /// A shift or capture names a square with no piece on it.
    #[display("no piece on {}", _0)]
    VacantSquare(Square),
    /// A shift names a square holding the opponent's piece.
    #[display("piece on {} belongs to the opponent", _0)]
    NotMoversPiece(Square),
    /// A capture names a square holding the mover's own piece.
    #[display("cannot capture own piece on {}", _0)]
    FriendlyCapture(Square),
}

impl std::error::Error for BoardError {}

/// The authoritative-mirrored game state.
///
/// One copy lives on the client per session. Every mutation comes from a
/// move — the client's own, applied optimistically, or one reported by the
/// engine — and the legal-move set is whatever the engine last declared
/// for the player about to move.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pieces: Vec<Piece>,
    to_move: Color,
    legal_moves: Vec<Move>,
    placed: u32,
}

impl BoardState {
    /// Creates an empty board with black to move.
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            to_move: Color::Black,
            legal_moves: Vec::new(),
            placed: 0,
        }
    }

    /// All pieces currently on the board, in no particular order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The color about to move.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// The legal moves the engine last declared for the player to move.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// The piece on the given square, if any.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.square == square)
    }

    /// Applies a move for the player to move and hands the turn over.
    ///
    /// A pass flips the turn and nothing else. The turn flips exactly once
    /// on success and never on error.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] when the move names squares the board
    /// cannot satisfy; the board may then be partially updated and the
    /// session should be torn down.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn apply(&mut self, mv: Move) -> Result<(), BoardError> {
        match mv {
            Move::Pass => {}
            Move::Place { to, capture } => {
                self.place_piece(to)?;
                if let Some(square) = capture {
                    self.capture_piece(square)?;
                }
            }
            Move::Shift { from, to, capture } => {
                self.shift_piece(from, to)?;
                if let Some(square) = capture {
                    self.capture_piece(square)?;
                }
            }
        }
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Replaces the legal-move set wholesale.
    ///
    /// No consistency check against the pieces: the engine's word is
    /// ground truth, stale sets are simply overwritten.
    pub fn set_legal_moves(&mut self, moves: Vec<Move>) {
        debug!(count = moves.len(), "legal moves replaced");
        self.legal_moves = moves;
    }

    /// True if the move structurally equals an entry in the legal set.
    ///
    /// A linear scan; the set is small and duplicates are harmless.
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves.iter().any(|legal| legal == mv)
    }

    /// Distinct destination squares across the legal set.
    pub fn legal_destinations(&self) -> Vec<Square> {
        let mut squares = Vec::new();
        for mv in &self.legal_moves {
            if let Some(to) = mv.to() {
                if !squares.contains(&to) {
                    squares.push(to);
                }
            }
        }
        squares
    }

    /// Distinct destinations of legal shifts leaving the given square.
    pub fn legal_destinations_from(&self, from: Square) -> Vec<Square> {
        let mut squares = Vec::new();
        for mv in &self.legal_moves {
            if mv.from() == Some(from) {
                if let Some(to) = mv.to() {
                    if !squares.contains(&to) {
                        squares.push(to);
                    }
                }
            }
        }
        squares
    }

    /// Capture squares of legal moves sharing the given move's path.
    ///
    /// Non-empty exactly when the path is playable but only with a named
    /// capture.
    pub fn capture_squares_for(&self, base: &Move) -> Vec<Square> {
        let mut squares = Vec::new();
        for mv in &self.legal_moves {
            if mv.same_path(base) {
                if let Some(square) = mv.capture() {
                    if !squares.contains(&square) {
                        squares.push(square);
                    }
                }
            }
        }
        squares
    }

    fn place_piece(&mut self, to: Square) -> Result<(), BoardError> {
        if self.piece_at(to).is_some() {
            return Err(BoardError::SquareOccupied(to));
        }
        self.pieces.push(Piece {
            id: self.placed,
            color: self.to_move,
            square: to,
        });
        self.placed += 1;
        Ok(())
    }

    fn shift_piece(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        if self.piece_at(to).is_some() {
            return Err(BoardError::SquareOccupied(to));
        }
        let index = self
            .pieces
            .iter()
            .position(|piece| piece.square == from)
            .ok_or(BoardError::VacantSquare(from))?;
        if self.pieces[index].color != self.to_move {
            return Err(BoardError::NotMoversPiece(from));
        }
        self.pieces[index].square = to;
        Ok(())
    }

    fn capture_piece(&mut self, square: Square) -> Result<(), BoardError> {
        let index = self
            .pieces
            .iter()
            .position(|piece| piece.square == square)
            .ok_or(BoardError::VacantSquare(square))?;
        if self.pieces[index].color == self.to_move {
            return Err(BoardError::FriendlyCapture(square));
        }
        self.pieces.swap_remove(index);
        Ok(())
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
