//! View state fed by the session's render calls.

use crate::render::Renderer;
use morris_board::{Color, Move, Square};

/// What the terminal UI knows beyond the board itself: the latest event
/// line, a surfaced error if any, and the squares to highlight.
#[derive(Debug, Default)]
pub struct TuiView {
    message: String,
    error: Option<String>,
    highlights: Vec<Square>,
}

impl TuiView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest move or result line.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The last surfaced error, until the next applied move clears it.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True if the square is one the player may currently act on.
    pub fn is_highlighted(&self, square: Square) -> bool {
        self.highlights.contains(&square)
    }
}

impl Renderer for TuiView {
    fn render_move(&mut self, mover: Color, mv: &Move) {
        self.error = None;
        self.message = format!("{mover}: {mv}");
    }

    fn render_legal_highlight(&mut self, squares: Vec<Square>) {
        self.highlights = squares;
    }

    fn render_error(&mut self, message: &str) {
        self.error = Some(message.to_owned());
    }

    fn render_result(&mut self, winner: Color) {
        self.message = format!("{winner} wins the game");
    }
}
