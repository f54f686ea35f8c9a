//! The rendering contract the session drives.

use morris_board::{Color, Move, Square};

/// Rendering collaborator for a game session.
///
/// The session calls these as state changes; how they turn into pixels,
/// characters or test fixtures is the implementor's business. Calls are
/// notifications, not queries — the session never reads the renderer.
pub trait Renderer {
    /// A move was applied to the local board, by either side.
    fn render_move(&mut self, mover: Color, mv: &Move);

    /// Replace the highlighted squares the player may currently act on.
    /// An empty set clears the highlight.
    fn render_legal_highlight(&mut self, squares: Vec<Square>);

    /// Surface an error to the user. Game state has not changed.
    fn render_error(&mut self, message: &str);

    /// The game ended with the given winner.
    fn render_result(&mut self, winner: Color);
}
