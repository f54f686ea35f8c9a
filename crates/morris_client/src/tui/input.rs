//! Cursor movement over the board's rings and spokes.

use crossterm::event::KeyCode;
use morris_board::Square;

/// Moves the cursor one step.
///
/// Left/right walk the current ring; up steps toward the outer ring,
/// down toward the inner one. Other keys leave the cursor in place.
pub fn move_cursor(cursor: Square, key: KeyCode) -> Square {
    let (ring, spoke) = (cursor.ring(), cursor.spoke());
    match key {
        KeyCode::Right => Square::new(ring, (spoke + 1) % Square::SPOKES),
        KeyCode::Left => Square::new(ring, (spoke + Square::SPOKES - 1) % Square::SPOKES),
        KeyCode::Up if ring > 0 => Square::new(ring - 1, spoke),
        KeyCode::Down if ring + 1 < Square::RINGS => Square::new(ring + 1, spoke),
        _ => cursor,
    }
}
