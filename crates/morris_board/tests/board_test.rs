//! Tests for the board mirror: applying moves and legality lookup.

use morris_board::{BoardError, BoardState, Color, Move, Square};

fn sq(ring: u8, spoke: u8) -> Square {
    Square::new(ring, spoke)
}

fn place(to: Square) -> Move {
    Move::Place { to, capture: None }
}

fn shift(from: Square, to: Square) -> Move {
    Move::Shift {
        from,
        to,
        capture: None,
    }
}

#[test]
fn test_new_board_is_empty_with_black_to_move() {
    let board = BoardState::new();
    assert!(board.pieces().is_empty());
    assert_eq!(board.to_move(), Color::Black);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_placement_creates_one_piece_for_the_mover() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap();

    assert_eq!(board.pieces().len(), 1);
    let piece = board.piece_at(sq(0, 0)).unwrap();
    assert_eq!(piece.color, Color::Black);
    assert_eq!(board.to_move(), Color::White);
}

#[test]
fn test_pass_only_flips_the_turn() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap();
    let before = board.pieces().to_vec();

    board.apply(Move::Pass).unwrap();
    assert_eq!(board.pieces(), before.as_slice());
    assert_eq!(board.to_move(), Color::Black);
}

#[test]
fn test_shift_relocates_the_same_piece() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap(); // black
    board.apply(place(sq(1, 0))).unwrap(); // white
    let id = board.piece_at(sq(0, 0)).unwrap().id;

    board.apply(shift(sq(0, 0), sq(0, 1))).unwrap(); // black
    assert_eq!(board.pieces().len(), 2);
    assert!(board.piece_at(sq(0, 0)).is_none());
    let moved = board.piece_at(sq(0, 1)).unwrap();
    assert_eq!(moved.id, id);
    assert_eq!(moved.color, Color::Black);
    assert_eq!(board.to_move(), Color::White);
}

#[test]
fn test_capture_removes_exactly_the_named_piece() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap(); // black
    board.apply(place(sq(1, 0))).unwrap(); // white
    board.apply(place(sq(0, 2))).unwrap(); // black
    board.apply(place(sq(1, 4))).unwrap(); // white

    // Black shifts and captures the white piece on [1,0].
    board
        .apply(shift(sq(0, 0), sq(0, 1)).with_capture(sq(1, 0)))
        .unwrap();

    assert_eq!(board.pieces().len(), 3);
    assert!(board.piece_at(sq(1, 0)).is_none());
    assert!(board.piece_at(sq(0, 1)).is_some());
    assert!(board.piece_at(sq(0, 2)).is_some());
    assert!(board.piece_at(sq(1, 4)).is_some());
    assert_eq!(board.to_move(), Color::White);
}

#[test]
fn test_every_applied_branch_flips_the_turn_once() {
    let mut board = BoardState::new();
    let moves = [
        place(sq(0, 0)),                             // black placement
        place(sq(1, 0)),                             // white placement
        shift(sq(0, 0), sq(0, 1)),                   // black shift
        shift(sq(1, 0), sq(1, 1)).with_capture(sq(0, 1)), // white shift + capture
        Move::Pass,                                  // black pass
    ];
    let mut mover = Color::Black;
    for mv in moves {
        assert_eq!(board.to_move(), mover);
        board.apply(mv).unwrap();
        mover = mover.opponent();
        assert_eq!(board.to_move(), mover);
    }
}

#[test]
fn test_placement_onto_occupied_square_fails_without_flipping() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap();

    let err = board.apply(place(sq(0, 0))).unwrap_err();
    assert_eq!(err, BoardError::SquareOccupied(sq(0, 0)));
    assert_eq!(board.to_move(), Color::White);
    assert_eq!(board.pieces().len(), 1);
}

#[test]
fn test_shift_from_vacant_square_fails() {
    let mut board = BoardState::new();
    let err = board.apply(shift(sq(2, 2), sq(2, 3))).unwrap_err();
    assert_eq!(err, BoardError::VacantSquare(sq(2, 2)));
    assert_eq!(board.to_move(), Color::Black);
}

#[test]
fn test_shift_of_opponent_piece_fails() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap(); // black piece, white to move
    let err = board.apply(shift(sq(0, 0), sq(0, 1))).unwrap_err();
    assert_eq!(err, BoardError::NotMoversPiece(sq(0, 0)));
}

#[test]
fn test_capture_of_vacant_or_friendly_square_fails() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap(); // black
    board.apply(place(sq(1, 0))).unwrap(); // white

    let vacant = board
        .apply(place(sq(0, 4)).with_capture(sq(2, 2)))
        .unwrap_err();
    assert_eq!(vacant, BoardError::VacantSquare(sq(2, 2)));

    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap();
    board.apply(place(sq(1, 0))).unwrap();
    let friendly = board
        .apply(place(sq(0, 4)).with_capture(sq(0, 0)))
        .unwrap_err();
    assert_eq!(friendly, BoardError::FriendlyCapture(sq(0, 0)));
}

#[test]
fn test_is_legal_matches_structurally() {
    let mut board = BoardState::new();
    board.set_legal_moves(vec![place(sq(1, 1)), place(sq(0, 0))]);

    assert!(board.is_legal(&place(sq(1, 1))));
    assert!(!board.is_legal(&place(sq(2, 2))));
    assert!(!board.is_legal(&place(sq(1, 1)).with_capture(sq(0, 0))));
    assert!(!board.is_legal(&Move::Pass));
}

#[test]
fn test_is_legal_on_empty_set_is_always_false() {
    let board = BoardState::new();
    assert!(!board.is_legal(&place(sq(0, 0))));
    assert!(!board.is_legal(&Move::Pass));
}

#[test]
fn test_duplicate_legal_entries_are_harmless() {
    let mut board = BoardState::new();
    board.set_legal_moves(vec![place(sq(1, 1)), place(sq(1, 1))]);
    assert!(board.is_legal(&place(sq(1, 1))));
    assert_eq!(board.legal_destinations(), vec![sq(1, 1)]);
}

#[test]
fn test_set_legal_moves_replaces_wholesale() {
    let mut board = BoardState::new();
    board.set_legal_moves(vec![place(sq(1, 1))]);
    board.set_legal_moves(vec![place(sq(2, 2))]);

    assert!(!board.is_legal(&place(sq(1, 1))));
    assert!(board.is_legal(&place(sq(2, 2))));
}

#[test]
fn test_legal_destinations_from_filters_by_source() {
    let mut board = BoardState::new();
    board.set_legal_moves(vec![
        shift(sq(0, 0), sq(0, 1)),
        shift(sq(0, 0), sq(0, 7)),
        shift(sq(1, 2), sq(1, 3)),
    ]);

    assert_eq!(
        board.legal_destinations_from(sq(0, 0)),
        vec![sq(0, 1), sq(0, 7)]
    );
    assert_eq!(board.legal_destinations_from(sq(1, 2)), vec![sq(1, 3)]);
    assert!(board.legal_destinations_from(sq(2, 2)).is_empty());
}

#[test]
fn test_capture_squares_for_collects_capture_variants() {
    let mut board = BoardState::new();
    let base = shift(sq(0, 0), sq(0, 1));
    board.set_legal_moves(vec![
        base.with_capture(sq(1, 0)),
        base.with_capture(sq(1, 4)),
        shift(sq(0, 2), sq(0, 3)),
    ]);

    assert_eq!(board.capture_squares_for(&base), vec![sq(1, 0), sq(1, 4)]);
    assert!(board
        .capture_squares_for(&shift(sq(0, 2), sq(0, 3)))
        .is_empty());
}

#[test]
fn test_piece_squares_stay_unique() {
    let mut board = BoardState::new();
    board.apply(place(sq(0, 0))).unwrap();
    board.apply(place(sq(0, 1))).unwrap();
    board.apply(shift(sq(0, 0), sq(0, 7))).unwrap();
    board.apply(shift(sq(0, 1), sq(0, 2))).unwrap();

    let squares: Vec<_> = board.pieces().iter().map(|p| p.square).collect();
    for (i, a) in squares.iter().enumerate() {
        for b in &squares[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
