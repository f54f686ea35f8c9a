//! Tests for move equality and the wire encoding.

use morris_board::{Move, Square};
use serde_json::json;

fn sq(ring: u8, spoke: u8) -> Square {
    Square::new(ring, spoke)
}

#[test]
fn test_pass_equals_pass() {
    assert_eq!(Move::Pass, Move::Pass);
}

#[test]
fn test_pass_never_equals_a_real_move() {
    let place = Move::Place {
        to: sq(1, 1),
        capture: None,
    };
    assert_ne!(Move::Pass, place);
    assert_ne!(place, Move::Pass);
}

#[test]
fn test_place_differs_from_shift_to_same_square() {
    let place = Move::Place {
        to: sq(1, 1),
        capture: None,
    };
    let shift = Move::Shift {
        from: sq(0, 0),
        to: sq(1, 1),
        capture: None,
    };
    assert_ne!(place, shift);
}

#[test]
fn test_capture_presence_distinguishes_moves() {
    let bare = Move::Place {
        to: sq(1, 1),
        capture: None,
    };
    let capturing = Move::Place {
        to: sq(1, 1),
        capture: Some(sq(2, 2)),
    };
    assert_ne!(bare, capturing);
    assert_eq!(capturing, bare.with_capture(sq(2, 2)));
}

#[test]
fn test_same_path_ignores_capture() {
    let bare = Move::Shift {
        from: sq(2, 3),
        to: sq(2, 4),
        capture: None,
    };
    let capturing = bare.with_capture(sq(0, 0));
    assert!(bare.same_path(&capturing));
    assert!(capturing.same_path(&bare));

    let elsewhere = Move::Shift {
        from: sq(2, 3),
        to: sq(2, 2),
        capture: None,
    };
    assert!(!bare.same_path(&elsewhere));
    let place = Move::Place {
        to: sq(2, 4),
        capture: None,
    };
    assert!(!bare.same_path(&place));
}

#[test]
fn test_null_decodes_to_pass() {
    let mv: Move = serde_json::from_str("null").unwrap();
    assert_eq!(mv, Move::Pass);
}

#[test]
fn test_pass_encodes_to_null() {
    assert_eq!(serde_json::to_value(Move::Pass).unwrap(), json!(null));
}

#[test]
fn test_omitted_and_null_fields_decode_equal() {
    let explicit: Move =
        serde_json::from_str(r#"{"square":[1,1],"from_square":null,"remove_square":null}"#)
            .unwrap();
    let omitted: Move = serde_json::from_str(r#"{"square":[1,1]}"#).unwrap();
    assert_eq!(explicit, omitted);
    assert_eq!(
        explicit,
        Move::Place {
            to: sq(1, 1),
            capture: None
        }
    );
}

#[test]
fn test_shift_with_capture_round_trips() {
    let mv = Move::Shift {
        from: sq(2, 3),
        to: sq(2, 4),
        capture: Some(sq(0, 0)),
    };
    let value = serde_json::to_value(mv).unwrap();
    assert_eq!(
        value,
        json!({"square": [2, 4], "from_square": [2, 3], "remove_square": [0, 0]})
    );
    let decoded: Move = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, mv);
}

#[test]
fn test_placement_always_writes_all_three_fields() {
    let value = serde_json::to_value(Move::Place {
        to: sq(0, 5),
        capture: None,
    })
    .unwrap();
    assert_eq!(
        value,
        json!({"square": [0, 5], "from_square": null, "remove_square": null})
    );
}

#[test]
fn test_missing_square_is_rejected() {
    let result: Result<Move, _> = serde_json::from_str(r#"{"from_square":[0,0]}"#);
    assert!(result.is_err());
}

#[test]
fn test_unknown_field_is_rejected() {
    let result: Result<Move, _> = serde_json::from_str(r#"{"square":[1,1],"bogus":3}"#);
    assert!(result.is_err());
}
