use super::*;
use crate::error::BoardError;

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_pos_new() {
    let pos = Pos::new(1, 2);
    assert_eq!(pos.row, 1);
    assert_eq!(pos.col, 2);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(2, 2); // Center of 5x5
    assert_eq!(pos.to_index(5), 12);
    assert_eq!(Pos::from_index(12, 5), pos);
    assert_eq!(Pos::new(2, 2).to_index(3), 8);
    assert_eq!(Pos::from_index(8, 3), Pos::new(2, 2));
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0, 3));
    assert!(Pos::is_valid(2, 2, 3));
    assert!(!Pos::is_valid(3, 0, 3));
    assert!(Pos::is_valid(4, 4, 5));
    assert!(!Pos::is_valid(-1, 0, 5));
    assert!(!Pos::is_valid(0, 5, 5));
}

#[test]
fn test_pos_ordering_is_row_major() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 2) < Pos::new(1, 0));
    assert!(Pos::new(1, 0) < Pos::new(1, 1));
}

#[test]
fn test_variant_constants() {
    assert_eq!(Variant::Classic.size(), 3);
    assert_eq!(Variant::Classic.win_length(), 3);
    assert_eq!(Variant::Gomoku.size(), 5);
    assert_eq!(Variant::Gomoku.win_length(), 5);
    assert_eq!(Variant::Gomoku.cells(), MAX_CELLS);
}

#[test]
fn test_variant_names() {
    assert_eq!(Variant::Classic.to_string(), "3x3");
    assert_eq!(Variant::Gomoku.to_string(), "5x5");
    assert_eq!("5x5".parse::<Variant>(), Ok(Variant::Gomoku));
    assert_eq!("Classic".parse::<Variant>(), Ok(Variant::Classic));
    assert_eq!(
        "4x4".parse::<Variant>(),
        Err(BoardError::UnknownVariant { name: "4x4".into() })
    );
}

#[test]
fn test_new_board_is_empty() {
    for variant in Variant::ALL {
        let board = Board::new(variant);
        assert!(board.is_board_empty());
        assert!(!board.is_full());
        assert_eq!(board.empty_count(), variant.cells());
        assert_eq!(board.empty_cells().len(), variant.cells());
    }
}

#[test]
fn test_place_and_clear() {
    let mut board = Board::new(Variant::Classic);
    let pos = Pos::new(1, 1);
    board.place(pos, Mark::X);
    assert_eq!(board.get(pos), Mark::X);
    assert!(!board.is_empty(pos));
    assert_eq!(board.stone_count(), 1);

    board.set(pos, Mark::O);
    assert_eq!(board.get(pos), Mark::O);
    assert_eq!(board.stones(Mark::X).count(), 0);

    board.clear(pos);
    assert!(board.is_board_empty());
}

#[test]
fn test_try_place_rejects_occupied() {
    let mut board = Board::new(Variant::Classic);
    board.try_place(Pos::new(0, 0), Mark::X).unwrap();
    assert_eq!(
        board.try_place(Pos::new(0, 0), Mark::O),
        Err(BoardError::Occupied { pos: Pos::new(0, 0) })
    );
}

#[test]
fn test_empty_cells_row_major() {
    let board = Board::from_rows(Variant::Classic, &["X.O", ".X.", "O.."]).unwrap();
    assert_eq!(
        board.empty_cells(),
        vec![
            Pos::new(0, 1),
            Pos::new(1, 0),
            Pos::new(1, 2),
            Pos::new(2, 1),
            Pos::new(2, 2),
        ]
    );
}

#[test]
fn test_is_full() {
    let board = Board::from_rows(Variant::Classic, &["XOX", "XOO", "OXX"]).unwrap();
    assert!(board.is_full());
    assert!(board.empty_cells().is_empty());
}

#[test]
fn test_trial_restores_on_drop() {
    let mut board = Board::from_rows(Variant::Classic, &["X..", "...", "..O"]).unwrap();
    let before = board.clone();
    {
        let trial = board.trial(Pos::new(1, 1), Mark::X);
        assert_eq!(trial.get(Pos::new(1, 1)), Mark::X);
        assert_eq!(trial.pos(), Pos::new(1, 1));
    }
    assert_eq!(board, before);
}

#[test]
fn test_trial_restores_on_early_break() {
    let mut board = Board::new(Variant::Gomoku);
    let before = board.clone();
    for pos in board.empty_cells() {
        let trial = board.trial(pos, Mark::O);
        if trial.stone_count() == 1 {
            break;
        }
    }
    assert_eq!(board, before);
}

#[test]
fn test_nested_trials() {
    let mut board = Board::new(Variant::Classic);
    {
        let mut outer = board.trial(Pos::new(0, 0), Mark::X);
        {
            let inner = outer.trial(Pos::new(0, 1), Mark::O);
            assert_eq!(inner.stone_count(), 2);
        }
        assert_eq!(outer.stone_count(), 1);
    }
    assert!(board.is_board_empty());
}

#[test]
fn test_key_is_exact() {
    let a = Board::from_rows(Variant::Classic, &["X..", "...", "..."]).unwrap();
    let b = Board::from_rows(Variant::Classic, &["O..", "...", "..."]).unwrap();
    let c = Board::from_rows(Variant::Classic, &[".X.", "...", "..."]).unwrap();
    assert_ne!(a.key(), b.key());
    assert_ne!(a.key(), c.key());
    assert_eq!(Board::new(Variant::Classic).key(), 0);
}

#[test]
fn test_from_rows_errors() {
    assert_eq!(
        Board::from_rows(Variant::Classic, &["XXX", "..."]),
        Err(BoardError::RowCount { expected: 3, found: 2 })
    );
    assert_eq!(
        Board::from_rows(Variant::Classic, &["XX", "...", "..."]),
        Err(BoardError::RowLength { row: 0, expected: 3, found: 2 })
    );
    assert_eq!(
        Board::from_rows(Variant::Classic, &["...", ".Z.", "..."]),
        Err(BoardError::InvalidCell { row: 1, ch: 'Z' })
    );
}

#[test]
fn test_from_rows_accepts_empty_markers() {
    let board = Board::from_rows(Variant::Classic, &["x o", "_-.", "..."]).unwrap();
    assert_eq!(board.get(Pos::new(0, 0)), Mark::X);
    assert_eq!(board.get(Pos::new(0, 2)), Mark::O);
    assert_eq!(board.stone_count(), 2);
}

#[test]
fn test_pos_range_check() {
    let board = Board::new(Variant::Classic);
    assert_eq!(board.pos(2, 0), Ok(Pos::new(2, 0)));
    assert_eq!(
        board.pos(3, 0),
        Err(BoardError::OutOfRange { row: 3, col: 0, size: 3 })
    );
    assert!(board.pos(0, -1).is_err());
}

#[test]
fn test_side_to_move() {
    let board = Board::new(Variant::Classic);
    assert_eq!(board.side_to_move(), Ok(Mark::X));
    let board = Board::from_rows(Variant::Classic, &["X..", "...", "..."]).unwrap();
    assert_eq!(board.side_to_move(), Ok(Mark::O));
    let board = Board::from_rows(Variant::Classic, &["XX.", "...", "..."]).unwrap();
    assert_eq!(board.side_to_move(), Err(BoardError::MarkCounts { x: 2, o: 0 }));
}

#[test]
fn test_display_round_trips() {
    let board = Board::from_rows(Variant::Classic, &["X.O", "...", ".X."]).unwrap();
    assert_eq!(board.to_string(), "X | . | O\n. | . | .\n. | X | .\n");
    assert_eq!(Board::from_rows(Variant::Classic, &board.to_rows()).unwrap(), board);
}
