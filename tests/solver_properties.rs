//! Properties of the solver checked through the public API.

use std::collections::HashSet;

use tictactoe::board::{Board, Mark, Pos, Variant};
use tictactoe::rules::{has_won, is_terminal, win_lines, winner};
use tictactoe::search::{Scoring, Searcher, INF};
use tictactoe::{select_move, EngineConfig, Solver};

fn plain(variant: Variant) -> EngineConfig {
    EngineConfig::for_variant(variant)
        .with_pruning(false)
        .with_memoize(false)
}

/// Every position reachable by alternating play from the empty board,
/// stopping at finished games.
fn reachable_positions(variant: Variant) -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![Board::new(variant)];
    let mut positions = Vec::new();

    while let Some(board) = stack.pop() {
        if !seen.insert(board.key()) {
            continue;
        }
        positions.push(board.clone());
        if is_terminal(&board) {
            continue;
        }
        let Ok(side) = board.side_to_move() else {
            continue;
        };
        for pos in board.empty_cells() {
            let mut next = board.clone();
            next.place(pos, side);
            stack.push(next);
        }
    }
    positions
}

#[test]
fn every_full_line_wins_for_either_side() {
    for variant in Variant::ALL {
        for line in win_lines(variant) {
            for side in [Mark::X, Mark::O] {
                let mut board = Board::new(variant);
                for &pos in &line.cells {
                    board.place(pos, side);
                }
                assert!(has_won(&board, side), "{variant} line {:?}", line.cells);
                assert!(!has_won(&board, side.opponent()));
                assert_eq!(winner(&board), Some(side));
            }
        }
    }
}

#[test]
fn one_short_of_a_line_never_wins() {
    for variant in Variant::ALL {
        for line in win_lines(variant) {
            for skip in 0..line.cells.len() {
                let mut board = Board::new(variant);
                for (i, &pos) in line.cells.iter().enumerate() {
                    if i != skip {
                        board.place(pos, Mark::O);
                    }
                }
                assert_eq!(winner(&board), None, "{variant} line {:?} without {skip}", line.cells);
            }
        }
    }
}

#[test]
fn terminal_positions_score_without_recursion() {
    let cases: [(&[&str], i32); 3] = [
        (&["XXX", "OO.", "..."], 1),
        (&["OOO", "XX.", "X.."], -1),
        (&["XOX", "XOO", "OXX"], 0),
    ];
    for (rows, expected) in cases {
        let mut board = Board::from_rows(Variant::Classic, rows).unwrap();
        let config = EngineConfig::classic().with_scoring(Scoring::Flat);
        let mut searcher = Searcher::new(Mark::X, &config);

        assert_eq!(searcher.search(&mut board, 4, true, -INF, INF, None), expected);
        assert_eq!(searcher.nodes(), 1);
    }
}

#[test]
fn empty_classic_board_is_a_draw() {
    let mut board = Board::new(Variant::Classic);
    let config = plain(Variant::Classic).with_scoring(Scoring::Flat);
    let mut searcher = Searcher::new(Mark::X, &config);
    assert_eq!(searcher.search(&mut board, 0, true, -INF, INF, None), 0);
}

#[test]
fn pruning_agrees_with_plain_minimax_everywhere_late() {
    // All reachable 3x3 positions with at most five empty cells
    let optimised = EngineConfig::classic();
    let pruned_only = EngineConfig::classic().with_memoize(false);
    let reference = plain(Variant::Classic);

    let mut checked = 0;
    for board in reachable_positions(Variant::Classic) {
        if board.empty_count() > 5 || is_terminal(&board) {
            continue;
        }
        let side = board.side_to_move().unwrap();

        let expected = Solver::new(reference.clone()).best_move_with_stats(&board, side);
        for config in [&optimised, &pruned_only] {
            let result = Solver::new(config.clone()).best_move_with_stats(&board, side);
            assert_eq!(result.best_move, expected.best_move, "\n{board}");
            assert_eq!(result.score, expected.score, "\n{board}");
            assert!(result.nodes <= expected.nodes, "\n{board}");
        }
        checked += 1;
    }
    assert!(checked > 1000);
}

#[test]
fn pruning_visits_fewer_nodes() {
    let positions: [&[&str]; 3] = [
        &["...", "...", "..."],
        &["X..", ".O.", "..."],
        &["...", ".X.", "..."],
    ];
    for rows in positions {
        let board = Board::from_rows(Variant::Classic, rows).unwrap();
        let side = board.side_to_move().unwrap();

        let reference = Solver::new(plain(Variant::Classic)).best_move_with_stats(&board, side);
        let pruned = Solver::for_variant(Variant::Classic).best_move_with_stats(&board, side);

        assert_eq!(pruned.best_move, reference.best_move);
        assert_eq!(pruned.score, reference.score);
        assert!(pruned.nodes < reference.nodes, "{rows:?}");
    }
}

#[test]
fn pruning_agrees_on_gomoku_endgame() {
    let board = Board::from_rows(
        Variant::Gomoku,
        &["XOXOX", "XOXOX", "OXOXO", "X.O..", "....."],
    )
    .unwrap();
    let side = board.side_to_move().unwrap();
    assert_eq!(side, Mark::O);

    let reference = Solver::new(plain(Variant::Gomoku)).best_move_with_stats(&board, side);
    let pruned = Solver::for_variant(Variant::Gomoku).best_move_with_stats(&board, side);

    assert_eq!(reference.max_depth, None);
    assert_eq!(pruned.best_move, reference.best_move);
    assert_eq!(pruned.score, reference.score);
    assert!(pruned.nodes < reference.nodes);
}

#[test]
fn select_move_leaves_board_unchanged() {
    let cases: [(Variant, &[&str]); 3] = [
        (Variant::Classic, &["X..", ".O.", "..."]),
        (Variant::Classic, &["XO.", ".X.", "..O"]),
        (Variant::Gomoku, &["X....", ".O...", "..X..", ".....", "....."]),
    ];
    for (variant, rows) in cases {
        let mut board = Board::from_rows(variant, rows).unwrap();
        let before = board.clone();
        let side = board.side_to_move().unwrap();

        let result = select_move(&mut board, side, &EngineConfig::for_variant(variant));
        assert!(result.best_move.is_some());
        assert_eq!(board, before);
    }
}

#[test]
fn chosen_cell_is_always_empty() {
    for board in reachable_positions(Variant::Classic) {
        let Ok(side) = board.side_to_move() else {
            continue;
        };
        match Solver::default().best_move(&board, side) {
            Some(pos) => assert!(board.is_empty(pos), "\n{board}"),
            None => assert!(is_terminal(&board), "\n{board}"),
        }
    }
}

#[test]
fn no_move_on_finished_boards() {
    let full = Board::from_rows(Variant::Classic, &["XOX", "XOO", "OXX"]).unwrap();
    let won = Board::from_rows(Variant::Classic, &["OOO", "XX.", "X.."]).unwrap();
    let solver = Solver::default();

    for board in [full, won] {
        assert_eq!(solver.best_move(&board, Mark::X), None);
        assert_eq!(solver.best_move(&board, Mark::O), None);
    }
}

#[test]
fn takes_win_and_blocks_open_two() {
    let solver = Solver::default();

    let win = Board::from_rows(Variant::Classic, &["XX.", "OO.", "..."]).unwrap();
    assert_eq!(solver.best_move(&win, Mark::X), Some(Pos::new(0, 2)));

    let block = Board::from_rows(Variant::Classic, &["X..", "X..", ".O."]).unwrap();
    assert_eq!(solver.best_move(&block, Mark::O), Some(Pos::new(2, 0)));
}

#[test]
fn perfect_play_draws() {
    let solver = Solver::default();
    let mut board = Board::new(Variant::Classic);
    let mut side = Mark::X;

    while let Some(pos) = solver.best_move(&board, side) {
        board.place(pos, side);
        side = side.opponent();
    }

    assert!(board.is_full());
    assert_eq!(winner(&board), None);
}
