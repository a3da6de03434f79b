//! Property tests for win detection and move validation.

use proptest::prelude::*;
use tictactoe_core::{
    Board, Cell, EventBus, GameController, LINES, Marker, MoveOutcome, MoveValidator,
    RoundOutcome, Snapshot, evaluate, is_balanced,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        Just(Cell::Occupied(Marker::X)),
        Just(Cell::Occupied(Marker::O)),
    ]
}

fn arb_board() -> impl Strategy<Value = Snapshot> {
    proptest::array::uniform9(arb_cell())
}

fn arb_marker() -> impl Strategy<Value = Marker> {
    prop_oneof![Just(Marker::X), Just(Marker::O)]
}

fn complete_lines(board: &Snapshot) -> Vec<(usize, Marker)> {
    LINES
        .iter()
        .enumerate()
        .filter_map(|(i, &[a, b, c])| match board[a] {
            Cell::Occupied(m) if board[b] == board[a] && board[c] == board[a] => Some((i, m)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Win detection
// =============================================================================

fn arb_single_line_board() -> impl Strategy<Value = (Snapshot, Marker)> {
    (0usize..LINES.len(), arb_marker(), arb_board())
        .prop_map(|(line, marker, mut board)| {
            for index in LINES[line] {
                board[index] = Cell::Occupied(marker);
            }
            (board, marker)
        })
        .prop_filter("exactly one complete line", |(board, _)| {
            complete_lines(board).len() == 1
        })
}

fn arb_full_board_without_line() -> impl Strategy<Value = Snapshot> {
    proptest::array::uniform9(arb_marker())
        .prop_map(|markers| markers.map(Cell::Occupied))
        .prop_filter("no complete line", |board| complete_lines(board).is_empty())
}

fn arb_open_board_without_line() -> impl Strategy<Value = Snapshot> {
    arb_board().prop_filter("open board without line", |board| {
        complete_lines(board).is_empty() && board.iter().any(|c| c.is_empty())
    })
}

proptest! {
    #[test]
    fn single_complete_line_wins((board, marker) in arb_single_line_board()) {
        prop_assert_eq!(evaluate(&board), RoundOutcome::Win(marker));
    }

    #[test]
    fn full_board_without_line_ties(board in arb_full_board_without_line()) {
        prop_assert_eq!(evaluate(&board), RoundOutcome::Tie);
    }

    #[test]
    fn open_board_without_line_continues(board in arb_open_board_without_line()) {
        prop_assert_eq!(evaluate(&board), RoundOutcome::Ongoing);
    }
}

/// Every one of the 3^9 boards, checked against the three evaluation rules.
#[test]
fn test_every_board_evaluates_consistently() {
    let choices = [Cell::Empty, Cell::Occupied(Marker::X), Cell::Occupied(Marker::O)];
    for code in 0..3usize.pow(9) {
        let mut board = [Cell::Empty; 9];
        let mut rest = code;
        for cell in board.iter_mut() {
            *cell = choices[rest % 3];
            rest /= 3;
        }

        let lines = complete_lines(&board);
        let outcome = evaluate(&board);
        match lines.as_slice() {
            [(_, marker)] => assert_eq!(outcome, RoundOutcome::Win(*marker)),
            [] if board.iter().all(|c| !c.is_empty()) => assert_eq!(outcome, RoundOutcome::Tie),
            [] => assert_eq!(outcome, RoundOutcome::Ongoing),
            _ => assert!(matches!(outcome, RoundOutcome::Win(_))),
        }
    }
}

#[test]
fn test_each_line_alone_wins() {
    for line in LINES {
        for marker in [Marker::X, Marker::O] {
            let mut board = [Cell::Empty; 9];
            for index in line {
                board[index] = Cell::Occupied(marker);
            }
            assert_eq!(evaluate(&board), RoundOutcome::Win(marker), "line {:?}", line);
        }
    }
}

// =============================================================================
// Move validation
// =============================================================================

proptest! {
    #[test]
    fn occupied_cell_always_rejected(
        index in 0usize..9,
        occupant in arb_marker(),
        candidate in arb_marker(),
    ) {
        let mut bus = EventBus::new();
        let validator = MoveValidator::new(&mut bus);
        let mut board = Board::new();
        board.place(index, occupant, &mut bus).unwrap();

        prop_assert!(!validator.is_valid(index, candidate, &board.snapshot()));
    }

    #[test]
    fn same_marker_twice_rejected(
        first in 0usize..9,
        second in 0usize..9,
        marker in arb_marker(),
    ) {
        prop_assume!(first != second);
        let mut bus = EventBus::new();
        let validator = MoveValidator::new(&mut bus);
        let mut board = Board::new();
        board.place(first, marker, &mut bus).unwrap();

        prop_assert!(!validator.is_valid(second, marker, &board.snapshot()));
        prop_assert!(validator.is_valid(second, marker.opponent(), &board.snapshot()));
    }

    #[test]
    fn strict_alternation_accepted(order in Just((0usize..9).collect::<Vec<_>>()).prop_shuffle()) {
        let mut bus = EventBus::new();
        let validator = MoveValidator::new(&mut bus);
        let mut board = Board::new();
        let mut marker = Marker::X;

        for index in order {
            prop_assert!(validator.is_valid(index, marker, &board.snapshot()));
            board.place(index, marker, &mut bus).unwrap();
            marker = marker.opponent();
        }
    }

    /// Random clicks through the controller keep the board legal.
    #[test]
    fn controller_keeps_board_balanced(clicks in proptest::collection::vec(0usize..9, 0..30)) {
        let mut game = GameController::with_players(("Ada", Marker::X), ("Grace", Marker::O)).unwrap();
        let mut accepted = 0;

        for cell in clicks {
            if let MoveOutcome::Accepted(_) = game.submit_move(cell).unwrap() {
                accepted += 1;
            }
            prop_assert!(is_balanced(&game.snapshot()));
            prop_assert_eq!(evaluate(&game.snapshot()), game.last_outcome());
        }
        prop_assert_eq!(game.history().len(), accepted);
    }
}
