//! Win detection for tic-tac-toe.

use tracing::instrument;

use super::draw::is_full;
use crate::types::{Cell, Marker, RoundOutcome, Snapshot};

/// The eight winning triples: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the marker holding a complete line, if any.
///
/// Lines are checked in [`LINES`] order and the first match is returned.
#[instrument(skip(board))]
pub fn check_winner(board: &Snapshot) -> Option<Marker> {
    LINES.iter().find_map(|&[a, b, c]| match board[a] {
        Cell::Occupied(marker) if board[b] == board[a] && board[c] == board[a] => Some(marker),
        _ => None,
    })
}

/// Evaluates a snapshot: `Win` if a line is complete, `Tie` if the board is
/// full otherwise, `Ongoing` in every other case.
#[instrument(skip(board))]
pub fn evaluate(board: &Snapshot) -> RoundOutcome {
    if let Some(marker) = check_winner(board) {
        RoundOutcome::Win(marker)
    } else if is_full(board) {
        RoundOutcome::Tie
    } else {
        RoundOutcome::Ongoing
    }
}
