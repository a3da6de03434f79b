//! Full-board detection for tic-tac-toe.

use tracing::instrument;

use crate::types::Snapshot;

/// Checks if every cell is occupied.
///
/// A full board with no winner is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Snapshot) -> bool {
    board.iter().all(|cell| !cell.is_empty())
}
