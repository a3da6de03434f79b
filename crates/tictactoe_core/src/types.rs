//! Core domain types for tic-tac-toe.

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A player's symbol on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Marker {
    /// The X symbol.
    X,
    /// The O symbol.
    O,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a marker.
    Occupied(Marker),
}

impl Cell {
    /// Returns the marker in this cell, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(marker) => Some(marker),
        }
    }

    /// Checks whether the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Copy of the nine cells in row-major order.
///
/// Snapshots are plain arrays, so handing one out never exposes board storage.
pub type Snapshot = [Cell; CELL_COUNT];

/// Result of evaluating a board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// No line is complete and at least one cell is free.
    #[default]
    Ongoing,
    /// The marker completed a line.
    Win(Marker),
    /// Board is full with no completed line.
    Tie,
}

impl RoundOutcome {
    /// Returns true for `Win` and `Tie`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundOutcome::Ongoing)
    }

    /// Returns the winning marker, if any.
    pub fn winner(self) -> Option<Marker> {
        match self {
            RoundOutcome::Win(marker) => Some(marker),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Ongoing => write!(f, "In progress"),
            RoundOutcome::Win(marker) => write!(f, "{} wins", marker),
            RoundOutcome::Tie => write!(f, "Tie"),
        }
    }
}

/// A marker placed at a cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Cell index (0-8).
    pub index: usize,
    /// The marker being placed.
    pub marker: Marker,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Position::from_index(self.index) {
            Some(position) => write!(f, "{} -> {}", self.marker, position.label()),
            None => write!(f, "{} -> cell {}", self.marker, self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Marker::X.opponent(), Marker::O);
        assert_eq!(Marker::O.opponent(), Marker::X);
    }

    #[test]
    fn test_outcome_terminal() {
        assert!(!RoundOutcome::Ongoing.is_terminal());
        assert!(RoundOutcome::Tie.is_terminal());
        assert!(RoundOutcome::Win(Marker::O).is_terminal());
        assert_eq!(RoundOutcome::Win(Marker::O).winner(), Some(Marker::O));
        assert_eq!(RoundOutcome::Tie.winner(), None);
    }

    #[test]
    fn test_move_display_uses_label() {
        assert_eq!(Move::new(4, Marker::X).to_string(), "X -> Center");
        assert_eq!(Move::new(12, Marker::O).to_string(), "O -> cell 12");
    }

    #[test]
    fn test_marker_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Marker::X).unwrap(), "\"X\"");
        let cell: Cell = serde_json::from_str("{\"Occupied\":\"O\"}").unwrap();
        assert_eq!(cell, Cell::Occupied(Marker::O));
    }
}
