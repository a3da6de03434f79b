//! Named board cells.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::types::Snapshot;

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Parses a board index (0-8) or a label.
    ///
    /// Labels match case-insensitively and ignore spaces, so `"top left"`,
    /// `"Top-left"` and `"topleft"` all name the same cell. A partial label
    /// is accepted when it names exactly one cell.
    #[instrument]
    pub fn from_label_or_number(input: &str) -> Option<Position> {
        let input = input.trim();
        if let Ok(index) = input.parse::<usize>() {
            return Self::from_index(index);
        }

        let wanted = normalize(input);
        if wanted.is_empty() {
            return None;
        }
        if let Some(exact) = Self::iter().find(|pos| normalize(pos.label()) == wanted) {
            return Some(exact);
        }

        let mut partial = Self::iter().filter(|pos| normalize(pos.label()).contains(&wanted));
        match (partial.next(), partial.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Positions whose cells are empty in the snapshot.
    pub fn available(snapshot: &Snapshot) -> Vec<Position> {
        Self::iter()
            .filter(|pos| snapshot[pos.to_index()].is_empty())
            .collect()
    }
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Marker};

    #[test]
    fn test_index_round_trip() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_index(index), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_number_and_label() {
        assert_eq!(Position::from_label_or_number("4"), Some(Position::Center));
        assert_eq!(Position::from_label_or_number(" 8 "), Some(Position::BottomRight));
        assert_eq!(Position::from_label_or_number("9"), None);
        assert_eq!(Position::from_label_or_number("top left"), Some(Position::TopLeft));
        assert_eq!(Position::from_label_or_number("CENTER"), Some(Position::Center));
        assert_eq!(Position::from_label_or_number("bottom-center"), Some(Position::BottomCenter));
    }

    #[test]
    fn test_parse_rejects_ambiguous_partial() {
        // "top" matches three cells
        assert_eq!(Position::from_label_or_number("top"), None);
        assert_eq!(Position::from_label_or_number(""), None);
        assert_eq!(Position::from_label_or_number("middleri"), Some(Position::MiddleRight));
    }

    #[test]
    fn test_available_filters_occupied() {
        let mut snapshot = [Cell::Empty; 9];
        snapshot[0] = Cell::Occupied(Marker::X);
        snapshot[4] = Cell::Occupied(Marker::O);

        let open = Position::available(&snapshot);
        assert_eq!(open.len(), 7);
        assert!(!open.contains(&Position::TopLeft));
        assert!(!open.contains(&Position::Center));
        assert!(open.contains(&Position::BottomRight));
    }
}
