//! Board storage.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GameError;
use crate::event::{BoardUpdate, EventBus, GameEvent};
use crate::types::{CELL_COUNT, Cell, Marker, Snapshot};

/// 3x3 tic-tac-toe board.
///
/// The board is a storage primitive: [`Board::place`] performs no legality
/// check beyond the index bound. Callers validate moves first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: Snapshot,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Returns a copy of all cells.
    pub fn snapshot(&self) -> Snapshot {
        self.cells
    }

    /// Gets the cell at the given index.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a cell is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(&self.cells)
    }

    /// Indices of empty cells, ascending.
    pub fn available(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.is_empty(i)).collect()
    }

    /// Writes a marker and publishes `boardUpdated`.
    ///
    /// Overwrites whatever the cell held.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] if `index` is not 0-8. Nothing is
    /// written or published in that case.
    #[instrument(skip(self, bus))]
    pub fn place(
        &mut self,
        index: usize,
        marker: Marker,
        bus: &mut EventBus<GameEvent>,
    ) -> Result<(), GameError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GameError::IndexOutOfRange { index })?;
        *cell = Cell::Occupied(marker);
        debug!("Marker written");

        bus.emit(GameEvent::BoardUpdated(BoardUpdate {
            index,
            marker,
            board: self.cells,
        }));
        Ok(())
    }

    /// Empties every cell. Publishes nothing.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        render(&self.cells)
    }
}

/// Formats a snapshot as a 3x3 grid. Empty cells show their 1-based number.
///
/// ```text
/// X|2|3
/// -+-+-
/// 4|O|6
/// -+-+-
/// 7|8|9
/// ```
pub fn render(cells: &Snapshot) -> String {
    let mut result = String::new();
    for row in 0..3 {
        for col in 0..3 {
            let index = row * 3 + col;
            match cells[index] {
                Cell::Empty => result.push_str(&(index + 1).to_string()),
                Cell::Occupied(marker) => result.push_str(&marker.to_string()),
            }
            if col < 2 {
                result.push('|');
            }
        }
        if row < 2 {
            result.push_str("\n-+-+-\n");
        }
    }
    result
}
