//! Move legality.
//!
//! Two independent rules decide whether a move is legal:
//!
//! 1. the target cell is empty;
//! 2. the marker differs from the marker of the previous accepted move.
//!
//! The second rule is checked against move history, not against whose turn
//! the registry thinks it is, so a desynchronized turn state cannot slip a
//! double move through. The previous marker is learned from `boardUpdated`
//! and forgotten on `roundReset`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};

use crate::error::Rejection;
use crate::event::{EventBus, EventName, GameEvent};
use crate::types::{Cell, Marker, Snapshot};

/// Validates candidate moves.
#[derive(Debug)]
pub struct MoveValidator {
    previous: Arc<Mutex<Option<Marker>>>,
}

impl MoveValidator {
    /// Creates a validator that tracks accepted moves on the given bus.
    #[instrument(skip(bus))]
    pub fn new(bus: &mut EventBus<GameEvent>) -> Self {
        let previous = Arc::new(Mutex::new(None));

        let on_update = Arc::clone(&previous);
        bus.subscribe(EventName::BoardUpdated.as_str(), move |event| {
            if let GameEvent::BoardUpdated(update) = event {
                *lock(&on_update) = Some(update.marker);
            }
        });

        let on_reset = Arc::clone(&previous);
        bus.subscribe(EventName::RoundReset.as_str(), move |_| {
            *lock(&on_reset) = None;
        });

        Self { previous }
    }

    /// Marker of the last accepted move this round.
    pub fn previous_marker(&self) -> Option<Marker> {
        *lock(&self.previous)
    }

    /// Checks both legality rules.
    ///
    /// The first move of a round accepts either marker.
    #[instrument(skip(self, board))]
    pub fn check(&self, index: usize, marker: Marker, board: &Snapshot) -> Result<(), Rejection> {
        match board.get(index) {
            None => return Err(Rejection::OffBoard(index)),
            Some(Cell::Occupied(_)) => {
                debug!("Cell occupied");
                return Err(Rejection::CellOccupied(index));
            }
            Some(Cell::Empty) => {}
        }

        if self.previous_marker() == Some(marker) {
            debug!("Marker repeated");
            return Err(Rejection::RepeatedMarker(marker));
        }
        Ok(())
    }

    /// Returns true if [`MoveValidator::check`] passes.
    pub fn is_valid(&self, index: usize, marker: Marker, board: &Snapshot) -> bool {
        self.check(index, marker, board).is_ok()
    }
}

fn lock(previous: &Mutex<Option<Marker>>) -> MutexGuard<'_, Option<Marker>> {
    previous.lock().unwrap_or_else(PoisonError::into_inner)
}
