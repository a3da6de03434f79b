//! Error and rejection types for the rules engine.

use crate::players::PlayerSlot;
use crate::types::Marker;

/// Programmer errors surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Cell index outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", index)]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
    },
}

impl std::error::Error for GameError {}

/// Why a move was refused.
///
/// Rejections are expected during play (clicking a taken cell) and are
/// reported as values, never as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// The cell already holds a marker.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The marker was also used for the previous accepted move.
    #[display("{} moved last, markers must alternate", _0)]
    RepeatedMarker(Marker),

    /// Index does not name a cell.
    #[display("Cell {} is off the board", _0)]
    OffBoard(usize),

    /// The round has ended and awaits a reset.
    #[display("Round is over")]
    RoundOver,

    /// Fewer than two players are registered.
    #[display("Two players are required before the first move")]
    PlayersMissing,
}

impl std::error::Error for Rejection {}

/// Player registry misuse. Never changes registry state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RegistryError {
    /// Two players already exist.
    #[display("Registry already has 2 players")]
    Full,

    /// Another player already uses the marker.
    #[display("Marker {} is already taken", _0)]
    MarkerTaken(Marker),

    /// No player occupies the slot.
    #[display("No player registered in slot {}", _0)]
    Vacant(PlayerSlot),
}

impl std::error::Error for RegistryError {}

/// Session lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// A session with this id already exists.
    #[display("Session {} already exists", _0)]
    AlreadyExists(String),

    /// No session with this id.
    #[display("Session {} not found", _0)]
    NotFound(String),
}

impl std::error::Error for SessionError {}
