//! Tic-tac-toe rules engine.
//!
//! This library holds the only part of a tic-tac-toe game with real logic:
//! board state, move validation, turn alternation, win/tie detection and a
//! synchronous publish/subscribe event bus that keeps presentation decoupled
//! from state changes.
//!
//! # Architecture
//!
//! - **EventBus**: named-event registry, handlers run in subscription order
//! - **Board**: the nine cells, publishes `boardUpdated` on every placement
//! - **MoveValidator**: empty-cell and marker-alternation rules
//! - **Rules**: pure win/tie evaluation over a board snapshot
//! - **PlayerRegistry**: two players, their scores and whose turn it is
//! - **GameController**: the turn loop, the only type a front end needs
//! - **SessionManager**: one lock per controller for concurrent callers
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{EventName, GameController, GameEvent, Marker, RoundOutcome};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = GameController::with_players(("Ada", Marker::X), ("Grace", Marker::O))?;
//! game.subscribe(EventName::GameOver, |event: &mut GameEvent| {
//!     if let GameEvent::GameOver(outcome) = event {
//!         println!("round finished: {outcome}");
//!     }
//! });
//!
//! for cell in [0, 4, 1, 5, 2] {
//!     game.submit_move(cell)?;
//! }
//! assert_eq!(game.last_outcome(), RoundOutcome::Win(Marker::X));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod controller;
mod error;
mod event;
mod players;
mod position;
mod rules;
mod session;
mod types;
mod validator;

pub use board::{Board, render};
pub use controller::{GameController, MoveOutcome, Phase};
pub use error::{GameError, RegistryError, Rejection, SessionError};
pub use event::{BoardUpdate, EventBus, EventName, GameEvent, SubscriptionId};
pub use players::{LastResult, Player, PlayerRegistry, PlayerSlot};
pub use position::Position;
pub use rules::{LINES, check_winner, evaluate, is_balanced, is_full};
pub use session::{SessionId, SessionManager};
pub use types::{CELL_COUNT, Cell, Marker, Move, RoundOutcome, Snapshot};
pub use validator::MoveValidator;
