//! Turn-taking game loop.
//!
//! `GameController` owns one board, one player registry, one validator and
//! the event bus they share. Presentation code talks only to the controller:
//! it submits moves, reads state, and subscribes to `boardUpdated`,
//! `gameOver` and `roundReset` to refresh its view.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::error::{GameError, RegistryError, Rejection};
use crate::event::{EventBus, EventName, GameEvent, SubscriptionId};
use crate::players::{Player, PlayerRegistry, PlayerSlot};
use crate::rules;
use crate::types::{CELL_COUNT, Marker, Move, RoundOutcome, Snapshot};
use crate::validator::MoveValidator;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the current player to move.
    #[default]
    AwaitingMove,
    /// Round finished; moves are refused until a reset.
    RoundOver,
}

/// What happened to a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Marker placed; carries the board evaluation after the move.
    Accepted(RoundOutcome),
    /// Nothing changed and no event fired.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// True if the move was placed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }
}

/// Orchestrates board, validator, rules and players into rounds.
#[derive(Debug)]
pub struct GameController {
    bus: EventBus<GameEvent>,
    board: Board,
    validator: MoveValidator,
    registry: PlayerRegistry,
    phase: Phase,
    last_outcome: RoundOutcome,
    history: Vec<Move>,
    round: u32,
}

impl GameController {
    /// Creates a session with an empty board and no players.
    #[instrument]
    pub fn new() -> Self {
        let mut bus = EventBus::new();
        let validator = MoveValidator::new(&mut bus);
        info!("Creating game session");
        Self {
            bus,
            board: Board::new(),
            validator,
            registry: PlayerRegistry::new(),
            phase: Phase::AwaitingMove,
            last_outcome: RoundOutcome::Ongoing,
            history: Vec::new(),
            round: 1,
        }
    }

    /// Creates a session with both players registered.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MarkerTaken`] if both players use one marker.
    #[instrument]
    pub fn with_players(
        first: (&str, Marker),
        second: (&str, Marker),
    ) -> Result<Self, RegistryError> {
        let mut game = Self::new();
        game.create_player(first.0, first.1)?;
        game.create_player(second.0, second.1)?;
        Ok(game)
    }

    /// Registers a handler for one of the engine's events.
    ///
    /// Handlers run synchronously inside the call that caused the event, after
    /// the engine's own bookkeeping handlers.
    pub fn subscribe<F>(&mut self, event: EventName, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut GameEvent) + Send + 'static,
    {
        self.bus.subscribe(event.as_str(), handler)
    }

    /// Removes a handler added with [`GameController::subscribe`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Adds a player; see [`PlayerRegistry::create_player`].
    ///
    /// # Errors
    ///
    /// Returns the registry's refusal; nothing changes in that case.
    pub fn create_player(
        &mut self,
        name: impl AsRef<str>,
        marker: Marker,
    ) -> Result<PlayerSlot, RegistryError> {
        self.registry.create_player(name, marker)
    }

    /// Renames a player; see [`PlayerRegistry::rename_player`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Vacant`] if no player occupies the slot.
    pub fn rename_player(&mut self, which: PlayerSlot, name: &str) -> Result<(), RegistryError> {
        self.registry.rename_player(which, name)
    }

    /// Attempts a move for the current player.
    ///
    /// An accepted move writes the board (publishing `boardUpdated`), passes
    /// the turn, and evaluates the board. A win or tie is recorded on the
    /// players, `gameOver` is published, and the round ends.
    ///
    /// Illegal moves come back as [`MoveOutcome::Rejected`] with no state
    /// change and no event.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] for an index outside 0-8.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn submit_move(&mut self, index: usize) -> Result<MoveOutcome, GameError> {
        if index >= CELL_COUNT {
            warn!("Move index out of range");
            return Err(GameError::IndexOutOfRange { index });
        }
        if self.phase == Phase::RoundOver {
            debug!("Move refused, round is over");
            return Ok(MoveOutcome::Rejected(Rejection::RoundOver));
        }
        let marker = match self.registry.current_player() {
            Some(player) if self.registry.is_ready() => *player.marker(),
            _ => {
                debug!("Move refused, players missing");
                return Ok(MoveOutcome::Rejected(Rejection::PlayersMissing));
            }
        };

        if let Err(rejection) = self.validator.check(index, marker, &self.board.snapshot()) {
            debug!(%rejection, "Move rejected");
            return Ok(MoveOutcome::Rejected(rejection));
        }

        self.board.place(index, marker, &mut self.bus)?;
        self.history.push(Move::new(index, marker));
        self.registry.switch_turn();

        let snapshot = self.board.snapshot();
        debug_assert!(rules::is_balanced(&snapshot), "Marker balance violated");
        let outcome = rules::evaluate(&snapshot);
        self.last_outcome = outcome;
        info!(index, %marker, %outcome, "Move accepted");

        if outcome.is_terminal() {
            self.registry.record_round_result(outcome);
            self.phase = Phase::RoundOver;
            self.bus.emit(GameEvent::GameOver(outcome));
        }
        Ok(MoveOutcome::Accepted(outcome))
    }

    /// Clears the board for the next round.
    ///
    /// Scores survive. The player who did not win the previous round moves
    /// first (the first-created player after a tie). Publishes `roundReset`.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn reset_round(&mut self) {
        self.board.clear();
        self.history.clear();
        self.phase = Phase::AwaitingMove;
        self.last_outcome = RoundOutcome::Ongoing;
        self.round += 1;
        self.registry.begin_round();
        info!(next_round = self.round, "Round reset");
        self.bus.emit(GameEvent::RoundReset { round: self.round });
    }

    /// Copy of the board cells.
    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.registry.current_player()
    }

    /// Evaluation after the most recent accepted move of this round.
    pub fn last_outcome(&self) -> RoundOutcome {
        self.last_outcome
    }

    /// Current controller state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Players, scores and turn order.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Accepted moves of the current round, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
