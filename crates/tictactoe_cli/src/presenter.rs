//! Terminal presenter.
//!
//! Subscribes to the engine's events and redraws the board on a shared
//! writer. The presenter never reads engine state directly; everything it
//! prints comes from event payloads.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tictactoe_core::{
    Cell, EventName, GameController, GameEvent, Position, RoundOutcome, SubscriptionId, render,
};
use tracing::{instrument, warn};

/// Writer shared by the presenter and the input loop.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Locks the writer, recovering from a poisoned lock.
pub fn lock(out: &SharedWriter) -> MutexGuard<'_, dyn Write + Send + 'static> {
    out.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Subscribes board, game-over and reset handlers that print to `out`.
#[instrument(skip_all)]
pub fn attach(game: &mut GameController, out: &SharedWriter) -> Vec<SubscriptionId> {
    let mut ids = Vec::new();
    for name in [EventName::BoardUpdated, EventName::GameOver, EventName::RoundReset] {
        let out = Arc::clone(out);
        ids.push(game.subscribe(name, move |event: &mut GameEvent| {
            let text = describe(event);
            if let Err(error) = lock(&out).write_all(text.as_bytes()) {
                warn!(%error, "Failed to draw event");
            }
        }));
    }
    ids
}

/// Text shown for an event.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::BoardUpdated(update) => {
            let place = Position::from_index(update.index)
                .map_or_else(|| format!("cell {}", update.index), |p| p.label().to_string());
            format!("{} -> {}\n{}\n\n", update.marker, place, render(&update.board))
        }
        GameEvent::GameOver(RoundOutcome::Win(marker)) => format!("{} wins the round!\n", marker),
        GameEvent::GameOver(_) => "It's a tie!\n".to_string(),
        GameEvent::RoundReset { round } => {
            format!("Round {}\n{}\n\n", round, render(&[Cell::Empty; 9]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::Marker;

    #[test]
    fn test_attach_prints_moves_and_result() {
        let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
        let out: SharedWriter = buffer.clone();
        let mut game =
            GameController::with_players(("Ada", Marker::X), ("Grace", Marker::O)).unwrap();
        assert_eq!(attach(&mut game, &out).len(), 3);

        for cell in [0, 4, 1, 5, 2] {
            game.submit_move(cell).unwrap();
        }
        let text = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(text.starts_with("X -> Top-left\nX|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9\n\n"));
        assert!(text.ends_with("X wins the round!\n"));
    }

    #[test]
    fn test_describe_tie_and_reset() {
        assert_eq!(describe(&GameEvent::GameOver(RoundOutcome::Tie)), "It's a tie!\n");
        assert!(describe(&GameEvent::RoundReset { round: 3 }).starts_with("Round 3\n1|2|3"));
    }
}
