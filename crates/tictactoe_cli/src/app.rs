//! Play and replay loops.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tictactoe_core::{GameController, MoveOutcome, Phase};
use tracing::{debug, info, instrument};

use crate::input::{HELP, PlayCommand};
use crate::presenter::{SharedWriter, lock};

/// One line per player: name, marker and score.
pub fn scoreboard(game: &GameController) -> String {
    game.registry()
        .players()
        .iter()
        .map(|p| format!("{} ({}): {}", p.name(), p.marker(), p.score()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn prompt(game: &GameController) -> String {
    match (game.phase(), game.current_player()) {
        (Phase::RoundOver, _) => "Round over, type 'reset' or 'quit'> ".to_string(),
        (Phase::AwaitingMove, Some(player)) => {
            format!("{} ({}) to move> ", player.name(), player.marker())
        }
        (Phase::AwaitingMove, None) => "> ".to_string(),
    }
}

/// Runs the interactive loop until `quit` or end of input.
///
/// The board is drawn by the presenter subscribed to `game`; this loop only
/// prints prompts, rejections and scores.
///
/// # Errors
///
/// Fails when reading input or writing output fails.
#[instrument(skip_all)]
pub fn run_play(game: &mut GameController, input: impl BufRead, out: &SharedWriter) -> Result<()> {
    writeln!(lock(out), "{}\n\n{}\n", HELP, game.board().display())?;

    let mut lines = input.lines();
    loop {
        write!(lock(out), "{}", prompt(game))?;
        lock(out).flush()?;

        let Some(line) = lines.next() else {
            debug!("End of input");
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(error) => {
                writeln!(lock(out), "{}", error)?;
                continue;
            }
        };

        match command {
            PlayCommand::Place(position) => match game.submit_move(position.to_index())? {
                MoveOutcome::Accepted(outcome) if outcome.is_terminal() => {
                    writeln!(lock(out), "{}", scoreboard(game))?;
                }
                MoveOutcome::Accepted(_) => {}
                MoveOutcome::Rejected(rejection) => writeln!(lock(out), "{}", rejection)?,
            },
            PlayCommand::Reset => game.reset_round(),
            PlayCommand::Rename(slot, name) => {
                if let Err(error) = game.rename_player(slot, &name) {
                    writeln!(lock(out), "{}", error)?;
                }
            }
            PlayCommand::Score => writeln!(lock(out), "{}", scoreboard(game))?,
            PlayCommand::Help => writeln!(lock(out), "{}", HELP)?,
            PlayCommand::Quit => break,
        }
    }

    info!(rounds = game.round(), "Leaving game");
    writeln!(lock(out), "\nFinal scores\n{}", scoreboard(game))?;
    Ok(())
}

/// Feeds board indices (0-8) to the controller in order.
///
/// Refused moves are reported and skipped.
///
/// # Errors
///
/// Fails on an index outside 0-8 or when writing output fails.
#[instrument(skip(game, out))]
pub fn run_replay(game: &mut GameController, cells: &[usize], out: &SharedWriter) -> Result<()> {
    for (step, &cell) in cells.iter().enumerate() {
        let outcome = game
            .submit_move(cell)
            .with_context(|| format!("Move {} of the replay is invalid", step + 1))?;
        if let MoveOutcome::Rejected(rejection) = outcome {
            writeln!(lock(out), "Skipped cell {}: {}", cell, rejection)?;
        }
    }

    debug!(moves = game.history().len(), "Replay finished");
    writeln!(lock(out), "Result: {}\n{}", game.last_outcome(), scoreboard(game))?;
    Ok(())
}
