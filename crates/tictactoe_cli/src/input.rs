//! Parsing of interactive commands.

use std::str::FromStr;

use derive_more::{Display, Error};
use tictactoe_core::{PlayerSlot, Position};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Play a cell.
    Place(Position),
    /// Start the next round.
    Reset,
    /// Rename a player; a blank name restores the default.
    Rename(PlayerSlot, String),
    /// Show scores.
    Score,
    /// Show help.
    Help,
    /// Leave the game.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct InputError {
    /// What was wrong.
    pub message: String,
}

impl InputError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Help text for the prompt.
pub const HELP: &str = "\
Commands:
  1-9 or a label   play a cell (1 is top-left, \"center\", \"bottom right\", ...)
  reset            start the next round
  rename <1|2> [name]  rename a player (no name restores the default)
  score            show scores
  help             show this help
  quit             leave";

impl FromStr for PlayCommand {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "" => Err(InputError::new("Type a cell or 'help'")),
            "reset" | "r" => Ok(PlayCommand::Reset),
            "score" | "s" => Ok(PlayCommand::Score),
            "help" | "h" | "?" => Ok(PlayCommand::Help),
            "quit" | "q" | "exit" => Ok(PlayCommand::Quit),
            "rename" => {
                let rest = rest.trim();
                let (slot, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let slot = match slot {
                    "1" => PlayerSlot::First,
                    "2" => PlayerSlot::Second,
                    _ => return Err(InputError::new("Usage: rename <1|2> [name]")),
                };
                Ok(PlayCommand::Rename(slot, name.trim().to_string()))
            }
            _ => parse_cell(line).map(PlayCommand::Place),
        }
    }
}

/// Cells are numbered 1-9 at the prompt, matching the drawn board.
fn parse_cell(input: &str) -> Result<Position, InputError> {
    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(Position::from_index)
            .ok_or_else(|| InputError::new(format!("Cell {} is not on the board (1-9)", number)));
    }
    Position::from_label_or_number(input)
        .ok_or_else(|| InputError::new(format!("Unknown command or cell: {}", input)))
}
