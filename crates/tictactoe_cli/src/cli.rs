//! Command-line interface for the tic-tac-toe front end.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Name for the first player (overrides the config)
    #[arg(long, global = true)]
    pub player_one: Option<String>,

    /// Name for the second player (overrides the config)
    #[arg(long, global = true)]
    pub player_two: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play interactively on stdin
    Play,

    /// Apply a list of board indices (0-8) and print the result
    Replay {
        /// Cells in move order, separated by spaces or commas
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        cells: Vec<usize>,
    },
}
