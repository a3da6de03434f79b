//! Terminal front end for the tic-tac-toe rules engine.
//!
//! The engine in `tictactoe_core` holds all game logic. This crate is the
//! presentation collaborator: it loads player settings, subscribes a text
//! presenter to engine events, and turns typed commands into engine calls.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod input;
mod presenter;

pub use app::{run_play, run_replay, scoreboard};
pub use cli::{Cli, Command};
pub use config::{ConfigError, GameConfig, PlayerConfig};
pub use input::{HELP, InputError, PlayCommand};
pub use presenter::{SharedWriter, attach, describe, lock};
