//! Tic-tac-toe - terminal front end.

#![warn(missing_docs)]

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tictactoe_cli::{Cli, Command, GameConfig, SharedWriter, attach, run_play, run_replay};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref())?.with_names(cli.player_one, cli.player_two);
    info!(?config, "Starting game");

    let mut game = config.build_controller()?;
    let out: SharedWriter = Arc::new(Mutex::new(io::stdout()));
    attach(&mut game, &out);

    match cli.command {
        Command::Play => run_play(&mut game, io::stdin().lock(), &out),
        Command::Replay { cells } => run_replay(&mut game, &cells, &out),
    }
}
