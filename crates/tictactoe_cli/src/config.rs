//! Game configuration loaded from TOML.
//!
//! ```toml
//! [player_one]
//! name = "Ada"
//! marker = "X"
//!
//! [player_two]
//! name = "Grace"
//! marker = "O"
//! ```

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tictactoe_core::{GameController, Marker};
use tracing::{debug, info, instrument};

/// One player's settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct PlayerConfig {
    /// Display name.
    name: String,
    /// Marker for the session.
    marker: Marker,
}

/// Settings for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Created first; opens the first round.
    #[serde(default = "default_player_one")]
    player_one: PlayerConfig,

    /// Created second.
    #[serde(default = "default_player_two")]
    player_two: PlayerConfig,
}

#[instrument]
fn default_player_one() -> PlayerConfig {
    PlayerConfig::new("Player 1".to_string(), Marker::X)
}

#[instrument]
fn default_player_two() -> PlayerConfig {
    PlayerConfig::new("Player 2".to_string(), Marker::O)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_one: default_player_one(),
            player_two: default_player_two(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, does not parse, or assigns one
    /// marker to both players.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            player_one = %config.player_one.name,
            player_two = %config.player_two.name,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or when both players share a marker.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file if given, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// See [`GameConfig::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Replaces player names given on the command line.
    #[instrument(skip(self))]
    pub fn with_names(mut self, player_one: Option<String>, player_two: Option<String>) -> Self {
        if let Some(name) = player_one {
            self.player_one.name = name;
        }
        if let Some(name) = player_two {
            self.player_two.name = name;
        }
        self
    }

    /// Checks that the players use different markers.
    ///
    /// # Errors
    ///
    /// Returns an error naming the shared marker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_one.marker == self.player_two.marker {
            return Err(ConfigError::new(format!(
                "Both players use marker {}",
                self.player_one.marker
            )));
        }
        Ok(())
    }

    /// Builds a controller with both players registered.
    ///
    /// # Errors
    ///
    /// Fails if the registry refuses a player.
    #[instrument(skip(self))]
    pub fn build_controller(&self) -> Result<GameController, ConfigError> {
        GameController::with_players(
            (self.player_one.name.as_str(), self.player_one.marker),
            (self.player_two.name.as_str(), self.player_two.marker),
        )
        .map_err(|e| ConfigError::new(format!("Failed to register players: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
