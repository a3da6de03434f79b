//! Players, scores and turn order.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::error::RegistryError;
use crate::types::{Marker, RoundOutcome};

/// Which of the two registration slots a player occupies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum PlayerSlot {
    /// Created first; moves first in a fresh session.
    First,
    /// Created second.
    Second,
}

impl PlayerSlot {
    /// Returns the other slot.
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }

    fn index(self) -> usize {
        match self {
            PlayerSlot::First => 0,
            PlayerSlot::Second => 1,
        }
    }
}

/// A player in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Display name.
    name: String,
    /// Name given at creation, restored by renaming to a blank name.
    default_name: String,
    /// Marker for the whole session.
    marker: Marker,
    /// Rounds won.
    score: u32,
}

impl Player {
    /// Creates a player with a zero score.
    pub fn new(name: impl Into<String>, marker: Marker) -> Self {
        let name = name.into();
        Self {
            default_name: name.clone(),
            name,
            marker,
            score: 0,
        }
    }

    fn rename(&mut self, name: &str) {
        let name = name.trim();
        self.name = if name.is_empty() {
            self.default_name.clone()
        } else {
            name.to_string()
        };
    }
}

/// Result of the last finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LastResult {
    /// The player in this slot won.
    Winner(PlayerSlot),
    /// Nobody won.
    Tie,
}

/// Holds up to two players and tracks whose turn it is.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    current: usize,
    last_result: Option<LastResult>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player. The first player created moves first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Full`] once two players exist and
    /// [`RegistryError::MarkerTaken`] if the other player already uses the
    /// marker. The registry is left unchanged in both cases.
    #[instrument(skip(self, name), fields(name = %name.as_ref()))]
    pub fn create_player(
        &mut self,
        name: impl AsRef<str>,
        marker: Marker,
    ) -> Result<PlayerSlot, RegistryError> {
        if self.players.len() >= 2 {
            warn!("Registry already has 2 players");
            return Err(RegistryError::Full);
        }
        if self.slot_of(marker).is_some() {
            warn!("Marker already taken");
            return Err(RegistryError::MarkerTaken(marker));
        }

        let slot = if self.players.is_empty() {
            PlayerSlot::First
        } else {
            PlayerSlot::Second
        };
        self.players.push(Player::new(name.as_ref(), marker));
        info!(%slot, "Player registered");
        Ok(slot)
    }

    /// Number of registered players (0-2).
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when no player is registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// True once both players exist.
    pub fn is_ready(&self) -> bool {
        self.players.len() == 2
    }

    /// Registered players in creation order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player in a slot.
    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.players.get(slot.index())
    }

    /// Slot of the player using the marker.
    pub fn slot_of(&self, marker: Marker) -> Option<PlayerSlot> {
        PlayerSlot::iter().find(|&slot| self.player(slot).is_some_and(|p| p.marker == marker))
    }

    /// Slot whose turn it is.
    pub fn current_slot(&self) -> PlayerSlot {
        if self.current == 0 {
            PlayerSlot::First
        } else {
            PlayerSlot::Second
        }
    }

    /// The player whose turn it is, once registered.
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current_slot())
    }

    /// Passes the turn to the other player.
    ///
    /// Does nothing until both players exist.
    #[instrument(skip(self))]
    pub fn switch_turn(&mut self) {
        if !self.is_ready() {
            warn!(players = self.players.len(), "Cannot switch turn without 2 players");
            return;
        }
        self.current = 1 - self.current;
        debug!(current = %self.current_slot(), "Turn switched");
    }

    /// Applies a round outcome to scores.
    ///
    /// A win scores a point for the marker's owner and remembers them as last
    /// winner; a tie records [`LastResult::Tie`]; `Ongoing` changes nothing.
    #[instrument(skip(self))]
    pub fn record_round_result(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Ongoing => {}
            RoundOutcome::Tie => {
                info!("Round tied");
                self.last_result = Some(LastResult::Tie);
            }
            RoundOutcome::Win(marker) => {
                let Some(slot) = self.slot_of(marker) else {
                    warn!(%marker, "No player owns winning marker");
                    return;
                };
                let player = &mut self.players[slot.index()];
                player.score += 1;
                info!(%slot, score = player.score, "Round won");
                self.last_result = Some(LastResult::Winner(slot));
            }
        }
    }

    /// Result of the last finished round, `None` before the first.
    pub fn last_result(&self) -> Option<LastResult> {
        self.last_result
    }

    /// The player who won the last finished round.
    pub fn last_winner(&self) -> Option<&Player> {
        match self.last_result? {
            LastResult::Winner(slot) => self.player(slot),
            LastResult::Tie => None,
        }
    }

    /// Sets the first mover of a new round.
    ///
    /// The player who did not win the previous round starts; after a tie or
    /// before any round has finished, the first-created player starts.
    #[instrument(skip(self))]
    pub fn begin_round(&mut self) {
        let starter = match self.last_result {
            Some(LastResult::Winner(slot)) => slot.other(),
            Some(LastResult::Tie) | None => PlayerSlot::First,
        };
        self.current = starter.index();
        debug!(%starter, "Round starter chosen");
    }

    /// Changes a player's display name.
    ///
    /// Blank names restore the player's default name. Marker, score and turn
    /// order are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Vacant`] if no player occupies the slot.
    #[instrument(skip(self))]
    pub fn rename_player(&mut self, which: PlayerSlot, name: &str) -> Result<(), RegistryError> {
        let player = self
            .players
            .get_mut(which.index())
            .ok_or(RegistryError::Vacant(which))?;
        player.rename(name);
        info!(name = %player.name, "Player renamed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        registry.create_player("Ada", Marker::X).unwrap();
        registry.create_player("Grace", Marker::O).unwrap();
        registry
    }

    #[test]
    fn test_first_created_moves_first() {
        let registry = registry();
        assert_eq!(registry.current_slot(), PlayerSlot::First);
        assert_eq!(registry.current_player().map(|p| p.name().as_str()), Some("Ada"));
    }

    #[test]
    fn test_third_player_rejected() {
        let mut registry = registry();
        assert_eq!(registry.create_player("Linus", Marker::X), Err(RegistryError::Full));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_marker_rejected() {
        let mut registry = PlayerRegistry::new();
        registry.create_player("Ada", Marker::O).unwrap();
        assert_eq!(
            registry.create_player("Grace", Marker::O),
            Err(RegistryError::MarkerTaken(Marker::O))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_switch_turn_toggles() {
        let mut registry = registry();
        registry.switch_turn();
        assert_eq!(registry.current_slot(), PlayerSlot::Second);
        registry.switch_turn();
        assert_eq!(registry.current_slot(), PlayerSlot::First);
    }

    #[test]
    fn test_switch_turn_needs_two_players() {
        let mut registry = PlayerRegistry::new();
        registry.create_player("Ada", Marker::X).unwrap();
        registry.switch_turn();
        assert_eq!(registry.current_slot(), PlayerSlot::First);
    }

    #[test]
    fn test_record_win_scores_owner() {
        let mut registry = registry();
        registry.record_round_result(RoundOutcome::Win(Marker::O));

        assert_eq!(*registry.player(PlayerSlot::Second).unwrap().score(), 1);
        assert_eq!(*registry.player(PlayerSlot::First).unwrap().score(), 0);
        assert_eq!(registry.last_result(), Some(LastResult::Winner(PlayerSlot::Second)));
        assert_eq!(registry.last_winner().map(|p| p.name().as_str()), Some("Grace"));
    }

    #[test]
    fn test_record_tie_and_ongoing() {
        let mut registry = registry();
        registry.record_round_result(RoundOutcome::Ongoing);
        assert_eq!(registry.last_result(), None);

        registry.record_round_result(RoundOutcome::Win(Marker::X));
        registry.record_round_result(RoundOutcome::Tie);
        assert_eq!(registry.last_result(), Some(LastResult::Tie));
        assert!(registry.last_winner().is_none());
        assert_eq!(*registry.player(PlayerSlot::First).unwrap().score(), 1);
    }

    #[test]
    fn test_begin_round_loser_starts() {
        let mut registry = registry();
        registry.record_round_result(RoundOutcome::Win(Marker::X));
        registry.begin_round();
        assert_eq!(registry.current_slot(), PlayerSlot::Second);

        registry.record_round_result(RoundOutcome::Tie);
        registry.begin_round();
        assert_eq!(registry.current_slot(), PlayerSlot::First);
    }

    #[test]
    fn test_rename_keeps_marker_and_score() {
        let mut registry = registry();
        registry.record_round_result(RoundOutcome::Win(Marker::X));
        registry.rename_player(PlayerSlot::First, "  Countess  ").unwrap();

        let player = registry.player(PlayerSlot::First).unwrap();
        assert_eq!(player.name(), "Countess");
        assert_eq!(player.default_name(), "Ada");
        assert_eq!(*player.marker(), Marker::X);
        assert_eq!(*player.score(), 1);
        assert_eq!(registry.current_slot(), PlayerSlot::First);
    }

    #[test]
    fn test_blank_rename_restores_default() {
        let mut registry = registry();
        registry.rename_player(PlayerSlot::Second, "Hopper").unwrap();
        registry.rename_player(PlayerSlot::Second, "   ").unwrap();
        assert_eq!(registry.player(PlayerSlot::Second).unwrap().name(), "Grace");
    }

    #[test]
    fn test_rename_vacant_slot() {
        let mut registry = PlayerRegistry::new();
        assert_eq!(
            registry.rename_player(PlayerSlot::Second, "Nobody"),
            Err(RegistryError::Vacant(PlayerSlot::Second))
        );
    }
}
