//! Session management for concurrent callers.
//!
//! A controller's operations are multi-step (place, switch turn, evaluate), so
//! every session sits behind its own lock and callers run whole operations
//! while holding it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::controller::GameController;
use crate::error::SessionError;

/// Unique identifier for a game session.
pub type SessionId = String;

type SharedGame = Arc<Mutex<GameController>>;

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, SharedGame>>>,
}

impl SessionManager {
    /// Creates a new session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    /// Stores a controller under a new id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyExists`] if the id is in use.
    #[instrument(skip(self, game))]
    pub fn create_session(&self, id: &str, game: GameController) -> Result<(), SessionError> {
        let mut sessions = lock(&self.sessions);
        if sessions.contains_key(id) {
            warn!("Session already exists");
            return Err(SessionError::AlreadyExists(id.to_string()));
        }
        sessions.insert(id.to_string(), Arc::new(Mutex::new(game)));
        info!("Created new session");
        Ok(())
    }

    /// Runs `f` on the session's controller while holding its lock.
    ///
    /// The manager's map lock is released before `f` runs, so different
    /// sessions never wait on each other.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown id.
    #[instrument(skip(self, f))]
    pub fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameController) -> R,
    ) -> Result<R, SessionError> {
        let game = lock(&self.sessions).get(id).cloned().ok_or_else(|| {
            debug!("Session not found");
            SessionError::NotFound(id.to_string())
        })?;
        let mut game = lock(&game);
        Ok(f(&mut game))
    }

    /// Drops a session. Returns false if it did not exist.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> bool {
        let removed = lock(&self.sessions).remove(id).is_some();
        if removed {
            info!("Removed session");
        }
        removed
    }

    /// Lists all active session ids, sorted.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = lock(&self.sessions).keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Marker;

    fn game() -> GameController {
        GameController::with_players(("Ada", Marker::X), ("Grace", Marker::O)).unwrap()
    }

    #[test]
    fn test_create_and_list() {
        let manager = SessionManager::new();
        manager.create_session("b", game()).unwrap();
        manager.create_session("a", game()).unwrap();
        assert_eq!(manager.list_sessions(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_session_rejected() {
        let manager = SessionManager::new();
        manager.create_session("a", game()).unwrap();
        assert_eq!(
            manager.create_session("a", game()),
            Err(SessionError::AlreadyExists("a".to_string()))
        );
    }

    #[test]
    fn test_with_session_mutates_in_place() {
        let manager = SessionManager::new();
        manager.create_session("a", game()).unwrap();
        manager.with_session("a", |g| g.submit_move(4)).unwrap().unwrap();

        let history_len = manager.with_session("a", |g| g.history().len()).unwrap();
        assert_eq!(history_len, 1);
    }

    #[test]
    fn test_missing_session() {
        let manager = SessionManager::new();
        assert_eq!(
            manager.with_session("nope", |g| g.round()),
            Err(SessionError::NotFound("nope".to_string()))
        );
        assert!(!manager.remove_session("nope"));
    }
}
