//! Synchronous publish/subscribe event bus.
//!
//! Handlers are grouped by event name and run in the order they subscribed.
//! Every handler receives the same mutable payload, so a change made by one
//! handler is visible to the handlers after it. Publishing a name with no
//! handlers does nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::types::{Marker, RoundOutcome, Snapshot};

/// Boxed event handler.
pub type Handler<P> = Box<dyn FnMut(&mut P) + Send>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("Subscription({})", _0)]
pub struct SubscriptionId(u64);

/// Named-event registry.
pub struct EventBus<P> {
    handlers: HashMap<String, Vec<(SubscriptionId, Handler<P>)>>,
    next_id: u64,
}

impl<P> EventBus<P> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Appends a handler to the event's handler list.
    #[instrument(skip(self, handler))]
    pub fn subscribe<F>(&mut self, event: &str, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut P) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push((id, Box::new(handler)));
        debug!(%id, "Handler subscribed");
        id
    }

    /// Removes a handler. Returns false if it was not subscribed.
    #[instrument(skip(self))]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in self.handlers.values_mut() {
            if let Some(at) = list.iter().position(|(sub, _)| *sub == id) {
                list.remove(at);
                debug!("Handler unsubscribed");
                return true;
            }
        }
        false
    }

    /// Calls every handler of the event in subscription order.
    ///
    /// Returns the number of handlers invoked.
    #[instrument(skip(self, payload))]
    pub fn publish(&mut self, event: &str, payload: &mut P) -> usize {
        let Some(list) = self.handlers.get_mut(event) else {
            trace!("No subscribers");
            return 0;
        };
        for (_, handler) in list.iter_mut() {
            handler(&mut *payload);
        }
        trace!(delivered = list.len(), "Event published");
        list.len()
    }

    /// Number of handlers subscribed to the event.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventBus")
            .field("handlers", &counts)
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Events the rules engine publishes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    /// A marker was placed.
    BoardUpdated,
    /// The round reached a win or a tie.
    GameOver,
    /// The board was cleared for a new round.
    RoundReset,
}

impl EventName {
    /// Wire name of the event (`boardUpdated`, `gameOver`, `roundReset`).
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Payload of `boardUpdated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// Cell that was written.
    pub index: usize,
    /// Marker written into the cell.
    pub marker: Marker,
    /// Board after the write.
    pub board: Snapshot,
}

/// Payload carried on the engine's bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// See [`EventName::BoardUpdated`].
    BoardUpdated(BoardUpdate),
    /// See [`EventName::GameOver`]. Carries `Win` or `Tie`.
    GameOver(RoundOutcome),
    /// See [`EventName::RoundReset`].
    RoundReset {
        /// Number of the round that is starting.
        round: u32,
    },
}

impl GameEvent {
    /// The name this payload is published under.
    pub fn name(&self) -> EventName {
        match self {
            GameEvent::BoardUpdated(_) => EventName::BoardUpdated,
            GameEvent::GameOver(_) => EventName::GameOver,
            GameEvent::RoundReset { .. } => EventName::RoundReset,
        }
    }
}

impl EventBus<GameEvent> {
    /// Publishes the event under its own name.
    pub fn emit(&mut self, mut event: GameEvent) -> usize {
        let name = event.name();
        self.publish(name.as_str(), &mut event)
    }
}
