//! Broadcast channel for ledger events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every ledger
//! mutation publishes a [`LedgerEvent`] through the bus; hosts subscribe to
//! observe the ledger without polling it. A [`Watch`] narrows a
//! subscription to the events that involve a set of identities, such as a
//! participant and everyone voting for it.

use std::collections::HashSet;

use tokio::sync::broadcast::{self, error::RecvError};

use super::{Address, LedgerEvent};

/// Largest ring buffer the bus will allocate. Larger requests are clamped.
pub const MAX_EVENT_BUS_CAPACITY: usize = 1 << 20;

/// Broadcast bus for [`LedgerEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LedgerEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per receiver,
    /// clamped to `1..=MAX_EVENT_BUS_CAPACITY`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_EVENT_BUS_CAPACITY));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that got the event; zero when nobody
    /// is listening.
    pub fn publish(&self, event: LedgerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Receives every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Receives only events involving one of `identities`.
    #[must_use]
    pub fn watch<I>(&self, identities: I) -> Watch
    where
        I: IntoIterator<Item = Address>,
    {
        Watch {
            receiver: self.sender.subscribe(),
            identities: identities.into_iter().collect(),
        }
    }

    /// Number of live receivers, filtered or not.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Subscription filtered by the identities an event involves.
///
/// See [`LedgerEvent::involves`] for what counts as involvement.
#[derive(Debug)]
pub struct Watch {
    receiver: broadcast::Receiver<LedgerEvent>,
    identities: HashSet<Address>,
}

impl Watch {
    /// Adds `identity` to the watched set.
    pub fn add(&mut self, identity: Address) {
        self.identities.insert(identity);
    }

    /// Returns `true` if `event` passes this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        self.identities.iter().any(|identity| event.involves(identity))
    }

    /// Waits for the next matching event, skipping the rest.
    ///
    /// # Errors
    ///
    /// - [`RecvError::Lagged`] if the receiver fell behind; the count covers
    ///   skipped events of every kind, not just matching ones.
    /// - [`RecvError::Closed`] once every sender is gone.
    pub async fn recv(&mut self) -> Result<LedgerEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.matches(&event) {
                return Ok(event);
            }
        }
    }
}
