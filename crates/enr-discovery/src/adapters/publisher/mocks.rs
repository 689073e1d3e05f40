use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::{DiscoveredPeer, PeerDiscoveryEvent};
use crate::ports::PeerEventPublisher;

/// No-op publisher for testing.
#[derive(Debug, Default)]
pub struct NoOpPeerPublisher {
    /// Count of published events (for testing verification).
    pub event_count: AtomicUsize,
}

impl NoOpPeerPublisher {
    /// Create a new no-op publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the count of published events.
    #[must_use]
    pub fn get_event_count(&self) -> usize {
        self.event_count.load(Ordering::SeqCst)
    }
}

impl PeerEventPublisher for NoOpPeerPublisher {
    fn publish(&self, _event: PeerDiscoveryEvent) -> usize {
        self.event_count.fetch_add(1, Ordering::SeqCst);
        0
    }
}

/// In-memory publisher for testing that stores events.
#[derive(Debug, Default)]
pub struct InMemoryPeerPublisher {
    events: Mutex<Vec<PeerDiscoveryEvent>>,
}

impl InMemoryPeerPublisher {
    /// Create a new in-memory publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all published events.
    #[must_use]
    pub fn get_events(&self) -> Vec<PeerDiscoveryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the peers of all published events, in publication order.
    #[must_use]
    pub fn peers(&self) -> Vec<DiscoveredPeer> {
        self.get_events()
            .into_iter()
            .map(|event| match event {
                PeerDiscoveryEvent::Peer(peer) => peer,
            })
            .collect()
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all stored events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl PeerEventPublisher for InMemoryPeerPublisher {
    fn publish(&self, event: PeerDiscoveryEvent) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        1
    }
}
