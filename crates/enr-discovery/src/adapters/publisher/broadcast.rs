use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::trace;

use crate::domain::PeerDiscoveryEvent;
use crate::ports::PeerEventPublisher;

/// Default number of buffered events per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Publisher backed by `tokio::sync::broadcast`.
///
/// Any number of producers may publish concurrently; each subscriber sees
/// every event published after it subscribed. Slow subscribers lag and lose
/// the oldest events rather than blocking discovery.
#[derive(Debug, Clone)]
pub struct BroadcastPeerPublisher {
    sender: broadcast::Sender<PeerDiscoveryEvent>,
    capacity: usize,
}

impl BroadcastPeerPublisher {
    /// Create a publisher with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a publisher buffering `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PeerDiscoveryEvent> {
        self.sender.subscribe()
    }

    /// Subscribe as a `Stream`.
    #[must_use]
    pub fn event_stream(&self) -> BroadcastStream<PeerDiscoveryEvent> {
        BroadcastStream::new(self.subscribe())
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Buffer size per subscriber.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BroadcastPeerPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerEventPublisher for BroadcastPeerPublisher {
    fn publish(&self, event: PeerDiscoveryEvent) -> usize {
        let kind = event.kind();
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!(kind, "No subscribers for discovery event");
                0
            }
        }
    }
}
