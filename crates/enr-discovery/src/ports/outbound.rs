//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application provides to this adapter.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::{DiscoveryConfig, EngineError, NodeId, NodeRecord, PeerDiscoveryEvent};

/// The wrapped node-discovery engine.
///
/// Record exchange, distance lookups, session cryptography and the UDP
/// transport all live behind this trait.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the polling loop and the
/// notification task call into the engine concurrently with lifecycle
/// calls.
#[async_trait]
pub trait DiscoveryEngine: Send + Sync {
    /// Start the engine (bind socket, begin serving).
    async fn start(&self) -> Result<(), EngineError>;

    /// Stop the engine.
    async fn stop(&self) -> Result<(), EngineError>;

    /// Look up the records closest to `target`.
    ///
    /// Lookup timeouts are the engine's concern.
    async fn find_node(&self, target: NodeId) -> Result<Vec<NodeRecord>, EngineError>;

    /// Insert a record into the engine's record store.
    fn add_record(&self, record: NodeRecord) -> Result<(), EngineError>;

    /// Subscribe to records the engine learns about on its own.
    ///
    /// Dropping the receiver is the unsubscribe.
    fn subscribe_discovered(&self) -> broadcast::Receiver<NodeRecord>;
}

/// Sink for discovery events.
///
/// Must accept concurrent producers: the polling loop and the notification
/// task publish independently.
pub trait PeerEventPublisher: Send + Sync {
    /// Publish an event.
    ///
    /// # Returns
    ///
    /// The number of subscribers that received it.
    fn publish(&self, event: PeerDiscoveryEvent) -> usize;
}

/// Source of discovery configuration.
pub trait ConfigProvider: Send + Sync {
    /// Build the discovery configuration.
    fn discovery_config(&self) -> DiscoveryConfig;
}
