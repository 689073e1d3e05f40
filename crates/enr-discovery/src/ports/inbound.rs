//! # Driving Port (Inbound API)
//!
//! The generic peer-discovery interface a networking stack consumes.

use async_trait::async_trait;

use crate::domain::{DiscoveryError, RecordInput};

/// Peer source with a start/stop lifecycle.
///
/// Discovered peers are delivered out of band through the
/// `PeerEventPublisher` the implementation was built with.
///
/// # Example
///
/// ```rust,ignore
/// async fn run<D: PeerDiscovery>(discovery: &D) -> Result<(), DiscoveryError> {
///     discovery.start().await?;
///     // ... peers arrive on the event stream ...
///     discovery.stop().await
/// }
/// ```
#[async_trait]
pub trait PeerDiscovery: Send + Sync {
    /// Begin discovering peers. Calling again while running is a no-op.
    async fn start(&self) -> Result<(), DiscoveryError>;

    /// Stop discovering peers. Calling again while stopped is a no-op.
    ///
    /// Once this resolves, no further events originate from lookups.
    async fn stop(&self) -> Result<(), DiscoveryError>;

    /// Whether the service is currently running.
    fn is_started(&self) -> bool;

    /// Hand a trusted record to the engine.
    ///
    /// # Errors
    ///
    /// - `Decode` if encoded input is malformed
    /// - `InvalidInput` if the record has no UDP endpoint
    fn add_record(&self, input: RecordInput) -> Result<(), DiscoveryError>;
}
