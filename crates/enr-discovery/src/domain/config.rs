//! Discovery adapter configuration.

use std::net::Ipv4Addr;
use std::time::Duration;

use super::enr::{NodeRecord, RecordInput};
use super::value_objects::PeerAddress;

/// Default cadence between polling lookups.
pub const DEFAULT_LOOKUP_INTERVAL_MS: u64 = 5000;

/// Default UDP port the engine binds to.
pub const DEFAULT_DISCOVERY_PORT: u16 = 9000;

/// Settings consumed when constructing the discovery service.
///
/// `enabled` is advisory: the surrounding node decides whether to build the
/// service at all; the service itself never reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Record the engine advertises for this node
    pub local_record: NodeRecord,
    /// Local UDP address the engine binds to
    pub bind_address: PeerAddress,
    /// Seed records ingested at construction
    pub boot_records: Vec<RecordInput>,
    /// Whether the node wants discovery at all
    pub enabled: bool,
    /// Wait between successive random lookups
    pub lookup_interval: Duration,
}

impl DiscoveryConfig {
    /// Create a config with default settings around a local record.
    pub fn new(local_record: NodeRecord) -> Self {
        Self {
            local_record,
            bind_address: PeerAddress::udp(Ipv4Addr::UNSPECIFIED, DEFAULT_DISCOVERY_PORT),
            boot_records: Vec::new(),
            enabled: true,
            lookup_interval: Duration::from_millis(DEFAULT_LOOKUP_INTERVAL_MS),
        }
    }

    /// Set the bind address.
    #[must_use]
    pub fn with_bind_address(mut self, bind_address: PeerAddress) -> Self {
        self.bind_address = bind_address;
        self
    }

    /// Replace the seed records.
    #[must_use]
    pub fn with_boot_records<I, R>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RecordInput>,
    {
        self.boot_records = records.into_iter().map(Into::into).collect();
        self
    }

    /// Set the advisory enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the lookup cadence.
    #[must_use]
    pub fn with_lookup_interval(mut self, interval: Duration) -> Self {
        self.lookup_interval = interval;
        self
    }
}
