//! # ENR Discovery Adapter
//!
//! Adapts an ENR-addressed node discovery engine (discv5 style) into the
//! `"peer"` event stream a peer-to-peer networking stack consumes.
//!
//! The engine itself (record exchange, distance lookups, session crypto,
//! UDP transport) is supplied by the host through the `DiscoveryEngine`
//! port. This crate owns:
//!
//! - **Record ingestion:** a lazy path that translates discovered records
//!   into connectable peers (skipping records without a UDP endpoint) and a
//!   strict path that rejects such records before they reach the engine
//! - **Discovery loop:** start/stop lifecycle, a random-target lookup loop
//!   at a fixed cadence, and forwarding of the engine's own discoveries
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** records, identifiers, translation rules
//! - **Ports Layer:** `PeerDiscovery` (driving), `DiscoveryEngine`,
//!   `PeerEventPublisher` and `ConfigProvider` (driven)
//! - **Service Layer:** `EnrDiscoveryService`
//! - **Adapters Layer:** broadcast publisher, config providers, test doubles
//!
//! ## Features
//!
//! - `toml-config` (default) - `TomlConfigProvider`
//! - `telemetry` - `tracing-subscriber` setup helpers
//!
//! ## Example
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use qc_enr_discovery::{translate, NodeRecord, PeerAddress, PublicKey};
//!
//! let mut key = [0u8; 33];
//! key[0] = 0x02;
//! let record = NodeRecord::new(1, PublicKey::new(key))
//!     .with_ip(Ipv4Addr::new(10, 0, 0, 1))
//!     .with_udp(9000)
//!     .with_tcp(30303);
//!
//! let peer = translate(&record).unwrap();
//! assert_eq!(
//!     peer.addresses,
//!     vec![
//!         PeerAddress::udp(Ipv4Addr::new(10, 0, 0, 1), 9000),
//!         PeerAddress::tcp(Ipv4Addr::new(10, 0, 0, 1), 30303),
//!     ]
//! );
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Logging setup.
/// Requires feature: `telemetry`
#[cfg(feature = "telemetry")]
pub mod telemetry;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain entities
pub use domain::{
    DecodeError, DiscoveredPeer, DiscoveryConfig, DiscoveryError, DiscoveryStats, EngineError,
    EnrConfig, NodeId, NodeRecord, PeerAddress, PeerDiscoveryEvent, PeerId, PublicKey,
    RecordInput, Signature, Transport, DEFAULT_DISCOVERY_PORT, DEFAULT_LOOKUP_INTERVAL_MS,
};

// Domain services
pub use domain::{decode, decode_text, encode, encode_text, require_udp_endpoint, translate};

// Port traits
pub use ports::{ConfigProvider, DiscoveryEngine, PeerDiscovery, PeerEventPublisher};

// Service
pub use service::EnrDiscoveryService;

// Adapters
pub use adapters::{
    BroadcastPeerPublisher, InMemoryDiscoveryEngine, InMemoryPeerPublisher, NoOpPeerPublisher,
    StaticConfigProvider,
};

#[cfg(feature = "toml-config")]
pub use adapters::{ConfigError, TomlConfigProvider};

#[cfg(feature = "telemetry")]
pub use telemetry::{init_tracing, LoggingConfig, TelemetryError};
