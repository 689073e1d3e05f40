//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Port (Inbound):** the peer-discovery API the networking stack uses
//! - **Driven Ports (Outbound):** the discovery engine, the event sink and
//!   configuration sources this adapter depends on

pub mod inbound;
pub mod outbound;

pub use inbound::PeerDiscovery;
pub use outbound::{ConfigProvider, DiscoveryEngine, PeerEventPublisher};
