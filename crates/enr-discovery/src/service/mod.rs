//! # ENR Discovery Service
//!
//! Wires the domain translation rules to the engine and publisher ports and
//! owns the start/stop lifecycle.
//!
//! ## Background tasks
//!
//! While running, two tasks share the service state:
//! - the lookup loop, issuing random-target lookups at a fixed cadence
//! - the notification listener, forwarding records the engine finds itself
//!
//! Both publish through the same `PeerEventPublisher`.

// Semantic submodules
mod api;
mod core;
mod ingest;
mod lifecycle;
mod lookup;

// Re-export public API
pub use self::core::EnrDiscoveryService;
