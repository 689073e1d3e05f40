//! # Event Publisher Adapters
//!
//! Delivers `"peer"` events to the networking stack.
//!
//! - `BroadcastPeerPublisher` - multi-producer, multi-consumer channel
//! - `InMemoryPeerPublisher` / `NoOpPeerPublisher` - test doubles

// Semantic submodules
/// Broadcast channel publisher
pub mod broadcast;
/// Mock implementations for testing
pub mod mocks;

// Re-export public API
pub use self::broadcast::{BroadcastPeerPublisher, DEFAULT_EVENT_CAPACITY};
pub use mocks::{InMemoryPeerPublisher, NoOpPeerPublisher};
