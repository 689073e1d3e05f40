//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `publisher` - event sinks (broadcast channel, test doubles)
//! - `engine` - scriptable in-memory discovery engine
//! - `config` - static and TOML configuration providers

pub mod config;
pub mod engine;
pub mod publisher;

pub use config::StaticConfigProvider;
pub use engine::InMemoryDiscoveryEngine;
pub use publisher::{
    BroadcastPeerPublisher, InMemoryPeerPublisher, NoOpPeerPublisher, DEFAULT_EVENT_CAPACITY,
};

#[cfg(feature = "toml-config")]
pub use config::{ConfigError, TomlConfigProvider};
