//! # Discovery Engine Adapters
//!
//! The production engine is supplied by the host. This module carries a
//! scriptable in-memory engine for tests and local wiring.

/// Scriptable in-memory engine
pub mod in_memory;

pub use in_memory::InMemoryDiscoveryEngine;
