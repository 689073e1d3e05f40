//! # Ethereum Node Records (ENR)
//!
//! Self-signed node identity records as handed to us by the discovery
//! engine or by operators.
//!
//! The adapter never verifies signatures; the engine owns that. What it
//! needs from a record is the identity key and the declared endpoints.
//!
//! Reference: EIP-778 (Ethereum Node Records)

// Semantic submodules
mod codec;
mod config;
mod record;
mod security;

// Re-export public API
pub use codec::{decode, decode_text, encode, encode_text, TEXT_PREFIX};
pub use config::EnrConfig;
pub use record::{NodeRecord, RecordInput};
pub use security::{keccak256, PublicKey, Signature};

#[cfg(test)]
mod tests;
