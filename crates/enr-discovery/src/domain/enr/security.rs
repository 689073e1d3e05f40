//! Identity key material carried by a record.
//!
//! SECURITY-CRITICAL: node identifiers are derived here.

use sha3::{Digest, Keccak256};

/// Compressed secp256k1 public key (33 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 33]);

impl PublicKey {
    /// Create from bytes
    pub fn new(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// True when the prefix byte marks a compressed curve point.
    pub fn is_compressed(&self) -> bool {
        matches!(self.0[0], 0x02 | 0x03)
    }
}

/// ECDSA signature (64 bytes: r + s)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from bytes
    pub fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Create an empty signature
    pub fn empty() -> Self {
        Self([0u8; 64])
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// Keccak-256 digest used for node identifier derivation.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}
