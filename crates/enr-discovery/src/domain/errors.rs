//! Domain Errors for ENR Discovery
//!
//! Three families of failure reach callers of this crate:
//! - `InvalidInput`: a record or setting that can never be acted on
//! - `Decode`: a malformed encoded record
//! - `Engine`: whatever the wrapped discovery engine reports

use thiserror::Error;

/// Errors surfaced by the discovery adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// Input rejected before reaching the engine.
    ///
    /// Raised by the strict ingestion path when a record exposes no UDP
    /// endpoint, and by construction when the bind address is not UDP.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encoded record could not be decoded.
    #[error("Record decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The discovery engine reported a failure.
    #[error("Discovery engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Errors from decoding the text or binary form of a node record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Text form does not start with `enr:`.
    #[error("missing 'enr:' prefix")]
    MissingPrefix,

    /// Text body is not valid hex.
    #[error("invalid hex body: {0}")]
    InvalidHex(String),

    /// Record exceeds the maximum encoded size.
    #[error("record is {size} bytes, limit is {max}")]
    TooLarge {
        /// Actual encoded size
        size: usize,
        /// Configured limit
        max: usize,
    },

    /// Input ended before a field was complete.
    #[error("record truncated while reading {0}")]
    Truncated(&'static str),

    /// Identity key is not a compressed secp256k1 point.
    #[error("identity key has invalid prefix 0x{0:02x}")]
    InvalidPublicKey(u8),

    /// Entry tag not understood by this decoder.
    #[error("unknown record key 0x{0:02x}")]
    UnknownKey(u8),

    /// Entry tag appeared more than once.
    #[error("duplicate record key '{0}'")]
    DuplicateKey(&'static str),

    /// Bytes left over after the last entry.
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

/// Opaque failure reported by the wrapped discovery engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    /// Engine-defined description
    pub message: String,
}

impl EngineError {
    /// Create an engine error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
