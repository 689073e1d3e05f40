//! Core Domain Entities for ENR Discovery

use super::value_objects::{PeerAddress, PeerId};

/// A peer translated from a record, ready for dialing.
///
/// `addresses` is never empty. The UDP endpoint always comes first; a TCP
/// endpoint follows when the record declares one.
///
/// Consumers must tolerate duplicates: the same peer is reported again
/// every time a lookup or notification returns its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPeer {
    /// Identity derived from the record's key
    pub peer_id: PeerId,
    /// Connectable addresses, UDP first
    pub addresses: Vec<PeerAddress>,
}

/// Events emitted to the networking stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerDiscoveryEvent {
    /// A connectable peer was found.
    Peer(DiscoveredPeer),
}

impl PeerDiscoveryEvent {
    /// Event kind name as seen by subscribers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Peer(_) => "peer",
        }
    }
}

/// Counters describing discovery activity since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Random-target lookups issued
    pub lookups: u64,
    /// Lookups that returned an engine error
    pub lookup_failures: u64,
    /// `"peer"` events published
    pub peers_emitted: u64,
    /// Records dropped for lacking a UDP endpoint
    pub records_ignored: u64,
}
