//! Node Record implementation.
//!
//! Reference: EIP-778 (Ethereum Node Records)

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use super::codec;
use super::security::{keccak256, PublicKey, Signature};
use crate::domain::errors::DecodeError;
use crate::domain::value_objects::{NodeId, PeerAddress, PeerId, Transport};

/// Ethereum Node Record (EIP-778 inspired)
///
/// Endpoints are declared per address family: `ip` pairs with `udp`/`tcp`,
/// `ip6` pairs with `udp6`/`tcp6`. A port without its address (or the
/// reverse) declares nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Sequence number (increment on ANY change)
    pub seq: u64,
    /// Node's public key (33 bytes compressed secp256k1)
    pub pubkey: PublicKey,
    /// IPv4 address
    pub ip: Option<Ipv4Addr>,
    /// IPv6 address
    pub ip6: Option<Ipv6Addr>,
    /// UDP port over IPv4
    pub udp: Option<u16>,
    /// TCP port over IPv4
    pub tcp: Option<u16>,
    /// UDP port over IPv6
    pub udp6: Option<u16>,
    /// TCP port over IPv6
    pub tcp6: Option<u16>,
    /// Signature over the record (64 bytes)
    pub signature: Signature,
}

impl NodeRecord {
    /// Create an unsigned record with no endpoints.
    pub fn new(seq: u64, pubkey: PublicKey) -> Self {
        Self {
            seq,
            pubkey,
            ip: None,
            ip6: None,
            udp: None,
            tcp: None,
            udp6: None,
            tcp6: None,
            signature: Signature::empty(),
        }
    }

    /// Declare an IPv4 address.
    #[must_use]
    pub fn with_ip(mut self, ip: Ipv4Addr) -> Self {
        self.ip = Some(ip);
        self
    }

    /// Declare an IPv6 address.
    #[must_use]
    pub fn with_ip6(mut self, ip6: Ipv6Addr) -> Self {
        self.ip6 = Some(ip6);
        self
    }

    /// Declare the IPv4 UDP port.
    #[must_use]
    pub fn with_udp(mut self, port: u16) -> Self {
        self.udp = Some(port);
        self
    }

    /// Declare the IPv4 TCP port.
    #[must_use]
    pub fn with_tcp(mut self, port: u16) -> Self {
        self.tcp = Some(port);
        self
    }

    /// Declare the IPv6 UDP port.
    #[must_use]
    pub fn with_udp6(mut self, port: u16) -> Self {
        self.udp6 = Some(port);
        self
    }

    /// Declare the IPv6 TCP port.
    #[must_use]
    pub fn with_tcp6(mut self, port: u16) -> Self {
        self.tcp6 = Some(port);
        self
    }

    /// Attach a signature produced by the owning node.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Discovery identifier: Keccak-256 of the identity key.
    pub fn node_id(&self) -> NodeId {
        NodeId::new(keccak256(self.pubkey.as_bytes()))
    }

    /// Peer identity used by the networking stack.
    pub fn peer_id(&self) -> PeerId {
        PeerId::from_public_key(&self.pubkey)
    }

    /// Endpoint for a transport, IPv4 preferred over IPv6.
    pub fn endpoint(&self, transport: Transport) -> Option<PeerAddress> {
        let (port4, port6) = match transport {
            Transport::Udp => (self.udp, self.udp6),
            Transport::Tcp => (self.tcp, self.tcp6),
        };

        let v4 = self
            .ip
            .zip(port4)
            .map(|(ip, port)| PeerAddress::new(IpAddr::V4(ip), transport, port));
        v4.or_else(|| {
            self.ip6
                .zip(port6)
                .map(|(ip, port)| PeerAddress::new(IpAddr::V6(ip), transport, port))
        })
    }

    /// Datagram endpoint, if any family declares one.
    pub fn udp_endpoint(&self) -> Option<PeerAddress> {
        self.endpoint(Transport::Udp)
    }

    /// Stream endpoint, if any family declares one.
    pub fn tcp_endpoint(&self) -> Option<PeerAddress> {
        self.endpoint(Transport::Tcp)
    }

    /// Encoded text form (`enr:<hex>`).
    pub fn to_text(&self) -> String {
        codec::encode_text(self)
    }
}

impl FromStr for NodeRecord {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode_text(s, &Default::default())
    }
}

/// A record as supplied from outside: structured, or still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordInput {
    /// Already-parsed record
    Record(NodeRecord),
    /// Self-contained text form, decoded on ingestion
    Encoded(String),
}

impl RecordInput {
    /// Resolve to a structured record, decoding text input.
    pub fn into_record(self) -> Result<NodeRecord, DecodeError> {
        match self {
            Self::Record(record) => Ok(record),
            Self::Encoded(text) => text.parse(),
        }
    }
}

impl From<NodeRecord> for RecordInput {
    fn from(record: NodeRecord) -> Self {
        Self::Record(record)
    }
}

impl From<String> for RecordInput {
    fn from(text: String) -> Self {
        Self::Encoded(text)
    }
}

impl From<&str> for RecordInput {
    fn from(text: &str) -> Self {
        Self::Encoded(text.to_string())
    }
}
