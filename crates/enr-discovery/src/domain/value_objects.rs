//! Value Objects for ENR Discovery
//!
//! Identifiers and addresses that flow between the engine, the ingestion
//! pipeline and the networking stack.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use sha2::{Digest, Sha256};

use super::enr::PublicKey;
use super::errors::DiscoveryError;

/// 256-bit discovery identifier.
///
/// Records are addressed by the Keccak-256 hash of their identity key;
/// lookup targets are drawn uniformly at random.
// Hash over the raw bytes agrees with the constant-time PartialEq below.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Debug, Clone, Copy, Hash)]
pub struct NodeId(pub [u8; 32]);

impl PartialEq for NodeId {
    /// Constant-time comparison.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let mut result = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            result |= a ^ b;
        }
        result == 0
    }
}

impl Eq for NodeId {}

impl NodeId {
    /// Create a NodeId from raw 32-byte array.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Fresh random identifier, used as a lookup target.
    pub fn random() -> Self {
        Self(rand::random::<[u8; 32]>())
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Identity of a peer as seen by the networking stack.
///
/// SHA-256 of the record's compressed identity key. Derivation cannot fail
/// once the key has passed record decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId([u8; 32]);

impl PeerId {
    /// Derive the peer identity from a record's identity key.
    pub fn from_public_key(key: &PublicKey) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Transport kind of a record endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Datagram transport (discovery and QUIC-style dialing).
    Udp,
    /// Stream transport.
    Tcp,
}

impl Transport {
    /// Protocol segment used in address text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connectable network address in multiaddr text form.
///
/// ```text
/// /ip4/192.168.1.10/udp/9000
/// /ip6/::1/tcp/30303
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress {
    /// IP address (either family)
    pub ip: IpAddr,
    /// Transport kind
    pub transport: Transport,
    /// Port number
    pub port: u16,
}

impl PeerAddress {
    /// Create a new address.
    pub fn new(ip: IpAddr, transport: Transport, port: u16) -> Self {
        Self {
            ip,
            transport,
            port,
        }
    }

    /// UDP address shorthand.
    pub fn udp(ip: impl Into<IpAddr>, port: u16) -> Self {
        Self::new(ip.into(), Transport::Udp, port)
    }

    /// TCP address shorthand.
    pub fn tcp(ip: impl Into<IpAddr>, port: u16) -> Self {
        Self::new(ip.into(), Transport::Tcp, port)
    }

    /// True for datagram addresses.
    pub fn is_udp(&self) -> bool {
        self.transport == Transport::Udp
    }

    /// Plain socket address, dropping the transport tag.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.ip {
            IpAddr::V4(_) => "ip4",
            IpAddr::V6(_) => "ip6",
        };
        write!(f, "/{}/{}/{}/{}", family, self.ip, self.transport, self.port)
    }
}

impl FromStr for PeerAddress {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DiscoveryError::InvalidInput(format!("malformed address '{}'", s));

        let parts: Vec<&str> = s.split('/').collect();
        let [empty, family, ip, transport, port] = parts.as_slice() else {
            return Err(invalid());
        };
        if !empty.is_empty() {
            return Err(invalid());
        }

        let ip: IpAddr = match *family {
            "ip4" => IpAddr::V4(ip.parse().map_err(|_| invalid())?),
            "ip6" => IpAddr::V6(ip.parse().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        let transport = match *transport {
            "udp" => Transport::Udp,
            "tcp" => Transport::Tcp,
            _ => return Err(invalid()),
        };
        let port: u16 = port.parse().map_err(|_| invalid())?;

        Ok(Self::new(ip, transport, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_random_node_ids_differ() {
        assert_ne!(NodeId::random(), NodeId::random());
    }

    #[test]
    fn test_node_id_display_is_hex() {
        let id = NodeId::new([0xab; 32]);
        assert_eq!(id.to_string(), "ab".repeat(32));
    }

    #[test]
    fn test_peer_id_is_stable_per_key() {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        bytes[1] = 7;
        let key = PublicKey::new(bytes);
        assert_eq!(PeerId::from_public_key(&key), PeerId::from_public_key(&key));

        bytes[1] = 8;
        let other = PublicKey::new(bytes);
        assert_ne!(PeerId::from_public_key(&key), PeerId::from_public_key(&other));
    }

    #[test]
    fn test_address_display() {
        let v4 = PeerAddress::udp(Ipv4Addr::new(10, 0, 0, 1), 9000);
        assert_eq!(v4.to_string(), "/ip4/10.0.0.1/udp/9000");

        let v6 = PeerAddress::tcp(Ipv6Addr::LOCALHOST, 30303);
        assert_eq!(v6.to_string(), "/ip6/::1/tcp/30303");
    }

    #[test]
    fn test_address_parse() {
        let addr: PeerAddress = "/ip4/0.0.0.0/udp/9000".parse().unwrap();
        assert!(addr.is_udp());
        assert_eq!(addr.port, 9000);
        assert_eq!(addr.ip, IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let addr: PeerAddress = "/ip6/::1/tcp/30303".parse().unwrap();
        assert_eq!(addr.transport, Transport::Tcp);
    }

    #[test]
    fn test_address_parse_rejects_garbage() {
        for input in [
            "",
            "ip4/1.2.3.4/udp/1",
            "/ip4/1.2.3.4/udp",
            "/ip5/1.2.3.4/udp/1",
            "/ip4/::1/udp/1",
            "/ip4/1.2.3.4/quic/1",
            "/ip4/1.2.3.4/udp/70000",
        ] {
            assert!(
                matches!(input.parse::<PeerAddress>(), Err(DiscoveryError::InvalidInput(_))),
                "accepted {input:?}"
            );
        }
    }
}
