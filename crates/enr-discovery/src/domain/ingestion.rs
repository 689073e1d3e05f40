//! Record translation rules.
//!
//! Two strictness levels exist for the same condition:
//! - discovery results without a UDP endpoint are skipped quietly
//! - records we were told to trust must have one, or they are refused

use super::enr::NodeRecord;
use super::entities::DiscoveredPeer;
use super::errors::DiscoveryError;

/// Translate a record into a dialable peer.
///
/// Returns `None` when the record declares no UDP endpoint on either
/// address family.
pub fn translate(record: &NodeRecord) -> Option<DiscoveredPeer> {
    let udp = record.udp_endpoint()?;

    let addresses = match record.tcp_endpoint() {
        Some(tcp) => vec![udp, tcp],
        None => vec![udp],
    };

    Some(DiscoveredPeer {
        peer_id: record.peer_id(),
        addresses,
    })
}

/// Refuse a record that cannot be dialed over UDP.
pub fn require_udp_endpoint(record: &NodeRecord) -> Result<(), DiscoveryError> {
    if record.udp_endpoint().is_none() {
        return Err(DiscoveryError::InvalidInput(format!(
            "record {} has no UDP endpoint over IPv4 or IPv6",
            record.node_id()
        )));
    }
    Ok(())
}
