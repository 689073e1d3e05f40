//! Tests for Ethereum Node Records (ENR)

use super::*;
use crate::domain::{DecodeError, PeerAddress, Transport};
use std::net::{Ipv4Addr, Ipv6Addr};

fn make_pubkey(byte: u8) -> PublicKey {
    let mut key = [0u8; 33];
    key[0] = 0x02; // Compressed key prefix
    key[1] = byte;
    PublicKey::new(key)
}

fn make_record() -> NodeRecord {
    NodeRecord::new(3, make_pubkey(1))
        .with_ip(Ipv4Addr::new(192, 168, 1, 100))
        .with_udp(9000)
        .with_tcp(9001)
        .with_signature(Signature::new([7u8; 64]))
}

// =============================================================================
// TEST GROUP 1: Endpoint extraction
// =============================================================================

#[test]
fn test_udp_endpoint_requires_address_and_port() {
    let only_port = NodeRecord::new(1, make_pubkey(1)).with_udp(9000);
    assert_eq!(only_port.udp_endpoint(), None);

    let only_ip = NodeRecord::new(1, make_pubkey(1)).with_ip(Ipv4Addr::LOCALHOST);
    assert_eq!(only_ip.udp_endpoint(), None);
}

#[test]
fn test_endpoint_prefers_ipv4() {
    let record = NodeRecord::new(1, make_pubkey(1))
        .with_ip(Ipv4Addr::new(10, 0, 0, 1))
        .with_udp(9000)
        .with_ip6(Ipv6Addr::LOCALHOST)
        .with_udp6(9006);

    assert_eq!(
        record.udp_endpoint(),
        Some(PeerAddress::udp(Ipv4Addr::new(10, 0, 0, 1), 9000))
    );
}

#[test]
fn test_endpoint_falls_back_to_ipv6() {
    let record = NodeRecord::new(1, make_pubkey(1))
        .with_ip6(Ipv6Addr::LOCALHOST)
        .with_udp6(9006)
        .with_tcp6(9007);

    assert_eq!(
        record.endpoint(Transport::Udp),
        Some(PeerAddress::udp(Ipv6Addr::LOCALHOST, 9006))
    );
    assert_eq!(
        record.endpoint(Transport::Tcp),
        Some(PeerAddress::tcp(Ipv6Addr::LOCALHOST, 9007))
    );
}

#[test]
fn test_ipv4_port_does_not_pair_with_ipv6_address() {
    let record = NodeRecord::new(1, make_pubkey(1))
        .with_ip6(Ipv6Addr::LOCALHOST)
        .with_udp(9000);
    assert_eq!(record.udp_endpoint(), None);
}

// =============================================================================
// TEST GROUP 2: Identity
// =============================================================================

#[test]
fn test_node_id_depends_only_on_key() {
    let a = make_record();
    let b = NodeRecord::new(99, make_pubkey(1));
    assert_eq!(a.node_id(), b.node_id());
    assert_eq!(a.peer_id(), b.peer_id());

    let c = NodeRecord::new(3, make_pubkey(2));
    assert_ne!(a.node_id(), c.node_id());
}

// =============================================================================
// TEST GROUP 3: Codec
// =============================================================================

#[test]
fn test_text_form_round_trip() {
    let record = make_record();
    let text = record.to_text();
    assert!(text.starts_with(TEXT_PREFIX));

    let decoded: NodeRecord = text.parse().unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn test_decode_text_requires_prefix() {
    let text = make_record().to_text();
    let body = text.trim_start_matches(TEXT_PREFIX);
    assert_eq!(
        body.parse::<NodeRecord>().unwrap_err(),
        DecodeError::MissingPrefix
    );
}

#[test]
fn test_decode_text_rejects_bad_hex() {
    assert!(matches!(
        "enr:zz".parse::<NodeRecord>(),
        Err(DecodeError::InvalidHex(_))
    ));
}

#[test]
fn test_decode_rejects_truncated_input() {
    let bytes = encode(&make_record());
    let err = decode(&bytes[..50], &EnrConfig::default()).unwrap_err();
    assert_eq!(err, DecodeError::Truncated("signature"));
}

#[test]
fn test_decode_rejects_uncompressed_key() {
    let mut bytes = encode(&make_record());
    bytes[8] = 0x04;
    assert_eq!(
        decode(&bytes, &EnrConfig::default()).unwrap_err(),
        DecodeError::InvalidPublicKey(0x04)
    );
}

#[test]
fn test_decode_rejects_unknown_key() {
    let mut bytes = encode(&NodeRecord::new(1, make_pubkey(1)));
    let count_pos = bytes.len() - 1;
    bytes[count_pos] = 1;
    bytes.push(0x7f);
    assert_eq!(
        decode(&bytes, &EnrConfig::default()).unwrap_err(),
        DecodeError::UnknownKey(0x7f)
    );
}

#[test]
fn test_decode_rejects_duplicate_key() {
    let mut bytes = encode(&NodeRecord::new(1, make_pubkey(1)).with_udp(1));
    let count_pos = 8 + 33 + 64;
    bytes[count_pos] = 2;
    bytes.extend_from_slice(&[0x03, 0x00, 0x02]);
    assert_eq!(
        decode(&bytes, &EnrConfig::default()).unwrap_err(),
        DecodeError::DuplicateKey("udp")
    );
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let mut bytes = encode(&make_record());
    bytes.extend_from_slice(&[0, 0]);
    assert_eq!(
        decode(&bytes, &EnrConfig::default()).unwrap_err(),
        DecodeError::TrailingBytes(2)
    );
}

#[test]
fn test_decode_enforces_size_limit() {
    let config = EnrConfig {
        max_record_size: 64,
    };
    let text = make_record().to_text();
    assert!(matches!(
        decode_text(&text, &config),
        Err(DecodeError::TooLarge { max: 64, .. })
    ));
}

#[test]
fn test_record_input_resolution() {
    let record = make_record();
    let structured = RecordInput::from(record.clone());
    assert_eq!(structured.into_record().unwrap(), record);

    let encoded = RecordInput::from(record.to_text());
    assert_eq!(encoded.into_record().unwrap(), record);

    let broken = RecordInput::from("enr:00");
    assert!(broken.into_record().is_err());
}
