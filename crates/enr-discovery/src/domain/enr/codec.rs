//! Binary and text encoding of node records.
//!
//! # Layout
//!
//! ```text
//! seq        u64 BE     8 bytes
//! pubkey                33 bytes
//! signature             64 bytes
//! count      u8         1 byte
//! entries    count x (tag u8, value)
//! ```
//!
//! | tag  | key    | value    |
//! |------|--------|----------|
//! | 0x01 | `ip`   | 4 bytes  |
//! | 0x02 | `ip6`  | 16 bytes |
//! | 0x03 | `udp`  | u16 BE   |
//! | 0x04 | `tcp`  | u16 BE   |
//! | 0x05 | `udp6` | u16 BE   |
//! | 0x06 | `tcp6` | u16 BE   |
//!
//! Text form is `enr:` followed by the lowercase hex of the binary form.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::config::EnrConfig;
use super::record::NodeRecord;
use super::security::{PublicKey, Signature};
use crate::domain::errors::DecodeError;

/// Prefix of the text form.
pub const TEXT_PREFIX: &str = "enr:";

const TAG_IP: u8 = 0x01;
const TAG_IP6: u8 = 0x02;
const TAG_UDP: u8 = 0x03;
const TAG_TCP: u8 = 0x04;
const TAG_UDP6: u8 = 0x05;
const TAG_TCP6: u8 = 0x06;

/// Encode a record to its binary form.
pub fn encode(record: &NodeRecord) -> Vec<u8> {
    let mut entries: Vec<(u8, Vec<u8>)> = Vec::new();
    if let Some(ip) = record.ip {
        entries.push((TAG_IP, ip.octets().to_vec()));
    }
    if let Some(ip6) = record.ip6 {
        entries.push((TAG_IP6, ip6.octets().to_vec()));
    }
    for (tag, port) in [
        (TAG_UDP, record.udp),
        (TAG_TCP, record.tcp),
        (TAG_UDP6, record.udp6),
        (TAG_TCP6, record.tcp6),
    ] {
        if let Some(port) = port {
            entries.push((tag, port.to_be_bytes().to_vec()));
        }
    }

    let mut out = Vec::with_capacity(8 + 33 + 64 + 1 + entries.len() * 17);
    out.extend_from_slice(&record.seq.to_be_bytes());
    out.extend_from_slice(record.pubkey.as_bytes());
    out.extend_from_slice(record.signature.as_bytes());
    out.push(entries.len() as u8);
    for (tag, value) in entries {
        out.push(tag);
        out.extend_from_slice(&value);
    }
    out
}

/// Encode a record to its `enr:` text form.
pub fn encode_text(record: &NodeRecord) -> String {
    format!("{}{}", TEXT_PREFIX, hex::encode(encode(record)))
}

/// Decode the `enr:` text form.
pub fn decode_text(text: &str, config: &EnrConfig) -> Result<NodeRecord, DecodeError> {
    let body = text
        .trim()
        .strip_prefix(TEXT_PREFIX)
        .ok_or(DecodeError::MissingPrefix)?;

    // Reject before allocating for oversized input.
    if body.len() / 2 > config.max_record_size {
        return Err(DecodeError::TooLarge {
            size: body.len() / 2,
            max: config.max_record_size,
        });
    }

    let bytes = hex::decode(body).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
    decode(&bytes, config)
}

/// Decode the binary form.
pub fn decode(bytes: &[u8], config: &EnrConfig) -> Result<NodeRecord, DecodeError> {
    if bytes.len() > config.max_record_size {
        return Err(DecodeError::TooLarge {
            size: bytes.len(),
            max: config.max_record_size,
        });
    }

    let mut reader = Reader { bytes, pos: 0 };

    let seq = u64::from_be_bytes(reader.array::<8>("seq")?);
    let pubkey = PublicKey::new(reader.array::<33>("pubkey")?);
    if !pubkey.is_compressed() {
        return Err(DecodeError::InvalidPublicKey(pubkey.0[0]));
    }
    let signature = Signature::new(reader.array::<64>("signature")?);

    let mut record = NodeRecord::new(seq, pubkey).with_signature(signature);

    let count = reader.array::<1>("entry count")?[0];
    for _ in 0..count {
        let tag = reader.array::<1>("entry tag")?[0];
        match tag {
            TAG_IP => {
                let ip = Ipv4Addr::from(reader.array::<4>("ip")?);
                set_once(&mut record.ip, ip, "ip")?;
            }
            TAG_IP6 => {
                let ip6 = Ipv6Addr::from(reader.array::<16>("ip6")?);
                set_once(&mut record.ip6, ip6, "ip6")?;
            }
            TAG_UDP => set_once(&mut record.udp, reader.port("udp")?, "udp")?,
            TAG_TCP => set_once(&mut record.tcp, reader.port("tcp")?, "tcp")?,
            TAG_UDP6 => set_once(&mut record.udp6, reader.port("udp6")?, "udp6")?,
            TAG_TCP6 => set_once(&mut record.tcp6, reader.port("tcp6")?, "tcp6")?,
            other => return Err(DecodeError::UnknownKey(other)),
        }
    }

    let remaining = reader.remaining();
    if remaining > 0 {
        return Err(DecodeError::TrailingBytes(remaining));
    }

    Ok(record)
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &'static str) -> Result<(), DecodeError> {
    if slot.is_some() {
        return Err(DecodeError::DuplicateKey(key));
    }
    *slot = Some(value);
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let end = self.pos + N;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(DecodeError::Truncated(field))?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.pos = end;
        Ok(out)
    }

    fn port(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.array::<2>(field)?))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}
