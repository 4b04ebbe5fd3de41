//! Base58Check encoding
//!
//! `base58(version ‖ payload ‖ checksum)` where the checksum is the first four
//! bytes of `sha256(sha256(version ‖ payload))`, using the Bitcoin alphabet.

use thiserror::Error;

use super::hash::double_sha256;

const CHECKSUM_LEN: usize = 4;

/// Errors from Base58Check decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    #[error("Invalid base58 string: {0}")]
    InvalidBase58(String),
    #[error("Base58 payload too short: {0} bytes")]
    TooShort(usize),
    #[error("Invalid checksum")]
    InvalidChecksum,
}

fn checksum(versioned: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = double_sha256(versioned);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

fn decode_raw(s: &str) -> Result<Vec<u8>, Base58Error> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| Base58Error::InvalidBase58(e.to_string()))
}

/// Encode a versioned payload with a 4-byte double-SHA256 checksum
pub fn encode(version: u8, payload: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    bytes.push(version);
    bytes.extend_from_slice(payload);
    let sum = checksum(&bytes);
    bytes.extend_from_slice(&sum);
    bs58::encode(bytes).into_string()
}

/// Decode a Base58Check string, verifying the checksum
///
/// Returns the payload with both the version byte and checksum stripped.
pub fn decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    let raw = decode_raw(s)?;
    if raw.len() <= CHECKSUM_LEN {
        return Err(Base58Error::TooShort(raw.len()));
    }

    let (versioned, sum) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(versioned) != sum {
        return Err(Base58Error::InvalidChecksum);
    }

    Ok(versioned[1..].to_vec())
}

/// Read the version byte without validating the checksum
pub fn version(s: &str) -> Result<u8, Base58Error> {
    let raw = decode_raw(s)?;
    raw.first().copied().ok_or(Base58Error::TooShort(0))
}
