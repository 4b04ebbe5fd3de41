//! Versioned, typed account addresses
//!
//! Binary form is one tag byte (`net_type | key_type`) followed by the raw
//! public key. The string form is the Base58Check encoding of the binary form
//! under version 0.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::crypto::base58::{self, Base58Error};

/// The only supported address version
pub const ADDRESS_VERSION: u8 = 0;

const NET_TYPE_MASK: u8 = 0xF0;
const KEY_TYPE_MASK: u8 = 0x0F;

/// Address construction and decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Unsupported address version: {0}")]
    UnsupportedVersion(u8),
    #[error("Unsupported net type: {0:#04x}")]
    UnsupportedNetType(u8),
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(u8),
    #[error("Malformed address binary: {0}")]
    MalformedBinary(String),
    #[error("Base58 error: {0}")]
    Codec(#[from] Base58Error),
}

/// Network an address belongs to (high nibble of the tag byte)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetType {
    Mainnet = 0x00,
    Testnet = 0x10,
}

impl NetType {
    pub fn is_supported(value: u8) -> bool {
        Self::try_from(value).is_ok()
    }
}

impl TryFrom<u8> for NetType {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(NetType::Mainnet),
            0x10 => Ok(NetType::Testnet),
            other => Err(AddressError::UnsupportedNetType(other)),
        }
    }
}

impl fmt::Display for NetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetType::Mainnet => write!(f, "mainnet"),
            NetType::Testnet => write!(f, "testnet"),
        }
    }
}

/// Cryptographic key family of an address (low nibble of the tag byte)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    EccCompact = 0,
    Ed25519 = 1,
    Multisig = 2,
    Secp256k1 = 3,
    Rsa = 4,
}

impl KeyType {
    pub fn is_supported(value: u8) -> bool {
        Self::try_from(value).is_ok()
    }
}

impl TryFrom<u8> for KeyType {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyType::EccCompact),
            1 => Ok(KeyType::Ed25519),
            2 => Ok(KeyType::Multisig),
            3 => Ok(KeyType::Secp256k1),
            4 => Ok(KeyType::Rsa),
            other => Err(AddressError::UnsupportedKeyType(other)),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::EccCompact => "ecc_compact",
            KeyType::Ed25519 => "ed25519",
            KeyType::Multisig => "multisig",
            KeyType::Secp256k1 => "secp256k1",
            KeyType::Rsa => "rsa",
        };
        f.write_str(name)
    }
}

/// Split a tag byte into its net type and key type nibbles
pub(crate) fn split_tag(tag: u8) -> Result<(NetType, KeyType), AddressError> {
    let net_type = NetType::try_from(tag & NET_TYPE_MASK)?;
    let key_type = KeyType::try_from(tag & KEY_TYPE_MASK)?;
    Ok((net_type, key_type))
}

pub(crate) fn check_version(version: u8) -> Result<(), AddressError> {
    if version != ADDRESS_VERSION {
        return Err(AddressError::UnsupportedVersion(version));
    }
    Ok(())
}

/// A plain account address
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    version: u8,
    net_type: NetType,
    key_type: KeyType,
    public_key: Vec<u8>,
}

impl Address {
    /// Create an address from raw tag values, validating each
    pub fn new(
        version: u8,
        net_type: u8,
        key_type: u8,
        public_key: Vec<u8>,
    ) -> Result<Self, AddressError> {
        check_version(version)?;
        let net_type = NetType::try_from(net_type)?;
        let key_type = KeyType::try_from(key_type)?;
        Ok(Self::from_parts(net_type, key_type, public_key))
    }

    /// Create a version 0 address from already-typed parts
    pub fn from_parts(net_type: NetType, key_type: KeyType, public_key: Vec<u8>) -> Self {
        Self {
            version: ADDRESS_VERSION,
            net_type,
            key_type,
            public_key,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn net_type(&self) -> NetType {
        self.net_type
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Binary form: `[net_type | key_type] ‖ public_key`
    pub fn to_bin(&self) -> Vec<u8> {
        let mut bin = Vec::with_capacity(1 + self.public_key.len());
        bin.push(self.net_type as u8 | self.key_type as u8);
        bin.extend_from_slice(&self.public_key);
        bin
    }

    /// Base58Check string form
    pub fn to_b58(&self) -> String {
        base58::encode(self.version, &self.to_bin())
    }

    /// Decode a Base58Check address string
    pub fn from_b58(s: &str) -> Result<Self, AddressError> {
        let version = base58::version(s)?;
        let payload = base58::decode(s)?;
        Self::parse(version, &payload)
    }

    /// Decode a binary address (version 0 assumed)
    pub fn from_bin(bytes: &[u8]) -> Result<Self, AddressError> {
        Self::parse(ADDRESS_VERSION, bytes)
    }

    /// Whether `s` decodes to a supported address
    pub fn is_valid(s: &str) -> bool {
        Self::from_b58(s).is_ok()
    }

    fn parse(version: u8, bytes: &[u8]) -> Result<Self, AddressError> {
        let (&tag, public_key) = bytes
            .split_first()
            .ok_or_else(|| AddressError::MalformedBinary("empty address".to_string()))?;
        Self::new(
            version,
            tag & NET_TYPE_MASK,
            tag & KEY_TYPE_MASK,
            public_key.to_vec(),
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_b58())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_b58(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_b58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_b58(&s).map_err(de::Error::custom)
    }
}
