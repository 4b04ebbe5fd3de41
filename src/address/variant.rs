//! Plain and multisig addresses behind one interface

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::address::split_tag;
use super::{Address, AddressError, KeyType, NetType};
use crate::crypto::base58;
use crate::multisig::{MultisigAddress, MultisigError};

/// Capability shared by every address form
pub trait Addressable {
    fn version(&self) -> u8;
    fn net_type(&self) -> NetType;
    fn key_type(&self) -> KeyType;
    fn public_key(&self) -> &[u8];
    fn to_bin(&self) -> Vec<u8>;

    fn to_b58(&self) -> String {
        base58::encode(self.version(), &self.to_bin())
    }
}

impl Addressable for Address {
    fn version(&self) -> u8 {
        Address::version(self)
    }

    fn net_type(&self) -> NetType {
        Address::net_type(self)
    }

    fn key_type(&self) -> KeyType {
        Address::key_type(self)
    }

    fn public_key(&self) -> &[u8] {
        Address::public_key(self)
    }

    fn to_bin(&self) -> Vec<u8> {
        Address::to_bin(self)
    }
}

impl Addressable for MultisigAddress {
    fn version(&self) -> u8 {
        MultisigAddress::version(self)
    }

    fn net_type(&self) -> NetType {
        MultisigAddress::net_type(self)
    }

    fn key_type(&self) -> KeyType {
        MultisigAddress::key_type(self)
    }

    fn public_key(&self) -> &[u8] {
        MultisigAddress::public_key(self)
    }

    fn to_bin(&self) -> Vec<u8> {
        MultisigAddress::to_bin(self)
    }
}

/// Any address, dispatched on its key type tag
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddressVariant {
    Plain(Address),
    Multisig(MultisigAddress),
}

impl AddressVariant {
    /// Decode a Base58Check string into the matching variant
    pub fn from_b58(s: &str) -> Result<Self, MultisigError> {
        let payload = base58::decode(s).map_err(AddressError::from)?;
        if Self::is_multisig_tag(&payload)? {
            Ok(AddressVariant::Multisig(MultisigAddress::from_b58(s)?))
        } else {
            Ok(AddressVariant::Plain(Address::from_b58(s)?))
        }
    }

    /// Decode a binary address into the matching variant
    pub fn from_bin(bytes: &[u8]) -> Result<Self, MultisigError> {
        if Self::is_multisig_tag(bytes)? {
            Ok(AddressVariant::Multisig(MultisigAddress::from_bin(bytes)?))
        } else {
            Ok(AddressVariant::Plain(Address::from_bin(bytes)?))
        }
    }

    pub fn is_valid(s: &str) -> bool {
        Self::from_b58(s).is_ok()
    }

    pub fn is_multisig(&self) -> bool {
        matches!(self, AddressVariant::Multisig(_))
    }

    fn is_multisig_tag(bytes: &[u8]) -> Result<bool, MultisigError> {
        let tag = bytes
            .first()
            .ok_or_else(|| AddressError::MalformedBinary("empty address".to_string()))?;
        let (_, key_type) = split_tag(*tag)?;
        Ok(key_type == KeyType::Multisig)
    }

    fn inner(&self) -> &dyn Addressable {
        match self {
            AddressVariant::Plain(address) => address,
            AddressVariant::Multisig(address) => address,
        }
    }
}

impl Addressable for AddressVariant {
    fn version(&self) -> u8 {
        self.inner().version()
    }

    fn net_type(&self) -> NetType {
        self.inner().net_type()
    }

    fn key_type(&self) -> KeyType {
        self.inner().key_type()
    }

    fn public_key(&self) -> &[u8] {
        self.inner().public_key()
    }

    fn to_bin(&self) -> Vec<u8> {
        self.inner().to_bin()
    }
}

impl From<Address> for AddressVariant {
    fn from(address: Address) -> Self {
        AddressVariant::Plain(address)
    }
}

impl From<MultisigAddress> for AddressVariant {
    fn from(address: MultisigAddress) -> Self {
        AddressVariant::Multisig(address)
    }
}

impl fmt::Display for AddressVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Addressable::to_b58(self))
    }
}

impl Serialize for AddressVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&Addressable::to_b58(self))
    }
}

impl<'de> Deserialize<'de> for AddressVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_b58(&s).map_err(de::Error::custom)
    }
}
