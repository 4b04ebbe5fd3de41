//! Multisig commitment addresses
//!
//! A multisig address commits to a set of plain signer addresses:
//!
//! ```text
//! public_key = multihash(sha256(concat(child.to_bin() for child in canonical order)))
//! bin        = [net_type | multisig] ‖ [M] ‖ [N] ‖ public_key
//! ```
//!
//! The commitment does not depend on M, so the same group at different
//! thresholds shares a public key but not a binary or string form.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::address::address::{check_version, split_tag};
use crate::address::{sort_addresses, Address, AddressError, KeyType, NetType, ADDRESS_VERSION};
use crate::crypto::base58;
use crate::crypto::hash::{
    multihash_sha256, AsyncHashFunction, HashFunction, Sha256Hash, MULTIHASH_SHA2_256, SHA256_LEN,
};

/// Length of the multihash-wrapped commitment
pub const COMMITMENT_LEN: usize = SHA256_LEN + 2;

const MULTISIG_BIN_LEN: usize = 3 + COMMITMENT_LEN;

/// Errors related to multisig operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultisigError {
    #[error("Invalid child key type: multisig addresses cannot be nested")]
    InvalidChildKeyType,
    #[error("Invalid threshold: {m}-of-{n}")]
    InvalidThreshold { m: usize, n: usize },
    #[error("Insufficient signatures: have {have}, need {need}")]
    InsufficientSignatures { have: usize, need: u8 },
    #[error("Wrong address count: expected {expected}, got {actual}")]
    WrongAddressCount { expected: u8, actual: usize },
    #[error("No valid signatures")]
    NoValidSignatures,
    #[error("Signer not in address set: {0}")]
    UnknownSigner(String),
    #[error("Signer index out of range: {0}")]
    IndexOutOfRange(usize),
    #[error("Signature too long: {0} bytes")]
    SignatureTooLong(usize),
    #[error("Invalid commitment digest length: {0} bytes")]
    InvalidDigestLength(usize),
    #[error("Malformed multisig binary: {0}")]
    MalformedBinary(String),
    #[error("Address error: {0}")]
    Address(#[from] AddressError),
}

/// An M-of-N multisig address
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultisigAddress {
    version: u8,
    net_type: NetType,
    m: u8,
    n: u8,
    public_key: Vec<u8>,
}

impl MultisigAddress {
    /// Create a multisig address from its fields
    ///
    /// Enforces `M <= N` and a multihash-wrapped sha256 commitment.
    pub fn new(
        version: u8,
        net_type: NetType,
        m: u8,
        n: u8,
        public_key: Vec<u8>,
    ) -> Result<Self, MultisigError> {
        check_version(version)?;
        if m > n {
            return Err(MultisigError::InvalidThreshold {
                m: m as usize,
                n: n as usize,
            });
        }
        if public_key.len() != COMMITMENT_LEN
            || public_key[0] != MULTIHASH_SHA2_256
            || public_key[1] as usize != SHA256_LEN
        {
            return Err(MultisigError::MalformedBinary(format!(
                "commitment is not a sha2-256 multihash: {}",
                hex::encode(&public_key)
            )));
        }

        Ok(Self {
            version,
            net_type,
            m,
            n,
            public_key,
        })
    }

    /// Derive the multisig address for `addresses` with threshold `m`
    pub fn create(
        addresses: &[Address],
        m: u8,
        net_type: NetType,
    ) -> Result<Self, MultisigError> {
        Self::create_with(&Sha256Hash, addresses, m, net_type)
    }

    /// Derive the multisig address using a caller-supplied hash backend
    pub fn create_with<H: HashFunction>(
        hasher: &H,
        addresses: &[Address],
        m: u8,
        net_type: NetType,
    ) -> Result<Self, MultisigError> {
        let digest_input = Self::digest_input(addresses)?;
        Self::from_digest(hasher.digest(&digest_input), addresses.len(), m, net_type)
    }

    /// Derive the multisig address using an asynchronous hash backend
    pub async fn create_async<H: AsyncHashFunction>(
        hasher: &H,
        addresses: &[Address],
        m: u8,
        net_type: NetType,
    ) -> Result<Self, MultisigError> {
        let digest_input = Self::digest_input(addresses)?;
        let digest = hasher.digest_async(&digest_input).await;
        Self::from_digest(digest, addresses.len(), m, net_type)
    }

    /// Whether `addresses` is the signer set this address commits to
    pub fn commits_to(&self, addresses: &[Address]) -> bool {
        if addresses.len() != self.n as usize {
            return false;
        }
        match Self::create(addresses, self.m, self.net_type) {
            Ok(candidate) => candidate.public_key == self.public_key,
            Err(_) => false,
        }
    }

    fn digest_input(addresses: &[Address]) -> Result<Vec<u8>, MultisigError> {
        if addresses.iter().any(|a| a.key_type() == KeyType::Multisig) {
            return Err(MultisigError::InvalidChildKeyType);
        }

        let sorted = sort_addresses(addresses);
        Ok(sorted.iter().flat_map(|a| a.to_bin()).collect())
    }

    fn from_digest(
        digest: Vec<u8>,
        count: usize,
        m: u8,
        net_type: NetType,
    ) -> Result<Self, MultisigError> {
        if digest.len() != SHA256_LEN {
            return Err(MultisigError::InvalidDigestLength(digest.len()));
        }
        let n = u8::try_from(count).map_err(|_| MultisigError::InvalidThreshold {
            m: m as usize,
            n: count,
        })?;

        let address = Self::new(ADDRESS_VERSION, net_type, m, n, multihash_sha256(&digest))?;
        log::debug!(
            "Derived {} multisig address {}",
            address.description(),
            address
        );
        Ok(address)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn net_type(&self) -> NetType {
        self.net_type
    }

    pub fn key_type(&self) -> KeyType {
        KeyType::Multisig
    }

    /// The multihash commitment over the signer set
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Required signatures (M)
    pub fn threshold(&self) -> u8 {
        self.m
    }

    /// Total signers (N)
    pub fn signer_count(&self) -> u8 {
        self.n
    }

    /// Human-readable description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.m, self.n)
    }

    /// Binary form: `[net_type | multisig] ‖ [M] ‖ [N] ‖ public_key`
    pub fn to_bin(&self) -> Vec<u8> {
        let mut bin = Vec::with_capacity(MULTISIG_BIN_LEN);
        bin.push(self.net_type as u8 | KeyType::Multisig as u8);
        bin.push(self.m);
        bin.push(self.n);
        bin.extend_from_slice(&self.public_key);
        bin
    }

    pub fn to_b58(&self) -> String {
        base58::encode(self.version, &self.to_bin())
    }

    pub fn from_b58(s: &str) -> Result<Self, MultisigError> {
        let version = base58::version(s).map_err(AddressError::from)?;
        let payload = base58::decode(s).map_err(AddressError::from)?;
        Self::parse(version, &payload)
    }

    pub fn from_bin(bytes: &[u8]) -> Result<Self, MultisigError> {
        Self::parse(ADDRESS_VERSION, bytes)
    }

    pub fn is_valid(s: &str) -> bool {
        Self::from_b58(s).is_ok()
    }

    fn parse(version: u8, bytes: &[u8]) -> Result<Self, MultisigError> {
        let (&tag, rest) = bytes
            .split_first()
            .ok_or_else(|| MultisigError::MalformedBinary("empty address".to_string()))?;
        check_version(version)?;
        let (net_type, key_type) = split_tag(tag)?;
        if key_type != KeyType::Multisig {
            return Err(MultisigError::InvalidChildKeyType);
        }
        if bytes.len() != MULTISIG_BIN_LEN {
            return Err(MultisigError::MalformedBinary(format!(
                "expected {} bytes, got {}",
                MULTISIG_BIN_LEN,
                bytes.len()
            )));
        }

        Self::new(version, net_type, rest[0], rest[1], rest[2..].to_vec())
    }
}

impl fmt::Display for MultisigAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_b58())
    }
}

impl FromStr for MultisigAddress {
    type Err = MultisigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_b58(s)
    }
}

impl Serialize for MultisigAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_b58())
    }
}

impl<'de> Deserialize<'de> for MultisigAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_b58(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Base58Error;

    const ADDR_1: &str = "13M8dUbxymE3xtiAXszRkGMmezMhBS8Li7wEsMojLdb4Sdxc4wc";
    const ADDR_2: &str = "148d8KTRcKA5JKPekBcKFd4KfvprvFRpjGtivhtmRmnZ8MFYnP3";
    const ECC_1: &str = "11MJXxoWFp2bMsqKM6QZin6ync9DQ3fjjFjUrFiRCaKunmBEBhK";
    const ECC_2: &str = "11x7jP9yAnyk5jeYywmsYDFdYq5xvKLKjP2zjhGzCwDSQtxcUDt";

    const MULTI_2_OF_2: &str = "1SYJnDnV2G1HSzoBF9nwd5apBX3pS7nLeLkjnVXemBZTP8C8F44TBYnr";
    const MULTI_1_OF_2: &str = "1SVRdbavwiw4SM6cQFq6DN2nhK4YSqTd7cPhELjshVxzdQvoKbhQWocF";
    const MULTI_ECC_1_OF_2: &str = "1SVRdbaAev7zSpUsMjvQrbRBGFHLXEa63SGntYCqChC4CTpqwftTPGbZ";

    fn addr(s: &str) -> Address {
        Address::from_b58(s).unwrap()
    }

    /// A hash backend that returns a fixed digest regardless of input
    struct FixedHash(Vec<u8>);

    impl HashFunction for FixedHash {
        fn digest(&self, _data: &[u8]) -> Vec<u8> {
            self.0.clone()
        }
    }

    #[test]
    fn test_golden_vectors() {
        let a1 = addr(ADDR_1);
        let a2 = addr(ADDR_2);

        let two = MultisigAddress::create(&[a1.clone(), a2.clone()], 2, NetType::Mainnet).unwrap();
        assert_eq!(two.to_b58(), MULTI_2_OF_2);

        let one = MultisigAddress::create(&[a1, a2], 1, NetType::Mainnet).unwrap();
        assert_eq!(one.to_b58(), MULTI_1_OF_2);

        let ecc = MultisigAddress::create(&[addr(ECC_1), addr(ECC_2)], 1, NetType::Mainnet)
            .unwrap();
        assert_eq!(ecc.to_b58(), MULTI_ECC_1_OF_2);
    }

    #[test]
    fn test_commitment_layout() {
        let multi = MultisigAddress::create(&[addr(ADDR_1), addr(ADDR_2)], 2, NetType::Mainnet)
            .unwrap();
        let bin = multi.to_bin();
        assert_eq!(bin.len(), 37);
        assert_eq!(&bin[..5], &[0x02, 2, 2, 0x12, 0x20]);
        assert_eq!(
            hex::encode(&multi.public_key()[2..]),
            "6aab329b08eee88352ab1bb567a6aae04fec08a30721aaa74d01d5834006b91d"
        );
        assert_eq!(multi.description(), "2-of-2");
    }

    #[test]
    fn test_order_independence() {
        let a1 = addr(ADDR_1);
        let a2 = addr(ADDR_2);
        let forward = MultisigAddress::create(&[a1.clone(), a2.clone()], 1, NetType::Mainnet)
            .unwrap();
        let reverse = MultisigAddress::create(&[a2, a1], 1, NetType::Mainnet).unwrap();
        assert_eq!(forward.to_b58(), reverse.to_b58());
    }

    #[test]
    fn test_commitment_ignores_threshold() {
        let signers = [addr(ADDR_1), addr(ADDR_2)];
        let one = MultisigAddress::create(&signers, 1, NetType::Mainnet).unwrap();
        let two = MultisigAddress::create(&signers, 2, NetType::Mainnet).unwrap();
        assert_eq!(one.public_key(), two.public_key());
        assert_ne!(one.to_bin(), two.to_bin());
    }

    #[test]
    fn test_string_order_drives_commitment() {
        let ones = Address::from_parts(NetType::Mainnet, KeyType::EccCompact, vec![1; 32]);
        let threes = Address::from_parts(NetType::Mainnet, KeyType::EccCompact, vec![3; 32]);
        let multi = MultisigAddress::create(&[ones, threes], 1, NetType::Mainnet).unwrap();
        assert_eq!(
            multi.to_b58(),
            "1SVRdbbHeTjVPedbUn81V8C2DGUUEEBGqDjcRUeRCuhw8qszP2ytrWzd"
        );
    }

    #[test]
    fn test_nested_multisig_rejected() {
        let nested = MultisigAddress::from_b58(MULTI_2_OF_2).unwrap();
        let as_plain = Address::from_b58(&nested.to_b58()).unwrap();
        assert_eq!(as_plain.key_type(), KeyType::Multisig);

        let result = MultisigAddress::create(&[as_plain, addr(ADDR_1)], 1, NetType::Mainnet);
        assert_eq!(result, Err(MultisigError::InvalidChildKeyType));
    }

    #[test]
    fn test_threshold_validation() {
        let signers = [addr(ADDR_1), addr(ADDR_2)];
        assert_eq!(
            MultisigAddress::create(&signers, 3, NetType::Mainnet),
            Err(MultisigError::InvalidThreshold { m: 3, n: 2 })
        );
        assert!(MultisigAddress::create(&signers, 0, NetType::Mainnet).is_ok());

        let too_many: Vec<Address> = (0..256u32)
            .map(|i| {
                let mut key = vec![0u8; 32];
                key[..4].copy_from_slice(&i.to_be_bytes());
                Address::from_parts(NetType::Mainnet, KeyType::Ed25519, key)
            })
            .collect();
        assert_eq!(
            MultisigAddress::create(&too_many, 1, NetType::Mainnet),
            Err(MultisigError::InvalidThreshold { m: 1, n: 256 })
        );
        assert!(MultisigAddress::create(&too_many[..255], 255, NetType::Mainnet).is_ok());
    }

    #[test]
    fn test_testnet_tag() {
        let multi = MultisigAddress::create(&[addr(ADDR_1), addr(ADDR_2)], 2, NetType::Testnet)
            .unwrap();
        assert_eq!(multi.to_bin()[0], 0x12);
        let decoded = MultisigAddress::from_b58(&multi.to_b58()).unwrap();
        assert_eq!(decoded.net_type(), NetType::Testnet);
    }

    #[test]
    fn test_from_b58_round_trip() {
        let multi = MultisigAddress::from_b58(MULTI_2_OF_2).unwrap();
        assert_eq!(multi.threshold(), 2);
        assert_eq!(multi.signer_count(), 2);
        assert_eq!(multi.key_type(), KeyType::Multisig);
        assert_eq!(multi.to_b58(), MULTI_2_OF_2);
        assert_eq!(MultisigAddress::from_bin(&multi.to_bin()).unwrap(), multi);
    }

    #[test]
    fn test_from_b58_rejects_plain_address() {
        assert_eq!(
            MultisigAddress::from_b58(ADDR_1),
            Err(MultisigError::InvalidChildKeyType)
        );
        assert!(!MultisigAddress::is_valid(ADDR_1));
        assert!(MultisigAddress::is_valid(MULTI_1_OF_2));
    }

    #[test]
    fn test_from_b58_bad_checksum() {
        let corrupted = format!("{}s", &MULTI_2_OF_2[..MULTI_2_OF_2.len() - 1]);
        assert_eq!(
            MultisigAddress::from_b58(&corrupted),
            Err(MultisigError::Address(AddressError::Codec(
                Base58Error::InvalidChecksum
            )))
        );
    }

    #[test]
    fn test_from_bin_malformed() {
        let bin = MultisigAddress::from_b58(MULTI_2_OF_2).unwrap().to_bin();
        assert!(matches!(
            MultisigAddress::from_bin(&bin[..36]),
            Err(MultisigError::MalformedBinary(_))
        ));
        assert!(matches!(
            MultisigAddress::from_bin(&[]),
            Err(MultisigError::MalformedBinary(_))
        ));

        let mut inverted = bin.clone();
        inverted[1] = 3;
        assert_eq!(
            MultisigAddress::from_bin(&inverted),
            Err(MultisigError::InvalidThreshold { m: 3, n: 2 })
        );
    }

    #[test]
    fn test_custom_hash_backend() {
        let signers = [addr(ADDR_1), addr(ADDR_2)];
        let fixed = MultisigAddress::create_with(
            &FixedHash(vec![0xAA; 32]),
            &signers,
            1,
            NetType::Mainnet,
        )
        .unwrap();
        assert_eq!(&fixed.public_key()[2..], &[0xAA; 32]);

        assert_eq!(
            MultisigAddress::create_with(&FixedHash(vec![0; 20]), &signers, 1, NetType::Mainnet),
            Err(MultisigError::InvalidDigestLength(20))
        );
    }

    #[test]
    fn test_async_create_matches_sync() {
        let signers = [addr(ADDR_1), addr(ADDR_2)];
        let multi = futures::executor::block_on(MultisigAddress::create_async(
            &Sha256Hash,
            &signers,
            2,
            NetType::Mainnet,
        ))
        .unwrap();
        assert_eq!(multi.to_b58(), MULTI_2_OF_2);
    }

    #[test]
    fn test_commits_to() {
        let a1 = addr(ADDR_1);
        let a2 = addr(ADDR_2);
        let multi = MultisigAddress::from_b58(MULTI_2_OF_2).unwrap();
        assert!(multi.commits_to(&[a2.clone(), a1.clone()]));
        assert!(!multi.commits_to(&[a1.clone()]));
        assert!(!multi.commits_to(&[a1, addr(ECC_1)]));
    }

    #[test]
    fn test_serde_as_b58_string() {
        let multi = MultisigAddress::from_b58(MULTI_1_OF_2).unwrap();
        let json = serde_json::to_string(&multi).unwrap();
        assert_eq!(json, format!("\"{}\"", MULTI_1_OF_2));
        let back: MultisigAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, multi);
    }
}
