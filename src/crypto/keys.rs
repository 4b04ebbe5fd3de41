//! Ed25519 key management
//!
//! Provides key pair generation, signing, and verification using
//! Ed25519, the key family behind ed25519 addresses.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::address::{Address, KeyType, NetType};

pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;
const SEED_LEN: usize = 32;

/// Errors that can occur during key operations
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid key length: expected {expected}, found {found}")]
    InvalidKeyLength { expected: usize, found: usize },
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// An Ed25519 key pair
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create a key pair from a 32-byte seed
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Create a key pair from a hex-encoded seed
    pub fn from_seed_hex(hex_seed: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_seed.trim())?;
        let seed: [u8; SEED_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| KeyError::InvalidKeyLength {
                    expected: SEED_LEN,
                    found: bytes.len(),
                })?;
        Ok(Self::from_seed(&seed))
    }

    /// Get the seed as a hex string
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Raw 32-byte public key
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.signing_key.verifying_key().to_bytes().to_vec()
    }

    /// The ed25519 address for this key on the given network
    pub fn address(&self, net_type: NetType) -> Address {
        Address::from_parts(net_type, KeyType::Ed25519, self.public_key_bytes())
    }

    /// Sign a message, returning the 64-byte signature
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }

    /// Verify a signature against this key pair's public key
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        verify_signature(&self.public_key_bytes(), message, signature)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}

/// Verify an Ed25519 signature
///
/// Malformed key or signature lengths are errors; a well-formed signature
/// that does not verify is `Ok(false)`.
pub fn verify_signature(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool, KeyError> {
    let pk: [u8; PUBLIC_KEY_LEN] =
        public_key
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_LEN,
                found: public_key.len(),
            })?;
    let sig: [u8; SIGNATURE_LEN] =
        signature
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength {
                expected: SIGNATURE_LEN,
                found: signature.len(),
            })?;

    let verifying_key = VerifyingKey::from_bytes(&pk).map_err(|_| KeyError::InvalidPublicKey)?;
    let sig = Signature::from_bytes(&sig);

    match verifying_key.verify(message, &sig) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_generation() {
        let kp = KeyPair::generate();
        assert_eq!(kp.public_key_bytes().len(), PUBLIC_KEY_LEN);
        assert_eq!(kp.seed_hex().len(), 64);
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = KeyPair::generate();
        let message = b"Hello, hotspot!";

        let signature = kp.sign(message);
        assert_eq!(signature.len(), SIGNATURE_LEN);
        assert!(kp.verify(message, &signature).unwrap());
        assert!(!kp.verify(b"Hello, hotspot?", &signature).unwrap());
    }

    #[test]
    fn test_key_pair_from_hex() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::from_seed_hex(&kp1.seed_hex()).unwrap();
        assert_eq!(kp1.public_key_bytes(), kp2.public_key_bytes());
        assert_eq!(kp1.address(NetType::Mainnet), kp2.address(NetType::Mainnet));
    }

    #[test]
    fn test_bad_seed_hex() {
        assert!(matches!(
            KeyPair::from_seed_hex("abcd"),
            Err(KeyError::InvalidKeyLength { expected: 32, found: 2 })
        ));
        assert!(matches!(KeyPair::from_seed_hex("zz"), Err(KeyError::Hex(_))));
    }

    #[test]
    fn test_address_format() {
        let kp = KeyPair::from_seed(&[7u8; 32]);
        let address = kp.address(NetType::Mainnet);
        assert_eq!(address.key_type(), KeyType::Ed25519);
        assert_eq!(address.public_key(), kp.public_key_bytes().as_slice());
        // Version 0 addresses start with 1
        assert!(address.to_b58().starts_with('1'));
    }

    #[test]
    fn test_verify_rejects_bad_lengths() {
        let kp = KeyPair::generate();
        let signature = kp.sign(b"msg");
        assert!(verify_signature(&[0u8; 31], b"msg", &signature).is_err());
        assert!(verify_signature(&kp.public_key_bytes(), b"msg", &signature[..63]).is_err());
    }
}
