//! Multi-signature addresses and signatures
//!
//! Provides M-of-N threshold addresses committing to a set of signers, and
//! the aggregate signature format carrying their individual signatures.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use helium_address::address::NetType;
//! use helium_address::crypto::KeyPair;
//! use helium_address::multisig::{MultisigAddress, MultisigSignature};
//!
//! let keys: Vec<KeyPair> = (1..=3u8).map(|i| KeyPair::from_seed(&[i; 32])).collect();
//! let signers: Vec<_> = keys.iter().map(|k| k.address(NetType::Mainnet)).collect();
//!
//! // A 2-of-3 group
//! let multi = MultisigAddress::create(&signers, 2, NetType::Mainnet).unwrap();
//!
//! // Two members sign
//! let message = b"transfer";
//! let signatures: HashMap<_, _> = keys[..2]
//!     .iter()
//!     .map(|k| (k.address(NetType::Mainnet), k.sign(message)))
//!     .collect();
//!
//! let sig = MultisigSignature::create(&multi, &signers, &signatures).unwrap();
//! let wire = sig.sign(message).unwrap();
//!
//! let decoded = MultisigSignature::from_bin(&multi, &wire).unwrap();
//! assert_eq!(decoded.verify(message), 2);
//! ```

pub mod address;
pub mod key_signature;
pub mod signature;

pub use address::{MultisigAddress, MultisigError};
pub use key_signature::KeySignature;
pub use signature::MultisigSignature;
