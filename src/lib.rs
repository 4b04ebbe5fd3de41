//! Helium Address: account identifiers and threshold signatures in Rust
//!
//! This crate provides the consensus-relevant address formats of a
//! proof-of-coverage ledger:
//! - Base58Check encoding with double-SHA256 checksums
//! - Versioned, typed addresses (net type + key type tag byte)
//! - Canonical signer ordering
//! - M-of-N multisig addresses committing to a sorted signer set
//! - Multisig signatures with canonical binary encoding and ed25519 verification
//!
//! # Example
//!
//! ```rust
//! use helium_address::address::{Address, NetType};
//! use helium_address::multisig::MultisigAddress;
//!
//! let a = Address::from_b58("13M8dUbxymE3xtiAXszRkGMmezMhBS8Li7wEsMojLdb4Sdxc4wc").unwrap();
//! let b = Address::from_b58("148d8KTRcKA5JKPekBcKFd4KfvprvFRpjGtivhtmRmnZ8MFYnP3").unwrap();
//!
//! let multi = MultisigAddress::create(&[a, b], 2, NetType::Mainnet).unwrap();
//! assert_eq!(
//!     multi.to_b58(),
//!     "1SYJnDnV2G1HSzoBF9nwd5apBX3pS7nLeLkjnVXemBZTP8C8F44TBYnr"
//! );
//! ```

pub mod address;
pub mod cli;
pub mod crypto;
pub mod multisig;

// Re-export commonly used types
pub use address::{
    sort_addresses, Address, AddressError, AddressVariant, Addressable, KeyType, NetType,
};
pub use crypto::{Base58Error, KeyPair};
pub use multisig::{KeySignature, MultisigAddress, MultisigError, MultisigSignature};
