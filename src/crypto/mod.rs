//! Cryptographic utilities for addresses and multisig
//!
//! This module provides:
//! - SHA-256 hashing and pluggable hash backends
//! - Base58Check encoding
//! - Ed25519 key management

pub mod base58;
pub mod hash;
pub mod keys;

pub use base58::Base58Error;
pub use hash::{
    double_sha256, multihash_sha256, sha256, sha256_hex, AsyncHashFunction, HashFunction,
    Sha256Hash,
};
pub use keys::{verify_signature, KeyError, KeyPair};
