//! Hashing utilities for addresses and multisig commitments
//!
//! Provides the SHA-256 helpers used by the Base58Check checksum and the
//! pluggable hash function interface used to derive multisig commitments.

use futures::future::{BoxFuture, FutureExt};
use sha2::{Digest, Sha256};

/// Multihash code for sha2-256
pub const MULTIHASH_SHA2_256: u8 = 0x12;

/// Length of a SHA-256 digest in bytes
pub const SHA256_LEN: usize = 32;

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes double SHA-256 hash (SHA-256 of SHA-256)
/// Used for Base58Check checksums
pub fn double_sha256(data: &[u8]) -> Vec<u8> {
    sha256(&sha256(data))
}

/// Computes SHA-256 hash and returns it as a hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Wraps a sha2-256 digest in its multihash envelope: `0x12 ‖ len ‖ digest`
pub fn multihash_sha256(digest: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(digest.len() + 2);
    out.push(MULTIHASH_SHA2_256);
    out.push(digest.len() as u8);
    out.extend_from_slice(digest);
    out
}

/// A synchronous hash backend producing a 32-byte SHA-256 digest
pub trait HashFunction {
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// A hash backend that may complete asynchronously (e.g. platform crypto APIs)
///
/// Every [`HashFunction`] is also an `AsyncHashFunction` resolving immediately.
pub trait AsyncHashFunction {
    fn digest_async<'a>(&'a self, data: &'a [u8]) -> BoxFuture<'a, Vec<u8>>;
}

impl<H: HashFunction + Sync> AsyncHashFunction for H {
    fn digest_async<'a>(&'a self, data: &'a [u8]) -> BoxFuture<'a, Vec<u8>> {
        let digest = self.digest(data);
        futures::future::ready(digest).boxed()
    }
}

/// Default backend built on the `sha2` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        sha256(data)
    }
}
