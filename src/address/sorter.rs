//! Canonical signer ordering
//!
//! Addresses are ordered by the bytes of their Base58Check *string* form.
//! Multisig commitments and key signature indices are built on this order,
//! so sorting by the binary form instead breaks wire compatibility.

use super::Address;

/// Return a copy of `addresses` in canonical order
pub fn sort_addresses(addresses: &[Address]) -> Vec<Address> {
    let mut sorted = addresses.to_vec();
    // String comparison here, not binary
    sorted.sort_by_cached_key(|address| address.to_b58());
    sorted
}

/// Whether `addresses` is already in canonical order
pub fn is_canonical(addresses: &[Address]) -> bool {
    addresses
        .windows(2)
        .all(|pair| pair[0].to_b58() <= pair[1].to_b58())
}
