//! A single signer's contribution to a multisig signature

use std::collections::HashMap;

use crate::address::{sort_addresses, Address, KeyType};
use crate::multisig::address::MultisigError;

/// Largest signature a key signature record can carry (one length byte)
pub const MAX_SIGNATURE_LEN: usize = u8::MAX as usize;

/// A signature tagged with its signer's position in canonical order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySignature {
    index: u8,
    signature: Vec<u8>,
}

impl KeySignature {
    /// Tag `signature` with the position of `address` in `sorted_addresses`
    pub fn new(
        sorted_addresses: &[Address],
        address: &Address,
        signature: Vec<u8>,
    ) -> Result<Self, MultisigError> {
        if address.key_type() == KeyType::Multisig {
            return Err(MultisigError::InvalidChildKeyType);
        }
        if signature.len() > MAX_SIGNATURE_LEN {
            return Err(MultisigError::SignatureTooLong(signature.len()));
        }

        let position = sorted_addresses
            .iter()
            .position(|a| a == address)
            .ok_or_else(|| MultisigError::UnknownSigner(address.to_b58()))?;
        let index =
            u8::try_from(position).map_err(|_| MultisigError::IndexOutOfRange(position))?;

        Ok(Self { index, signature })
    }

    /// Build key signatures for every entry of `signatures`
    ///
    /// `addresses` is sorted canonically once; the result is ordered by index.
    pub fn from_map(
        addresses: &[Address],
        signatures: &HashMap<Address, Vec<u8>>,
    ) -> Result<Vec<Self>, MultisigError> {
        let sorted = sort_addresses(addresses);
        let mut key_signatures = signatures
            .iter()
            .map(|(address, signature)| Self::new(&sorted, address, signature.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        key_signatures.sort_by_key(|ks| ks.index);
        Ok(key_signatures)
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Binary form: `[index] ‖ [len] ‖ signature`
    pub fn to_bin(&self) -> Vec<u8> {
        let mut bin = Vec::with_capacity(2 + self.signature.len());
        bin.push(self.index);
        // Length is bounded by MAX_SIGNATURE_LEN at construction
        bin.push(self.signature.len() as u8);
        bin.extend_from_slice(&self.signature);
        bin
    }
}
