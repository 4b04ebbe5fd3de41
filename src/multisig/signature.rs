//! Aggregate M-of-N signatures
//!
//! Wire format:
//!
//! ```text
//! Address.to_bin() × N          (33 bytes each, canonical order)
//! KeySignature.to_bin() × k     (sorted ascending by their own bytes)
//! ```

use std::collections::HashMap;

use crate::address::{sort_addresses, Address, KeyType};
use crate::crypto::verify_signature;
use crate::multisig::address::{MultisigAddress, MultisigError};
use crate::multisig::key_signature::KeySignature;

/// Size of one signer address on the wire (tag byte + 32-byte key)
pub const SIGNER_BIN_LEN: usize = 33;

/// A set of signer addresses and the key signatures collected from them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigSignature {
    addresses: Vec<Address>,
    signatures: Vec<KeySignature>,
}

impl MultisigSignature {
    /// Assemble a multisig signature for `multisig_address`
    ///
    /// `addresses` is the full signer set (any order); `signatures` maps each
    /// signer that signed to its signature.
    pub fn create(
        multisig_address: &MultisigAddress,
        addresses: &[Address],
        signatures: &HashMap<Address, Vec<u8>>,
    ) -> Result<Self, MultisigError> {
        if signatures.len() < multisig_address.threshold() as usize {
            return Err(MultisigError::InsufficientSignatures {
                have: signatures.len(),
                need: multisig_address.threshold(),
            });
        }
        if addresses.len() != multisig_address.signer_count() as usize {
            return Err(MultisigError::WrongAddressCount {
                expected: multisig_address.signer_count(),
                actual: addresses.len(),
            });
        }

        let sorted = sort_addresses(addresses);
        let signatures = KeySignature::from_map(&sorted, signatures)?;

        Ok(Self {
            addresses: sorted,
            signatures,
        })
    }

    /// Signer addresses in canonical order
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn signatures(&self) -> &[KeySignature] {
        &self.signatures
    }

    /// Count the key signatures that verify over `message`
    ///
    /// A signature that fails to verify is not an error, it just does not count.
    pub fn verify(&self, message: &[u8]) -> usize {
        let valid = self
            .signatures
            .iter()
            .filter(|ks| self.verify_one(ks, message))
            .count();
        log::debug!(
            "{} of {} key signatures verified",
            valid,
            self.signatures.len()
        );
        valid
    }

    fn verify_one(&self, key_signature: &KeySignature, message: &[u8]) -> bool {
        let Some(signer) = self.addresses.get(key_signature.index() as usize) else {
            return false;
        };
        if signer.key_type() != KeyType::Ed25519 {
            log::debug!("Skipping {} signer {}", signer.key_type(), signer);
            return false;
        }

        match verify_signature(signer.public_key(), message, key_signature.signature()) {
            Ok(valid) => valid,
            Err(e) => {
                log::debug!("Signature from {} not checkable: {}", signer, e);
                false
            }
        }
    }

    /// Whether at least M key signatures verify over `message`
    pub fn is_complete(&self, multisig_address: &MultisigAddress, message: &[u8]) -> bool {
        self.verify(message) >= multisig_address.threshold() as usize
    }

    /// Canonical binary form
    ///
    /// Key signatures are sorted into a local copy; `self` is left untouched.
    pub fn to_bin(&self) -> Vec<u8> {
        let mut signature_bins: Vec<Vec<u8>> =
            self.signatures.iter().map(KeySignature::to_bin).collect();
        signature_bins.sort();

        let mut bin: Vec<u8> = self.addresses.iter().flat_map(Address::to_bin).collect();
        for signature_bin in signature_bins {
            bin.extend_from_slice(&signature_bin);
        }
        bin
    }

    /// Decode a binary multisig signature for `multisig_address`
    pub fn from_bin(
        multisig_address: &MultisigAddress,
        bytes: &[u8],
    ) -> Result<Self, MultisigError> {
        let addresses_len = SIGNER_BIN_LEN * multisig_address.signer_count() as usize;
        if bytes.len() < addresses_len {
            log::warn!(
                "Multisig signature truncated: {} bytes, need {} for signers",
                bytes.len(),
                addresses_len
            );
            return Err(MultisigError::MalformedBinary(format!(
                "expected at least {} bytes of signer addresses, got {}",
                addresses_len,
                bytes.len()
            )));
        }

        let (address_bytes, mut rest) = bytes.split_at(addresses_len);
        let addresses = address_bytes
            .chunks(SIGNER_BIN_LEN)
            .map(Address::from_bin)
            .collect::<Result<Vec<_>, _>>()?;

        let mut signatures = HashMap::new();
        while !rest.is_empty() {
            let [index, len, tail @ ..] = rest else {
                return Err(MultisigError::MalformedBinary(
                    "truncated key signature header".to_string(),
                ));
            };
            let (index, len) = (*index as usize, *len as usize);
            if tail.len() < len {
                return Err(MultisigError::MalformedBinary(format!(
                    "key signature {} needs {} bytes, {} remain",
                    index,
                    len,
                    tail.len()
                )));
            }
            let signer = addresses.get(index).ok_or_else(|| {
                MultisigError::MalformedBinary(format!("signer index {} out of range", index))
            })?;
            if signatures
                .insert(signer.clone(), tail[..len].to_vec())
                .is_some()
            {
                return Err(MultisigError::MalformedBinary(format!(
                    "duplicate signature for signer {}",
                    signer
                )));
            }
            rest = &tail[len..];
        }

        log::debug!(
            "Decoded multisig signature with {} signers and {} signatures",
            addresses.len(),
            signatures.len()
        );
        Self::create(multisig_address, &addresses, &signatures)
    }

    /// Whether `bytes` decodes to a valid multisig signature
    pub fn is_valid(multisig_address: &MultisigAddress, bytes: &[u8]) -> bool {
        Self::from_bin(multisig_address, bytes).is_ok()
    }

    /// Check that at least one key signature verifies, then serialize
    ///
    /// This does not add a signature; it validates and returns `to_bin()`.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, MultisigError> {
        if self.verify(message) < 1 {
            return Err(MultisigError::NoValidSignatures);
        }
        Ok(self.to_bin())
    }
}
