//! CLI commands for address and multisig tooling
//!
//! Each command builds a serializable report and prints it either as
//! human-readable text or as JSON.

use serde::Serialize;
use std::collections::HashMap;

use crate::address::{Address, AddressVariant, Addressable, KeyType, NetType};
use crate::crypto::KeyPair;
use crate::multisig::{MultisigAddress, MultisigSignature};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Settings shared by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliConfig {
    /// Network for newly derived addresses
    pub net_type: NetType,
    /// Print JSON instead of text
    pub json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            net_type: NetType::Mainnet,
            json: false,
        }
    }
}

impl CliConfig {
    pub fn new(testnet: bool, json: bool) -> Self {
        Self {
            net_type: if testnet {
                NetType::Testnet
            } else {
                NetType::Mainnet
            },
            json,
        }
    }
}

/// Decoded view of any address
#[derive(Debug, Clone, Serialize)]
pub struct AddressReport {
    pub address: AddressVariant,
    pub version: u8,
    pub net_type: NetType,
    pub key_type: KeyType,
    pub public_key: String,
    pub bin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multisig: Option<MultisigReport>,
}

/// Decoded view of a multisig address
#[derive(Debug, Clone, Serialize)]
pub struct MultisigReport {
    pub address: MultisigAddress,
    pub net_type: NetType,
    pub threshold: u8,
    pub signers: u8,
    pub commitment: String,
}

/// A freshly generated or imported key pair
#[derive(Debug, Clone, Serialize)]
pub struct KeyPairReport {
    pub address: Address,
    pub public_key: String,
    pub seed: String,
}

/// Result of checking a serialized multisig signature
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub address: MultisigAddress,
    pub signers: Vec<Address>,
    pub signatures: usize,
    pub valid_signatures: usize,
    pub threshold: u8,
    pub complete: bool,
    pub commitment_matches: bool,
}

impl From<&MultisigAddress> for MultisigReport {
    fn from(address: &MultisigAddress) -> Self {
        Self {
            address: address.clone(),
            net_type: address.net_type(),
            threshold: address.threshold(),
            signers: address.signer_count(),
            commitment: hex::encode(address.public_key()),
        }
    }
}

impl From<AddressVariant> for AddressReport {
    fn from(address: AddressVariant) -> Self {
        let multisig = match &address {
            AddressVariant::Multisig(multi) => Some(MultisigReport::from(multi)),
            AddressVariant::Plain(_) => None,
        };
        Self {
            version: address.version(),
            net_type: address.net_type(),
            key_type: address.key_type(),
            public_key: hex::encode(address.public_key()),
            bin: hex::encode(address.to_bin()),
            multisig,
            address,
        }
    }
}

fn print_report<T: Serialize>(
    config: &CliConfig,
    report: &T,
    text: impl FnOnce(&T),
) -> CliResult<()> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        text(report);
    }
    Ok(())
}

fn parse_addresses(signers: &[String]) -> CliResult<Vec<Address>> {
    signers
        .iter()
        .map(|s| Address::from_b58(s.trim()).map_err(Into::into))
        .collect()
}

fn print_address_text(report: &AddressReport) {
    println!("📍 Address: {}", report.address);
    println!("   ├─ Version: {}", report.version);
    println!("   ├─ Network: {}", report.net_type);
    println!("   ├─ Key type: {}", report.key_type);
    println!("   ├─ Public key: {}", report.public_key);
    println!("   └─ Binary: {}", report.bin);
    if let Some(multi) = &report.multisig {
        println!("   👥 Multisig {}-of-{}", multi.threshold, multi.signers);
    }
}

fn print_multisig_text(report: &MultisigReport) {
    println!("👥 Multisig address: {}", report.address);
    println!("   ├─ Network: {}", report.net_type);
    println!("   ├─ Threshold: {}-of-{}", report.threshold, report.signers);
    println!("   └─ Commitment: {}", report.commitment);
}

/// Decode a Base58Check address of any kind
pub fn inspect_address(address: &str) -> CliResult<AddressReport> {
    Ok(AddressVariant::from_b58(address.trim())?.into())
}

/// Decode a hex-encoded binary address of any kind
pub fn address_from_bin(bin_hex: &str) -> CliResult<AddressReport> {
    let bytes = hex::decode(bin_hex.trim())?;
    Ok(AddressVariant::from_bin(&bytes)?.into())
}

/// Generate a key pair, or import one from a hex seed
pub fn new_keypair(config: &CliConfig, seed_hex: Option<&str>) -> CliResult<KeyPairReport> {
    let key_pair = match seed_hex {
        Some(seed) => KeyPair::from_seed_hex(seed)?,
        None => KeyPair::generate(),
    };
    Ok(KeyPairReport {
        address: key_pair.address(config.net_type),
        public_key: hex::encode(key_pair.public_key_bytes()),
        seed: key_pair.seed_hex(),
    })
}

/// Derive the multisig address for a signer set
pub fn create_multisig(
    config: &CliConfig,
    signers: &[String],
    threshold: u8,
) -> CliResult<MultisigReport> {
    let addresses = parse_addresses(signers)?;
    let multi = MultisigAddress::create(&addresses, threshold, config.net_type)?;
    Ok(MultisigReport::from(&multi))
}

/// Decode a multisig address
pub fn inspect_multisig(address: &str) -> CliResult<MultisigReport> {
    let multi = MultisigAddress::from_b58(address.trim())?;
    Ok(MultisigReport::from(&multi))
}

/// Sign `message_hex` with each seed and return the serialized multisig signature
pub fn sign_multisig(
    address: &str,
    signers: &[String],
    seeds: &[String],
    message_hex: &str,
) -> CliResult<String> {
    let multi = MultisigAddress::from_b58(address.trim())?;
    let addresses = parse_addresses(signers)?;
    if !multi.commits_to(&addresses) {
        log::warn!("Signer set does not match the commitment of {}", multi);
    }
    let message = hex::decode(message_hex.trim())?;

    let mut signatures = HashMap::new();
    for seed in seeds {
        let key_pair = KeyPair::from_seed_hex(seed)?;
        signatures.insert(key_pair.address(multi.net_type()), key_pair.sign(&message));
    }

    let signature = MultisigSignature::create(&multi, &addresses, &signatures)?;
    Ok(hex::encode(signature.sign(&message)?))
}

/// Decode and verify a serialized multisig signature
pub fn verify_multisig(
    address: &str,
    signature_hex: &str,
    message_hex: &str,
) -> CliResult<VerifyReport> {
    let multi = MultisigAddress::from_b58(address.trim())?;
    let bytes = hex::decode(signature_hex.trim())?;
    let message = hex::decode(message_hex.trim())?;

    let signature = MultisigSignature::from_bin(&multi, &bytes)?;
    let valid_signatures = signature.verify(&message);

    Ok(VerifyReport {
        signers: signature.addresses().to_vec(),
        signatures: signature.signatures().len(),
        valid_signatures,
        threshold: multi.threshold(),
        complete: valid_signatures >= multi.threshold() as usize,
        commitment_matches: multi.commits_to(signature.addresses()),
        address: multi,
    })
}

/// Inspect an address
pub fn cmd_address_inspect(config: &CliConfig, address: &str) -> CliResult<()> {
    let report = inspect_address(address)?;
    print_report(config, &report, print_address_text)
}

/// Decode a binary address
pub fn cmd_address_from_bin(config: &CliConfig, bin_hex: &str) -> CliResult<()> {
    let report = address_from_bin(bin_hex)?;
    print_report(config, &report, print_address_text)
}

/// Validate an address, returning whether it is valid
pub fn cmd_address_validate(config: &CliConfig, address: &str) -> CliResult<bool> {
    let valid = AddressVariant::is_valid(address.trim());
    let report = serde_json::json!({ "address": address.trim(), "valid": valid });
    print_report(config, &report, |_| {
        if valid {
            println!("✅ {} is a valid address", address.trim());
        } else {
            println!("❌ {} is not a valid address", address.trim());
        }
    })?;
    Ok(valid)
}

/// Create or import a key pair
pub fn cmd_keypair_new(config: &CliConfig, seed_hex: Option<&str>) -> CliResult<()> {
    let report = new_keypair(config, seed_hex)?;
    print_report(config, &report, |r| {
        println!("🔐 Key pair ready!");
        println!("   📍 Address: {}", r.address);
        println!("   🔑 Public key: {}", r.public_key);
        println!("   🌱 Seed: {}", r.seed);
        println!("\n   ⚠️  IMPORTANT: The seed is the private key. Keep it secret!");
    })
}

/// Create a multisig address
pub fn cmd_multisig_create(
    config: &CliConfig,
    signers: &[String],
    threshold: u8,
) -> CliResult<()> {
    let report = create_multisig(config, signers, threshold)?;
    print_report(config, &report, print_multisig_text)
}

/// Inspect a multisig address
pub fn cmd_multisig_inspect(config: &CliConfig, address: &str) -> CliResult<()> {
    let report = inspect_multisig(address)?;
    print_report(config, &report, print_multisig_text)
}

/// Produce a serialized multisig signature
pub fn cmd_multisig_sign(
    config: &CliConfig,
    address: &str,
    signers: &[String],
    seeds: &[String],
    message_hex: &str,
) -> CliResult<()> {
    let signature = sign_multisig(address, signers, seeds, message_hex)?;
    let report = serde_json::json!({ "address": address.trim(), "signature": signature });
    print_report(config, &report, |_| {
        println!("✍️  Multisig signature ({} signers):", seeds.len());
        println!("{}", signature);
    })
}

/// Verify a serialized multisig signature, returning whether it meets the threshold
pub fn cmd_multisig_verify(
    config: &CliConfig,
    address: &str,
    signature_hex: &str,
    message_hex: &str,
) -> CliResult<bool> {
    let report = verify_multisig(address, signature_hex, message_hex)?;
    print_report(config, &report, |r| {
        let mark = if r.complete { "✅" } else { "❌" };
        println!("{} Multisig signature for {}", mark, r.address);
        println!(
            "   ├─ Valid signatures: {} of {} (threshold {})",
            r.valid_signatures, r.signatures, r.threshold
        );
        println!("   ├─ Commitment matches signers: {}", r.commitment_matches);
        println!("   └─ Signers:");
        for signer in &r.signers {
            println!("      └─ {}", signer);
        }
    })?;
    Ok(report.complete && report.commitment_matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_1: &str = "13M8dUbxymE3xtiAXszRkGMmezMhBS8Li7wEsMojLdb4Sdxc4wc";
    const ADDR_2: &str = "148d8KTRcKA5JKPekBcKFd4KfvprvFRpjGtivhtmRmnZ8MFYnP3";
    const MULTI_2_OF_2: &str = "1SYJnDnV2G1HSzoBF9nwd5apBX3pS7nLeLkjnVXemBZTP8C8F44TBYnr";

    fn seeds() -> Vec<String> {
        (1..=3u8).map(|i| hex::encode([i; 32])).collect()
    }

    fn seed_addresses(config: &CliConfig) -> Vec<String> {
        seeds()
            .iter()
            .map(|s| new_keypair(config, Some(s.as_str())).unwrap().address.to_b58())
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.net_type, NetType::Mainnet);
        assert!(!config.json);
        assert_eq!(CliConfig::new(true, true).net_type, NetType::Testnet);
    }

    #[test]
    fn test_inspect_plain_and_multisig() {
        let plain = inspect_address(ADDR_1).unwrap();
        assert_eq!(plain.key_type, KeyType::Ed25519);
        assert!(plain.multisig.is_none());
        assert_eq!(plain.bin.len(), 66);

        let multi = inspect_address(MULTI_2_OF_2).unwrap();
        let details = multi.multisig.unwrap();
        assert_eq!(details.threshold, 2);
        assert_eq!(details.signers, 2);

        assert!(inspect_address("garbage").is_err());
    }

    #[test]
    fn test_from_bin_matches_b58() {
        let plain = inspect_address(ADDR_1).unwrap();
        let decoded = address_from_bin(&plain.bin).unwrap();
        assert_eq!(decoded.address.to_b58(), ADDR_1);
    }

    #[test]
    fn test_create_multisig_report() {
        let report = create_multisig(
            &CliConfig::default(),
            &[ADDR_2.to_string(), ADDR_1.to_string()],
            2,
        )
        .unwrap();
        assert_eq!(report.address.to_b58(), MULTI_2_OF_2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["address"], MULTI_2_OF_2);
        assert_eq!(json["net_type"], "mainnet");
    }

    #[test]
    fn test_keypair_from_seed_is_deterministic() {
        let config = CliConfig::new(true, false);
        let seed = hex::encode([9u8; 32]);
        let a = new_keypair(&config, Some(seed.as_str())).unwrap();
        let b = new_keypair(&config, Some(seed.as_str())).unwrap();
        assert_eq!(a.address, b.address);
        assert_eq!(a.address.net_type(), NetType::Testnet);
        assert_eq!(a.seed, seed);
    }

    #[test]
    fn test_sign_then_verify() {
        let config = CliConfig::default();
        let signers = seed_addresses(&config);
        let multi = create_multisig(&config, &signers, 2).unwrap();
        let address = multi.address.to_b58();
        let message = hex::encode(b"transfer 10 HNT");

        let signature = sign_multisig(&address, &signers, &seeds()[..2], &message).unwrap();
        let report = verify_multisig(&address, &signature, &message).unwrap();
        assert_eq!(report.valid_signatures, 2);
        assert_eq!(report.signatures, 2);
        assert!(report.complete);
        assert!(report.commitment_matches);

        let other = hex::encode(b"transfer 99 HNT");
        let report = verify_multisig(&address, &signature, &other).unwrap();
        assert_eq!(report.valid_signatures, 0);
        assert!(!report.complete);
    }

    #[test]
    fn test_sign_with_too_few_keys() {
        let config = CliConfig::default();
        let signers = seed_addresses(&config);
        let multi = create_multisig(&config, &signers, 3).unwrap();
        let message = hex::encode(b"msg");
        assert!(sign_multisig(&multi.address.to_b58(), &signers, &seeds()[..1], &message).is_err());
    }
}
