//! Account addresses
//!
//! Versioned, typed, Base58Check-encoded identifiers and the canonical
//! ordering used wherever signer order must be reproducible.

pub mod address;
pub mod sorter;
pub mod variant;

pub use address::{Address, AddressError, KeyType, NetType, ADDRESS_VERSION};
pub use sorter::{is_canonical, sort_addresses};
pub use variant::{AddressVariant, Addressable};
