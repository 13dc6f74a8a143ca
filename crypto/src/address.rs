//! Account address derivation from public keys.
//!
//! An address is the trailing 20 bytes of Keccak-256 over the 64-byte
//! uncompressed public key (tag byte stripped).

use crate::error::CryptoError;
use crate::hash::keccak_256;
use crate::keys::public_from_private;
use pyrite_types::{Address, PrivateKey, PublicKey};

/// Derive the account address for a public key.
pub fn address_from_public(public: &PublicKey) -> Address {
    let hash = keccak_256(public.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

/// Derive the account address directly from a private key.
pub fn address_from_private(private: &PrivateKey) -> Result<Address, CryptoError> {
    Ok(address_from_public(&public_from_private(private)?))
}
