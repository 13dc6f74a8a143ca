//! Cryptographic primitives for the Pyrite ledger.
//!
//! - **Keccak-256** for hashing (transaction hashes, signing pre-images)
//! - **Recoverable ECDSA over secp256k1** for signing; the public key, and
//!   from it the sender address, is reconstructed from the signature alone
//! - Address derivation: the trailing 20 bytes of the hashed public key

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{address_from_private, address_from_public};
pub use error::CryptoError;
pub use hash::{hash_transaction, keccak_256};
pub use keys::{
    generate_keypair, keypair_from_seed, private_key_from_hex, public_from_private,
};
pub use sign::{ecrecover, ecsign};
