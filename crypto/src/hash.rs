//! Keccak-256 hashing for transactions and signing pre-images.

use pyrite_types::TxHash;
use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of arbitrary data.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash canonical transaction bytes to produce the transaction's `TxHash`.
pub fn hash_transaction(tx_bytes: &[u8]) -> TxHash {
    TxHash::new(keccak_256(tx_bytes))
}
