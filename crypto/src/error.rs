use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The private key is not a valid secp256k1 secret scalar
    /// (zero, not 32 bytes, or at least the curve order).
    #[error("invalid private key")]
    InvalidKey,

    /// The recovery indicator does not map to one of the four candidates.
    #[error("invalid recovery indicator {v}")]
    InvalidRecoveryId { v: u64 },

    /// The curve operation rejected the signature; no public key exists
    /// for this (hash, v, r, s) tuple.
    #[error("public key recovery failed")]
    RecoveryFailed,
}
