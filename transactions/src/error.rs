use pyrite_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    /// The action field is neither empty (contract creation) nor a 20-byte
    /// address.
    #[error("action must be empty or a 20-byte address, got {len} bytes")]
    InvalidAction { len: usize },

    /// A decoded integer field is wider than 32 bytes.
    #[error("field {field} does not fit in 256 bits")]
    FieldOverflow { field: &'static str },

    /// The (v, r, s) tuple fails the well-formedness predicate. A transaction
    /// carrying such a signature has no valid sender.
    #[error("signature is not well-formed: {reason}")]
    InvalidSignature { reason: String },

    /// The canonical encoding does not carry exactly the nine transaction
    /// fields.
    #[error("expected 9 transaction fields, got {got}")]
    FieldCount { got: usize },

    /// Malformed canonical bytes.
    #[error("invalid transaction encoding: {0}")]
    Decode(rlp::DecoderError),

    /// An error from the signing/recovery primitives, propagated unchanged.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
