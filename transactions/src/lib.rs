//! The canonical Pyrite transaction.
//!
//! A transaction is the ordered field list
//! `[nonce, gas_price, gas, action, value, data, v, r, s]` with a single
//! canonical RLP encoding that serves as both the wire format and the
//! hashing pre-image. Identity (equality, ordering, container hashing) is
//! the keccak256 hash of those canonical bytes, never field-by-field
//! comparison.
//!
//! Signing covers only the six-field projection (`UnsignedTransaction`);
//! the resulting recoverable signature lives in the same structure as
//! (v, r, s), so the sender can be reconstructed from the transaction alone.

pub mod action;
pub mod error;
pub mod transaction;
pub mod validation;

pub use action::Action;
pub use error::TransactionError;
pub use transaction::{contract_address, Transaction, UnsignedTransaction};
pub use validation::{validate_signature, SECP256K1_N, SECP256K1_P};
