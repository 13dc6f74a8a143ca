//! Fundamental types for the Pyrite ledger.
//!
//! This crate defines the core value types shared across every other crate in
//! the workspace: account addresses, transaction hashes, and key material.
//! The 256-bit unsigned integer used for nonces, gas prices, values, and the
//! signature scalars is re-exported from `ethereum-types`.

pub mod address;
pub mod hash;
pub mod keys;

pub use address::Address;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey};

pub use ethereum_types::U256;
