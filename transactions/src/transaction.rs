//! The canonical ledger transaction.
//!
//! A transaction is stored as the ordered field list
//! `[nonce, gas_price, gas, action, value, data, v, r, s]`, RLP-encoded.
//! The canonical bytes are both the wire format and the hashing pre-image:
//! `hash = keccak256(rlp(tx))` over all nine fields is the transaction's
//! identity for equality, ordering, and use as a container key.
//!
//! (v, r, s) is a recoverable signature over the hash of the six-field
//! projection (everything except v, r, s), stored with `0 <= v <= 3`. The
//! signer's public key, and from it the sender address, can be extracted
//! from the signature alone.

use crate::action::Action;
use crate::error::TransactionError;
use crate::validation::validate_signature;
use pyrite_crypto::{address_from_private, address_from_public, ecrecover, ecsign, hash_transaction, keccak_256};
use pyrite_types::{Address, PrivateKey, TxHash, U256};
use rlp::{DecoderError, Encodable, Rlp, RlpStream};
use serde_json::json;
use std::fmt;
use std::sync::OnceLock;

/// A complete nine-field transaction.
///
/// Fields are immutable after construction; the hash and the recovered
/// sender are write-once caches that never influence identity. Two
/// transactions with identical canonical bytes are the same transaction
/// regardless of which caches happen to be populated.
#[derive(Clone)]
pub struct Transaction {
    nonce: U256,
    gas_price: U256,
    gas: U256,
    action: Action,
    value: U256,
    data: Vec<u8>,
    v: u64,
    r: U256,
    s: U256,
    hash: OnceLock<TxHash>,
    sender: OnceLock<Address>,
}

/// The six-field projection covered by the signature.
///
/// Exists solely to produce the signing pre-image; it is never transmitted
/// on its own and implements no equality. Identity is a `Transaction`
/// concern.
#[derive(Clone, Debug)]
pub struct UnsignedTransaction {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas: U256,
    pub action: Action,
    pub value: U256,
    pub data: Vec<u8>,
}

impl Transaction {
    /// Build an unsigned transaction (v = r = s = 0, no sender).
    pub fn new(
        nonce: U256,
        gas_price: U256,
        gas: U256,
        action: Action,
        value: U256,
        data: Vec<u8>,
    ) -> Self {
        Self::new_signed(nonce, gas_price, gas, action, value, data, 0, U256::zero(), U256::zero())
    }

    /// Build a transaction with an explicit (v, r, s).
    ///
    /// The signature is not validated here; well-formedness is an explicit,
    /// separate check (`validate_signature`) run before trusting recovery.
    #[allow(clippy::too_many_arguments)]
    pub fn new_signed(
        nonce: U256,
        gas_price: U256,
        gas: U256,
        action: Action,
        value: U256,
        data: Vec<u8>,
        v: u64,
        r: U256,
        s: U256,
    ) -> Self {
        Self {
            nonce,
            gas_price,
            gas,
            action,
            value,
            data,
            v,
            r,
            s,
            hash: OnceLock::new(),
            sender: OnceLock::new(),
        }
    }

    /// Build an unsigned transaction from raw action bytes, normalizing the
    /// action: empty means contract creation, anything else must be exactly
    /// 20 bytes.
    pub fn with_action_bytes(
        nonce: U256,
        gas_price: U256,
        gas: U256,
        action: &[u8],
        value: U256,
        data: Vec<u8>,
    ) -> Result<Self, TransactionError> {
        Ok(Self::new(nonce, gas_price, gas, Action::from_slice(action)?, value, data))
    }

    /// Decode a transaction from its canonical bytes.
    ///
    /// Strict inverse of `encode`: the field count, every integer width, and
    /// the action shape are re-checked, and trailing bytes are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let rlp = Rlp::new(bytes);
        let payload = rlp.payload_info().map_err(TransactionError::Decode)?;
        if payload.header_len + payload.value_len != bytes.len() {
            return Err(TransactionError::Decode(
                DecoderError::RlpInconsistentLengthAndData,
            ));
        }
        if !rlp.is_list() {
            return Err(TransactionError::Decode(DecoderError::RlpExpectedToBeList));
        }
        let item_count = rlp.item_count().map_err(TransactionError::Decode)?;
        if item_count != 9 {
            return Err(TransactionError::FieldCount { got: item_count });
        }

        let nonce = uint_at(&rlp, 0, "nonce")?;
        let gas_price = uint_at(&rlp, 1, "gas_price")?;
        let gas = uint_at(&rlp, 2, "gas")?;
        let action_item = rlp.at(3).map_err(TransactionError::Decode)?;
        if !action_item.is_data() {
            return Err(TransactionError::Decode(DecoderError::RlpExpectedToBeData));
        }
        let action = Action::from_slice(action_item.data().map_err(TransactionError::Decode)?)?;
        let value = uint_at(&rlp, 4, "value")?;
        let data = rlp
            .val_at::<Vec<u8>>(5)
            .map_err(TransactionError::Decode)?;
        let v = rlp.val_at::<u64>(6).map_err(|err| match err {
            DecoderError::RlpIsTooBig => TransactionError::FieldOverflow { field: "v" },
            other => TransactionError::Decode(other),
        })?;
        let r = uint_at(&rlp, 7, "r")?;
        let s = uint_at(&rlp, 8, "s")?;

        Ok(Self::new_signed(nonce, gas_price, gas, action, value, data, v, r, s))
    }

    /// The canonical bytes: wire format and hashing pre-image.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    pub fn gas(&self) -> U256 {
        self.gas
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn v(&self) -> u64 {
        self.v
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    pub fn is_signed(&self) -> bool {
        self.v != 0 || !self.r.is_zero() || !self.s.is_zero()
    }

    /// Project onto the six signed fields.
    pub fn unsigned(&self) -> UnsignedTransaction {
        UnsignedTransaction {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas: self.gas,
            action: self.action.clone(),
            value: self.value,
            data: self.data.clone(),
        }
    }

    /// The hash the signature covers: keccak256 over the canonical bytes of
    /// the six-field projection.
    pub fn signing_hash(&self) -> TxHash {
        self.unsigned().signing_hash()
    }

    /// Sign with `key`, returning a new transaction; `self` is unchanged.
    ///
    /// The signing primitive reports v as 27/28; storage keeps v - 27. The
    /// sender is cached directly from the key, no recovery round-trip.
    pub fn sign(&self, key: &PrivateKey) -> Result<Transaction, TransactionError> {
        let rawhash = self.signing_hash();
        let (v, r, s) = ecsign(rawhash.as_bytes(), key)?;
        let signed = Transaction::new_signed(
            self.nonce,
            self.gas_price,
            self.gas,
            self.action.clone(),
            self.value,
            self.data.clone(),
            v - 27,
            r,
            s,
        );
        let sender = address_from_private(key)?;
        let _ = signed.sender.set(sender);
        Ok(signed)
    }

    /// Check the signature well-formedness predicate for this transaction.
    pub fn validate_signature(&self) -> Result<(), TransactionError> {
        validate_signature(self.v, &self.r, &self.s)
    }

    /// The sender address, recovering and caching it if not already known.
    ///
    /// Fails if the signature is not well-formed or names no curve point;
    /// such a transaction has no valid sender.
    pub fn sender(&self) -> Result<Address, TransactionError> {
        if let Some(address) = self.sender.get() {
            return Ok(*address);
        }
        let address = self.recover_sender()?;
        // Benign race: a concurrent recovery computed the same address.
        let _ = self.sender.set(address);
        Ok(address)
    }

    /// Recover the sender from (v, r, s), bypassing the cache.
    ///
    /// Recovery re-adds the 27 offset the curve primitive expects.
    pub fn recover_sender(&self) -> Result<Address, TransactionError> {
        self.validate_signature()?;
        let rawhash = self.signing_hash();
        let public = ecrecover(rawhash.as_bytes(), self.v + 27, &self.r, &self.s)?;
        Ok(address_from_public(&public))
    }

    /// The transaction hash: keccak256 over the canonical nine-field bytes.
    /// Signing a transaction changes its hash.
    pub fn hash(&self) -> TxHash {
        *self
            .hash
            .get_or_init(|| hash_transaction(&rlp::encode(self)))
    }

    /// Lowercase hex of the hash, no prefix.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash().as_bytes())
    }

    /// Debug projection: every field plus the derived `sender` and `hash`,
    /// as `0x`-prefixed hex strings. `sender` is null when the transaction
    /// is unsigned or its signature recovers no address.
    pub fn to_json(&self) -> serde_json::Value {
        let sender = self.sender().ok().map(|address| format!("0x{}", address));
        json!({
            "nonce": format!("{:#x}", self.nonce),
            "gas_price": format!("{:#x}", self.gas_price),
            "gas": format!("{:#x}", self.gas),
            "action": format!("0x{}", hex::encode(self.action.as_bytes())),
            "value": format!("{:#x}", self.value),
            "data": format!("0x{}", hex::encode(&self.data)),
            "v": format!("{:#x}", self.v),
            "r": format!("{:#x}", self.r),
            "s": format!("{:#x}", self.s),
            "sender": sender,
            "hash": format!("0x{}", self.hash_hex()),
        })
    }
}

impl UnsignedTransaction {
    /// The signing pre-image hash: keccak256 over the canonical six-field
    /// bytes.
    pub fn signing_hash(&self) -> TxHash {
        hash_transaction(&rlp::encode(self))
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, stream: &mut RlpStream) {
        stream.begin_list(9);
        stream.append(&self.nonce);
        stream.append(&self.gas_price);
        stream.append(&self.gas);
        stream.append(&self.action);
        stream.append(&self.value);
        stream.append(&self.data);
        stream.append(&self.v);
        stream.append(&self.r);
        stream.append(&self.s);
    }
}

impl Encodable for UnsignedTransaction {
    fn rlp_append(&self, stream: &mut RlpStream) {
        stream.begin_list(6);
        stream.append(&self.nonce);
        stream.append(&self.gas_price);
        stream.append(&self.gas);
        stream.append(&self.action);
        stream.append(&self.value);
        stream.append(&self.data);
    }
}

// Identity is the hash of the canonical bytes, never field-by-field
// structural comparison; the sender cache in particular must not
// distinguish otherwise-identical transactions.

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for Transaction {}

impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transaction {
    /// Orders by the hash as a big-endian integer; total over hash space,
    /// used for deterministic container ordering only.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.hash().cmp(&other.hash())
    }
}

impl std::hash::Hash for Transaction {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write(self.hash().as_bytes());
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction({})", &self.hash_hex()[..8])
    }
}

/// The address of the contract created by a `Create` transaction:
/// `keccak256(rlp([sender, nonce]))[12..]`.
pub fn contract_address(sender: &Address, nonce: &U256) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(sender);
    stream.append(nonce);
    let hash = keccak_256(&stream.out());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

fn uint_at(rlp: &Rlp, index: usize, field: &'static str) -> Result<U256, TransactionError> {
    rlp.val_at::<U256>(index).map_err(|err| match err {
        DecoderError::RlpIsTooBig => TransactionError::FieldOverflow { field },
        other => TransactionError::Decode(other),
    })
}
