//! The transaction action: call an existing account, or create a contract.

use crate::error::TransactionError;
use pyrite_types::Address;
use rlp::{DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

/// Where a transaction is directed.
///
/// Contract creation is denoted by an empty action on the wire; anything
/// non-empty must be exactly a 20-byte address. The two are never conflated:
/// creation round-trips as empty, not as twenty zero bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Create a contract; encodes as the empty byte string.
    #[default]
    Create,
    /// Call the account at the given address.
    Call(Address),
}

impl Action {
    /// Normalize raw action bytes: empty means contract creation, anything
    /// else must be exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TransactionError> {
        if bytes.is_empty() {
            Ok(Action::Create)
        } else {
            Address::from_slice(bytes)
                .map(Action::Call)
                .ok_or(TransactionError::InvalidAction { len: bytes.len() })
        }
    }

    /// The wire representation: empty for creation, the address bytes for a
    /// call.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Action::Create => &[],
            Action::Call(address) => address.as_bytes(),
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Action::Create)
    }
}

impl Encodable for Action {
    fn rlp_append(&self, stream: &mut RlpStream) {
        stream.encoder().encode_value(self.as_bytes());
    }
}

impl rlp::Decodable for Action {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.is_empty() {
            if rlp.is_data() {
                Ok(Action::Create)
            } else {
                Err(DecoderError::RlpExpectedToBeData)
            }
        } else {
            Ok(Action::Call(rlp.as_val()?))
        }
    }
}
