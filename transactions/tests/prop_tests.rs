use proptest::prelude::*;

use pyrite_transactions::{Action, Transaction};
use pyrite_types::{Address, U256};

fn arb_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform32(0u8..).prop_map(|bytes| U256::from_big_endian(&bytes))
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Create),
        prop::array::uniform20(0u8..).prop_map(|bytes| Action::Call(Address::new(bytes))),
    ]
}

prop_compose! {
    fn arb_transaction()(
        nonce in arb_u256(),
        gas_price in arb_u256(),
        gas in arb_u256(),
        action in arb_action(),
        value in arb_u256(),
        data in prop::collection::vec(0u8.., 0..64),
        v in 0u64..4,
        r in arb_u256(),
        s in arb_u256(),
    ) -> Transaction {
        Transaction::new_signed(nonce, gas_price, gas, action, value, data, v, r, s)
    }
}

proptest! {
    /// decode(encode(tx)) reproduces every field, and re-encoding is
    /// byte-exact.
    #[test]
    fn canonical_roundtrip(tx in arb_transaction()) {
        let bytes = tx.encode();
        let decoded = Transaction::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.nonce(), tx.nonce());
        prop_assert_eq!(decoded.gas_price(), tx.gas_price());
        prop_assert_eq!(decoded.gas(), tx.gas());
        prop_assert_eq!(decoded.action(), tx.action());
        prop_assert_eq!(decoded.value(), tx.value());
        prop_assert_eq!(decoded.data(), tx.data());
        prop_assert_eq!(decoded.v(), tx.v());
        prop_assert_eq!(decoded.r(), tx.r());
        prop_assert_eq!(decoded.s(), tx.s());
        prop_assert_eq!(decoded.encode(), bytes);
    }

    /// Encoding the same logical transaction twice yields identical bytes
    /// and an identical hash, and the decoded copy is equal under the
    /// hash-based identity.
    #[test]
    fn hash_determinism_and_equality(tx in arb_transaction()) {
        let decoded = Transaction::decode(&tx.encode()).unwrap();
        prop_assert_eq!(tx.encode(), decoded.encode());
        prop_assert_eq!(tx.hash(), decoded.hash());
        prop_assert!(tx == decoded);
    }

    /// The signing pre-image ignores (v, r, s): transactions differing only
    /// in the signature share a signing hash but not an identity hash.
    #[test]
    fn signing_hash_ignores_signature(
        tx in arb_transaction(),
        v in 0u64..4,
        r in arb_u256(),
        s in arb_u256(),
    ) {
        let resigned = Transaction::new_signed(
            tx.nonce(), tx.gas_price(), tx.gas(), tx.action().clone(),
            tx.value(), tx.data().to_vec(), v, r, s,
        );
        prop_assert_eq!(tx.signing_hash(), resigned.signing_hash());
        if (v, r, s) != (tx.v(), tx.r(), tx.s()) {
            prop_assert_ne!(tx.hash(), resigned.hash());
        }
    }

    /// Sorting by `Ord` yields exactly the numeric big-endian order of the
    /// hashes, a strict total order when hashes are distinct.
    #[test]
    fn ordering_totality(txs in prop::collection::vec(arb_transaction(), 2..8)) {
        let mut sorted = txs.clone();
        sorted.sort();
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].hash().as_bytes() <= pair[1].hash().as_bytes());
        }
        // Sorting never loses or invents elements under the hash identity.
        let mut hashes_before: Vec<_> = txs.iter().map(|tx| tx.hash()).collect();
        let mut hashes_after: Vec<_> = sorted.iter().map(|tx| tx.hash()).collect();
        hashes_before.sort();
        hashes_after.sort();
        prop_assert_eq!(hashes_before, hashes_after);
    }
}
