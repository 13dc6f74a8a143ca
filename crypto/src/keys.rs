//! secp256k1 key generation and derivation.

use crate::error::CryptoError;
use pyrite_types::{KeyPair, PrivateKey, PublicKey};
use rand::rngs::OsRng;
use secp256k1::{PublicKey as SecpPublicKey, SecretKey, SECP256K1};

/// Generate a new secp256k1 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let (secret, public) = SECP256K1.generate_keypair(&mut OsRng);
    KeyPair {
        public: to_public_key(&public),
        private: PrivateKey(secret.secret_bytes()),
    }
}

/// Derive the public key from a private key.
///
/// Fails with `InvalidKey` if the bytes are not a valid secret scalar.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, CryptoError> {
    let secret = SecretKey::from_slice(&private.0).map_err(|_| CryptoError::InvalidKey)?;
    Ok(to_public_key(&SecpPublicKey::from_secret_key(
        &SECP256K1, &secret,
    )))
}

/// Derive a key pair from a 32-byte seed (deterministic).
///
/// The seed is used directly as the secret scalar, so it must lie in the
/// valid key range (nonzero, below the curve order).
pub fn keypair_from_seed(seed: &[u8; 32]) -> Result<KeyPair, CryptoError> {
    let private = PrivateKey(*seed);
    let public = public_from_private(&private)?;
    Ok(KeyPair { public, private })
}

/// Parse a private key from a 64-character hex string, with or without a
/// leading `0x`.
pub fn private_key_from_hex(s: &str) -> Result<PrivateKey, CryptoError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|_| CryptoError::InvalidKey)?;
    let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidKey)?;
    // Reject scalars outside the key range now rather than at first use.
    SecretKey::from_slice(&arr).map_err(|_| CryptoError::InvalidKey)?;
    Ok(PrivateKey(arr))
}

/// Strip the 0x04 tag from an uncompressed secp256k1 point.
pub(crate) fn to_public_key(public: &SecpPublicKey) -> PublicKey {
    let uncompressed = public.serialize_uncompressed();
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&uncompressed[1..]);
    PublicKey(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = generate_keypair();
        assert_ne!(kp.public.0, [0u8; 64]);
        assert_ne!(kp.private.0, [0u8; 32]);
    }

    #[test]
    fn public_from_private_is_deterministic() {
        let kp = generate_keypair();
        let pub2 = public_from_private(&kp.private).unwrap();
        assert_eq!(kp.public.0, pub2.0);
    }

    #[test]
    fn keypair_from_seed_deterministic() {
        let seed = [42u8; 32];
        let kp1 = keypair_from_seed(&seed).unwrap();
        let kp2 = keypair_from_seed(&seed).unwrap();
        assert_eq!(kp1.public.0, kp2.public.0);
        assert_eq!(kp1.private.0, kp2.private.0);
    }

    #[test]
    fn different_seeds_produce_different_keys() {
        let kp1 = keypair_from_seed(&[1u8; 32]).unwrap();
        let kp2 = keypair_from_seed(&[2u8; 32]).unwrap();
        assert_ne!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn zero_seed_rejected() {
        assert_eq!(
            keypair_from_seed(&[0u8; 32]).unwrap_err(),
            CryptoError::InvalidKey
        );
    }

    #[test]
    fn overflowing_seed_rejected() {
        // 2^256 - 1 is far above the curve order.
        assert_eq!(
            keypair_from_seed(&[0xFF; 32]).unwrap_err(),
            CryptoError::InvalidKey
        );
    }

    #[test]
    fn hex_key_with_and_without_prefix() {
        let bare = "0101010101010101010101010101010101010101010101010101010101010101";
        let prefixed = format!("0x{}", bare);
        let k1 = private_key_from_hex(bare).unwrap();
        let k2 = private_key_from_hex(&prefixed).unwrap();
        assert_eq!(k1.0, k2.0);
        assert_eq!(k1.0, [1u8; 32]);
    }

    #[test]
    fn hex_key_bad_input_rejected() {
        assert!(private_key_from_hex("zz").is_err());
        assert!(private_key_from_hex("0x0101").is_err());
        let zero = "00".repeat(32);
        assert_eq!(
            private_key_from_hex(&zero).unwrap_err(),
            CryptoError::InvalidKey
        );
    }
}
