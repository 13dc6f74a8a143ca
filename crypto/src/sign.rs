//! Recoverable ECDSA signing over secp256k1.
//!
//! Signatures use the Electrum convention on the boundary: `ecsign` reports
//! the recovery indicator as 27 + recovery id, and `ecrecover` expects the
//! same 27-offset indicator back. Callers that store the indicator in the
//! 0–3 range subtract and re-add the offset themselves.

use crate::error::CryptoError;
use crate::keys::to_public_key;
use pyrite_types::{PrivateKey, PublicKey, U256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SecretKey, SECP256K1};

/// Sign a 32-byte hash, returning `(v, r, s)` with v ∈ {27, 28}.
pub fn ecsign(hash: &[u8; 32], key: &PrivateKey) -> Result<(u64, U256, U256), CryptoError> {
    let secret = SecretKey::from_slice(&key.0).map_err(|_| CryptoError::InvalidKey)?;
    let message = Message::from_digest(*hash);
    let signature = SECP256K1.sign_ecdsa_recoverable(&message, &secret);
    let (recovery_id, bytes) = signature.serialize_compact();
    let r = U256::from_big_endian(&bytes[..32]);
    let s = U256::from_big_endian(&bytes[32..]);
    Ok((27 + recovery_id.to_i32() as u64, r, s))
}

/// Recover the public key that produced `(v, r, s)` over `hash`.
///
/// `v` carries the 27 offset (27–30); values outside that range fail with
/// `InvalidRecoveryId`. A tuple that passes the range checks can still name
/// no curve point, in which case recovery fails.
pub fn ecrecover(
    hash: &[u8; 32],
    v: u64,
    r: &U256,
    s: &U256,
) -> Result<PublicKey, CryptoError> {
    let standard_v = v
        .checked_sub(27)
        .filter(|id| *id <= 3)
        .ok_or(CryptoError::InvalidRecoveryId { v })?;
    let recovery_id = RecoveryId::from_i32(standard_v as i32)
        .map_err(|_| CryptoError::InvalidRecoveryId { v })?;

    let mut compact = [0u8; 64];
    r.to_big_endian(&mut compact[..32]);
    s.to_big_endian(&mut compact[32..]);
    let signature = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    let message = Message::from_digest(*hash);
    let public = SECP256K1
        .recover_ecdsa(&message, &signature)
        .map_err(|_| CryptoError::RecoveryFailed)?;
    Ok(to_public_key(&public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn sign_and_recover() {
        let kp = generate_keypair();
        let hash = crate::keccak_256(b"test message for pyrite");
        let (v, r, s) = ecsign(&hash, &kp.private).unwrap();
        assert!(v == 27 || v == 28);
        let recovered = ecrecover(&hash, v, &r, &s).unwrap();
        assert_eq!(recovered.0, kp.public.0);
    }

    #[test]
    fn wrong_hash_recovers_different_key() {
        let kp = generate_keypair();
        let hash = crate::keccak_256(b"correct message");
        let (v, r, s) = ecsign(&hash, &kp.private).unwrap();
        let other = crate::keccak_256(b"wrong message");
        // Recovery over the wrong pre-image either fails outright or yields
        // some other key; it never yields the signer's.
        if let Ok(recovered) = ecrecover(&other, v, &r, &s) {
            assert_ne!(recovered.0, kp.public.0);
        }
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]).unwrap();
        let hash = crate::keccak_256(b"deterministic test");
        let sig1 = ecsign(&hash, &kp.private).unwrap();
        let sig2 = ecsign(&hash, &kp.private).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn invalid_key_rejected() {
        let hash = [7u8; 32];
        assert_eq!(
            ecsign(&hash, &PrivateKey([0u8; 32])).unwrap_err(),
            CryptoError::InvalidKey
        );
        assert_eq!(
            ecsign(&hash, &PrivateKey([0xFF; 32])).unwrap_err(),
            CryptoError::InvalidKey
        );
    }

    #[test]
    fn recovery_indicator_out_of_range() {
        let hash = [7u8; 32];
        let r = U256::from(1);
        let s = U256::from(1);
        assert_eq!(
            ecrecover(&hash, 26, &r, &s).unwrap_err(),
            CryptoError::InvalidRecoveryId { v: 26 }
        );
        assert_eq!(
            ecrecover(&hash, 31, &r, &s).unwrap_err(),
            CryptoError::InvalidRecoveryId { v: 31 }
        );
    }

    #[test]
    fn zero_signature_does_not_recover() {
        let hash = crate::keccak_256(b"unsigned");
        let zero = U256::zero();
        assert_eq!(
            ecrecover(&hash, 27, &zero, &zero).unwrap_err(),
            CryptoError::RecoveryFailed
        );
    }
}
