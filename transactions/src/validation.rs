//! Signature well-formedness.
//!
//! A recoverable signature is well-formed when `v <= 3`, `r < P`, `s < N`,
//! and for `v >= 2` additionally `r < P - N`: those two recovery indicators
//! name x-coordinate candidates beyond the curve order, which only exist for
//! r in the narrow low range. Well-formedness is a validity property checked
//! explicitly before trusting a recovered sender; it is not enforced at
//! construction, since an unsigned transaction legitimately carries
//! v = r = s = 0.

use crate::error::TransactionError;
use pyrite_types::U256;

/// The secp256k1 base field prime P (little-endian 64-bit limbs).
pub const SECP256K1_P: U256 = U256([
    0xffff_fffe_ffff_fc2f,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
]);

/// The secp256k1 curve order N (little-endian 64-bit limbs).
pub const SECP256K1_N: U256 = U256([
    0xbfd2_5e8c_d036_4141,
    0xbaae_dce6_af48_a03b,
    0xffff_ffff_ffff_fffe,
    0xffff_ffff_ffff_ffff,
]);

/// Check the well-formedness predicate for a recoverable signature.
pub fn validate_signature(v: u64, r: &U256, s: &U256) -> Result<(), TransactionError> {
    if v > 3 {
        return Err(TransactionError::InvalidSignature {
            reason: format!("recovery indicator {} out of range", v),
        });
    }
    if *r >= SECP256K1_P {
        return Err(TransactionError::InvalidSignature {
            reason: "r exceeds the field prime".into(),
        });
    }
    if *s >= SECP256K1_N {
        return Err(TransactionError::InvalidSignature {
            reason: "s exceeds the curve order".into(),
        });
    }
    if v >= 2 && *r >= SECP256K1_P - SECP256K1_N {
        return Err(TransactionError::InvalidSignature {
            reason: "r wraps past the curve order for this recovery indicator".into(),
        });
    }
    Ok(())
}
