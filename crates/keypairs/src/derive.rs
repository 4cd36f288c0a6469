//! Deterministic scalar derivation.
//!
//! Turns arbitrary bytes (plus an optional 32-bit discriminator) into a
//! secp256k1 scalar by rejection sampling over SHA-512: hash the input
//! with an ascending big-endian counter appended, interpret the first 32
//! digest bytes as a big-endian integer, and accept the first candidate
//! in the open range `(0, n)` where `n` is the curve order. The order is
//! close to `2^256`, so the expected number of attempts is one.

use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};

use crate::error::{KeyError, Result};
use crate::hash::Sha512Half;

/// Derive a scalar from `bytes`, mixing in `discriminator` when present.
///
/// Identical inputs always yield the identical scalar. The only failure
/// is exhaustion of the u32 counter space, which signals a broken hash
/// function rather than a normal runtime condition.
pub(crate) fn derive_scalar(bytes: &[u8], discriminator: Option<u32>) -> Result<Scalar> {
    for counter in 0..=u32::MAX {
        let mut hasher = Sha512Half::new();
        hasher.update(bytes);
        if let Some(value) = discriminator {
            hasher.update_u32(value);
        }
        hasher.update_u32(counter);
        if let Some(scalar) = scalar_from_bytes(&hasher.finish_half()) {
            return Ok(scalar);
        }
    }
    Err(KeyError::DerivationExhausted)
}

/// Interpret 32 big-endian bytes as a scalar, rejecting zero and values
/// at or above the curve order.
pub(crate) fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes)))
        .filter(|scalar| !bool::from(scalar.is_zero()))
}

/// Big-endian byte encoding of a scalar.
pub(crate) fn scalar_to_bytes(scalar: &Scalar) -> [u8; 32] {
    scalar.to_repr().into()
}
