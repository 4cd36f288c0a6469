//! Secp256k1 key derivation and ECDSA signing.
//!
//! The ledger derives secp256k1 accounts in two stages. Stage one turns
//! the seed into a root generator scalar. Validator keys stop there: the
//! root scalar is the private key. Account keys continue: the compressed
//! public generator plus an account index derive an offset scalar, and
//! the private key is `(root + offset) mod n`.
//!
//! Signing pre-hashes the message with SHA-512-half and produces a
//! canonical (low-S) DER-encoded ECDSA signature over that digest.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, PublicKey, Scalar};

use crate::derive::derive_scalar;
use crate::error::{KeyError, Result};
use crate::hash::sha512_half;

/// Selects the ECDSA implementation used for secp256k1 signing.
///
/// Both backends are RFC 6979 deterministic with low-S normalization and
/// produce byte-identical DER signatures; the choice only affects speed.
/// Without the `native-accel` cargo feature, [`Secp256k1Backend::Native`]
/// resolves to the portable path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Secp256k1Backend {
    /// Pure-Rust signing via `k256`.
    #[default]
    Portable,
    /// libsecp256k1 bindings, when compiled in.
    Native,
}

/// Derive the private scalar for a seed.
///
/// `validator` short-circuits to the stage-one root generator;
/// otherwise `account_index` selects the per-account offset.
pub(crate) fn derive_private_key(
    seed: &[u8],
    validator: bool,
    account_index: u32,
) -> Result<Scalar> {
    let root = derive_scalar(seed, None)?;
    if validator {
        return Ok(root);
    }
    let public_generator = compress(&(ProjectivePoint::GENERATOR * root));
    let offset = derive_scalar(&public_generator, Some(account_index))?;
    Ok(root + offset)
}

/// Compressed public key for a private scalar.
pub(crate) fn public_from_private(private: &Scalar) -> [u8; 33] {
    compress(&(ProjectivePoint::GENERATOR * private))
}

/// Recover an account public key from a compressed public generator
/// alone, without any private material: the account-0 offset scalar is
/// derived from the generator bytes and added on the curve.
///
/// This is how a network node's account key is obtained from its
/// published node public key.
pub fn account_public_from_generator(public_generator: &[u8; 33]) -> Result<[u8; 33]> {
    let generator = PublicKey::from_sec1_bytes(public_generator)
        .map_err(|_| KeyError::InvalidPublicKey)?;
    let offset = derive_scalar(public_generator, Some(0))?;
    let account = generator.to_projective() + ProjectivePoint::GENERATOR * offset;
    Ok(compress(&account))
}

/// Check that the bytes are a valid compressed curve point.
pub(crate) fn validate_public(public: &[u8; 33]) -> Result<()> {
    PublicKey::from_sec1_bytes(public)
        .map(|_| ())
        .map_err(|_| KeyError::InvalidPublicKey)
}

fn compress(point: &ProjectivePoint) -> [u8; 33] {
    let encoded = point.to_affine().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Sign `message` with the given raw private scalar bytes.
///
/// The message is pre-hashed with SHA-512-half; the result is a
/// canonical low-S signature in DER encoding.
pub(crate) fn sign(
    message: &[u8],
    private: &[u8; 32],
    backend: Secp256k1Backend,
) -> Result<Vec<u8>> {
    let digest = sha512_half(message);
    match backend {
        #[cfg(feature = "native-accel")]
        Secp256k1Backend::Native => native::sign_digest(&digest, private),
        _ => sign_digest(&digest, private),
    }
}

fn sign_digest(digest: &[u8; 32], private: &[u8; 32]) -> Result<Vec<u8>> {
    let signing_key =
        SigningKey::from_bytes(private.into()).map_err(|_| KeyError::InvalidPrivateKey)?;
    let signature: Signature = signing_key
        .sign_prehash(digest)
        .map_err(|_| KeyError::SigningFailed)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a DER signature over `message` against a compressed public key.
///
/// Total over adversarial input: malformed keys or signatures yield
/// `false`, never an error.
pub(crate) fn verify(message: &[u8], signature_der: &[u8], public: &[u8; 33]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public) else {
        return false;
    };
    let Ok(signature) = Signature::from_der(signature_der) else {
        return false;
    };
    let digest = sha512_half(message);
    verifying_key.verify_prehash(&digest, &signature).is_ok()
}

#[cfg(feature = "native-accel")]
mod native {
    //! libsecp256k1 signing path. libsecp is RFC 6979 deterministic and
    //! low-S by default, so its DER output matches the portable path
    //! byte for byte.

    use secp256k1::{Message, Secp256k1, SecretKey};

    use crate::error::{KeyError, Result};

    pub(super) fn sign_digest(digest: &[u8; 32], private: &[u8; 32]) -> Result<Vec<u8>> {
        let secp = Secp256k1::signing_only();
        let secret =
            SecretKey::from_slice(private).map_err(|_| KeyError::InvalidPrivateKey)?;
        let message = Message::from_digest(*digest);
        Ok(secp.sign_ecdsa(&message, &secret).serialize_der().to_vec())
    }
}
