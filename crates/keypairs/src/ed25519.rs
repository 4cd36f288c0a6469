//! Ed25519 key derivation and EdDSA signing.
//!
//! Derivation is single-stage: the secret is the first 32 bytes of
//! SHA-512 over the seed. There is no per-account-index scheme for this
//! algorithm; every seed maps to exactly one key pair. Encoded keys
//! carry the `0xED` discriminator byte in front of the 32-byte value,
//! and signatures are the standard 64-byte EdDSA form over the raw
//! message (no pre-hash, unlike secp256k1).

use ed25519_consensus::{Signature, SigningKey, VerificationKey};

use crate::hash::sha512_half;

/// Discriminator byte prefixed to encoded ed25519 keys.
pub(crate) const KEY_PREFIX: u8 = 0xED;

/// Derive the raw 32-byte secret for a seed.
pub(crate) fn derive_private_key(seed: &[u8]) -> [u8; 32] {
    sha512_half(seed)
}

/// Prefixed public key for a raw secret.
pub(crate) fn public_from_private(private: &[u8; 32]) -> [u8; 33] {
    let verification_key = SigningKey::from(*private).verification_key();
    let mut out = [0u8; 33];
    out[0] = KEY_PREFIX;
    out[1..].copy_from_slice(&verification_key.to_bytes());
    out
}

/// Sign the raw message, returning the 64-byte signature.
pub(crate) fn sign(message: &[u8], private: &[u8; 32]) -> Vec<u8> {
    SigningKey::from(*private).sign(message).to_bytes().to_vec()
}

/// Check that prefixed public key bytes decode to a curve point.
pub(crate) fn validate_public(public: &[u8; 33]) -> crate::error::Result<()> {
    match <[u8; 32]>::try_from(&public[1..]) {
        Ok(bytes) => VerificationKey::try_from(bytes)
            .map(|_| ())
            .map_err(|_| crate::error::KeyError::InvalidPublicKey),
        Err(_) => Err(crate::error::KeyError::InvalidPublicKey),
    }
}

/// Verify a signature against a prefixed public key.
///
/// Total over adversarial input: malformed keys or signatures yield
/// `false`, never an error.
pub(crate) fn verify(message: &[u8], signature: &[u8], public: &[u8; 33]) -> bool {
    let Ok(signature_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(&public[1..]) else {
        return false;
    };
    let Ok(verification_key) = VerificationKey::try_from(key_bytes) else {
        return false;
    };
    verification_key
        .verify(&Signature::from(signature_bytes), message)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_key_is_sha512_half_of_seed() {
        let seed = [9u8; 16];
        assert_eq!(derive_private_key(&seed), sha512_half(&seed));
    }

    #[test]
    fn test_public_key_is_prefixed() {
        let private = derive_private_key(&[9u8; 16]);
        let public = public_from_private(&private);
        assert_eq!(public[0], KEY_PREFIX);
        assert_eq!(public.len(), 33);
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let private = derive_private_key(&[9u8; 16]);
        let public = public_from_private(&private);
        let signature = sign(b"test message", &private);
        assert_eq!(signature.len(), 64);
        assert!(verify(b"test message", &signature, &public));
        assert!(!verify(b"other message", &signature, &public));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let private = derive_private_key(&[9u8; 16]);
        assert_eq!(sign(b"payload", &private), sign(b"payload", &private));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let private = derive_private_key(&[9u8; 16]);
        let public = public_from_private(&private);
        assert!(!verify(b"msg", &[], &public));
        assert!(!verify(b"msg", &[0u8; 64], &public));
        assert!(!verify(b"msg", &[0u8; 63], &public));
        // Decodable key bytes that do not match the signer.
        let mut bogus = [0xFFu8; 33];
        bogus[0] = KEY_PREFIX;
        assert!(!verify(b"msg", &sign(b"msg", &private), &bogus));
    }

    #[test]
    fn test_mutated_signature_fails() {
        let private = derive_private_key(&[9u8; 16]);
        let public = public_from_private(&private);
        let mut signature = sign(b"test message", &private);
        signature[10] ^= 0x01;
        assert!(!verify(b"test message", &signature, &public));
    }
}
