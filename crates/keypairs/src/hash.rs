//! Hashing utilities.
//!
//! The ledger's derivation and signing paths hash concatenated byte
//! strings with SHA-512 and keep the first half of the digest.
//! [`Sha512Half`] is the streaming accumulator behind that; account
//! identifiers are RIPEMD-160 over SHA-256 of a public key.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// Streaming SHA-512 accumulator with a half-digest finalizer.
///
/// A fresh instance is constructed per derivation attempt; nothing is
/// shared between calls.
#[derive(Default)]
pub struct Sha512Half {
    inner: Sha512,
}

impl Sha512Half {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte string.
    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    /// Append a 32-bit integer in big-endian byte order.
    pub fn update_u32(&mut self, value: u32) {
        self.inner.update(value.to_be_bytes());
    }

    /// Finalize to the full 64-byte digest.
    pub fn finish(self) -> [u8; 64] {
        let digest = self.inner.finalize();
        let mut out = [0u8; 64];
        out.copy_from_slice(&digest);
        out
    }

    /// Finalize and keep the first 32 bytes of the digest.
    pub fn finish_half(self) -> [u8; 32] {
        let digest = self.finish();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest[..32]);
        out
    }
}

/// First 32 bytes of SHA-512 over `data`.
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512Half::new();
    hasher.update(data);
    hasher.finish_half()
}

/// Derive the 20-byte account identifier of a canonical public key:
/// RIPEMD-160 over SHA-256.
pub fn account_id(public_key: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(public_key);
    Ripemd160::digest(sha).into()
}
