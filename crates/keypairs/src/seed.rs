//! Seeds: the deterministic root of a key pair.
//!
//! A seed is 16 bytes of entropy tagged with a signature algorithm. It
//! comes from fresh entropy, from the first 16 bytes of SHA-512 over a
//! human phrase, or from its base58 string form. The bytes are zeroed
//! when the value is dropped.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KeyError, Result};
use crate::hash::sha512_half;
use crate::KeyType;

/// Seed length in bytes.
pub const SEED_BYTES: usize = xrpl_addresscodec::SEED_BYTES;

/// A 16-byte seed plus its algorithm tag. Immutable once created.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_BYTES],
    #[zeroize(skip)]
    key_type: KeyType,
}

impl Seed {
    /// Wrap existing seed bytes.
    pub fn new(bytes: [u8; SEED_BYTES], key_type: KeyType) -> Self {
        Self { bytes, key_type }
    }

    /// Draw a fresh seed from the given secure generator.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R, key_type: KeyType) -> Self {
        let mut bytes = [0u8; SEED_BYTES];
        rng.fill_bytes(&mut bytes);
        Self::new(bytes, key_type)
    }

    /// Draw a fresh seed from the operating system generator.
    pub fn random(key_type: KeyType) -> Self {
        Self::generate(&mut OsRng, key_type)
    }

    /// Build a seed from caller-supplied entropy, which must be at
    /// least 16 bytes; extra bytes are truncated.
    pub fn from_entropy(entropy: &[u8], key_type: KeyType) -> Result<Self> {
        if entropy.len() < SEED_BYTES {
            return Err(KeyError::EntropyTooShort(entropy.len()));
        }
        let mut bytes = [0u8; SEED_BYTES];
        bytes.copy_from_slice(&entropy[..SEED_BYTES]);
        Ok(Self::new(bytes, key_type))
    }

    /// Hash a human phrase down to a seed: the first 16 bytes of
    /// SHA-512 over the phrase's bytes.
    pub fn from_phrase(phrase: &str, key_type: KeyType) -> Self {
        let digest = sha512_half(phrase.as_bytes());
        let mut bytes = [0u8; SEED_BYTES];
        bytes.copy_from_slice(&digest[..SEED_BYTES]);
        Self::new(bytes, key_type)
    }

    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_BYTES] {
        &self.bytes
    }

    /// The algorithm this seed derives keys for.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&xrpl_addresscodec::encode_seed(&self.bytes, self.key_type))
    }
}

impl FromStr for Seed {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        let (bytes, key_type) = xrpl_addresscodec::decode_seed(s)?;
        Ok(Self::new(bytes, key_type))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("key_type", &self.key_type)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
