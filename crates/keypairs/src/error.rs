//! Key derivation and signing error types

use thiserror::Error;
use xrpl_addresscodec::CodecError;

/// Errors raised by key construction, derivation, and signing.
///
/// Verification never returns these: malformed signatures or keys passed
/// to a verify call surface as a plain `false`.
// No `Eq`: `hex::FromHexError` only implements `PartialEq`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyError {
    /// Supplied entropy was shorter than a seed
    #[error("entropy must be at least 16 bytes, got {0}")]
    EntropyTooShort(usize),

    /// A seed, address, or key string failed base58 decoding
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A key string was not valid hex
    #[error("invalid hex encoding")]
    InvalidHex(#[from] hex::FromHexError),

    /// Private key bytes were not a valid key for the tagged algorithm
    #[error("invalid private key bytes")]
    InvalidPrivateKey,

    /// Public key bytes were not a valid curve point
    #[error("invalid public key bytes")]
    InvalidPublicKey,

    /// Validator keys exist only for secp256k1
    #[error("validator key pairs must use secp256k1")]
    ValidatorKeyType,

    /// Sign was called on a key pair holding only public material
    #[error("key pair holds no private key material")]
    MissingPrivateKey,

    /// The ECDSA backend rejected the signing request
    #[error("signing failed")]
    SigningFailed,

    /// The u32 counter space of the scalar derivation loop ran out.
    /// Unreachable with a working hash function; kept as a hard guard.
    #[error("scalar derivation counter space exhausted")]
    DerivationExhausted,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, KeyError>;
