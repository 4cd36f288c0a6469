//! Base58-check codec for XRP Ledger identifiers
//!
//! The ledger encodes seeds, account ids, and public keys with its own
//! base58 alphabet and a 4-byte double-SHA-256 checksum. Each string form
//! carries a type prefix that fixes its leading character:
//!
//! - account id: prefix `0x00`, strings start with `r`
//! - account public key: prefix `0x23`, strings start with `a`
//! - family seed (secp256k1): prefix `0x21`, strings start with `s`
//! - ed25519 seed: prefix `0x01 0xE1 0x4B`, strings start with `sEd`
//! - node public key: prefix `0x1C`, strings start with `n`
//!
//! All decoders validate the checksum, the type prefix, and the payload
//! length, and fail with [`CodecError`] otherwise.

use bs58::Alphabet;
use thiserror::Error;

/// Length of a decoded seed payload.
pub const SEED_BYTES: usize = 16;

/// Length of a decoded account id payload.
pub const ACCOUNT_ID_BYTES: usize = 20;

/// Length of a compressed public key payload.
pub const PUBLIC_KEY_BYTES: usize = 33;

const ACCOUNT_ID_PREFIX: &[u8] = &[0x00];
const ACCOUNT_PUBLIC_PREFIX: &[u8] = &[0x23];
const FAMILY_SEED_PREFIX: &[u8] = &[0x21];
const ED25519_SEED_PREFIX: &[u8] = &[0x01, 0xE1, 0x4B];
const NODE_PUBLIC_PREFIX: &[u8] = &[0x1C];

/// Signature algorithm tag carried by an encoded seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// ECDSA over secp256k1.
    Secp256k1,
    /// EdDSA over edwards25519.
    Ed25519,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Secp256k1 => f.write_str("secp256k1"),
            Algorithm::Ed25519 => f.write_str("ed25519"),
        }
    }
}

/// Codec errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not valid base58 in the ledger alphabet
    #[error("invalid base58 string")]
    InvalidBase58,

    /// Checksum did not match the payload
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// Decoded bytes did not carry the expected type prefix
    #[error("unexpected type prefix")]
    UnexpectedPrefix,

    /// Decoded payload had the wrong length
    #[error("payload is {actual} bytes, expected {expected}")]
    WrongLength {
        /// Required payload length
        expected: usize,
        /// Length actually decoded
        actual: usize,
    },
}

fn encode_versioned(prefix: &[u8], payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(prefix.len() + payload.len());
    buf.extend_from_slice(prefix);
    buf.extend_from_slice(payload);
    bs58::encode(buf)
        .with_alphabet(Alphabet::RIPPLE)
        .with_check()
        .into_string()
}

fn decode_checked(input: &str) -> Result<Vec<u8>, CodecError> {
    bs58::decode(input)
        .with_alphabet(Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidChecksum { .. } => CodecError::ChecksumMismatch,
            _ => CodecError::InvalidBase58,
        })
}

fn decode_versioned(
    prefix: &[u8],
    expected_len: usize,
    input: &str,
) -> Result<Vec<u8>, CodecError> {
    let decoded = decode_checked(input)?;
    let payload = decoded
        .strip_prefix(prefix)
        .ok_or(CodecError::UnexpectedPrefix)?;
    if payload.len() != expected_len {
        return Err(CodecError::WrongLength {
            expected: expected_len,
            actual: payload.len(),
        });
    }
    Ok(payload.to_vec())
}

/// Encode a 16-byte seed with the prefix of the given algorithm.
pub fn encode_seed(entropy: &[u8; SEED_BYTES], algorithm: Algorithm) -> String {
    let prefix = match algorithm {
        Algorithm::Secp256k1 => FAMILY_SEED_PREFIX,
        Algorithm::Ed25519 => ED25519_SEED_PREFIX,
    };
    encode_versioned(prefix, entropy)
}

/// Decode a seed string into its 16-byte payload and algorithm tag.
///
/// The ed25519 prefix is a superset of the family-seed space, so it is
/// tried first.
pub fn decode_seed(input: &str) -> Result<([u8; SEED_BYTES], Algorithm), CodecError> {
    let decoded = decode_checked(input)?;
    let (algorithm, payload) = if let Some(p) = decoded.strip_prefix(ED25519_SEED_PREFIX) {
        (Algorithm::Ed25519, p)
    } else if let Some(p) = decoded.strip_prefix(FAMILY_SEED_PREFIX) {
        (Algorithm::Secp256k1, p)
    } else {
        return Err(CodecError::UnexpectedPrefix);
    };
    let bytes: [u8; SEED_BYTES] = payload.try_into().map_err(|_| CodecError::WrongLength {
        expected: SEED_BYTES,
        actual: payload.len(),
    })?;
    Ok((bytes, algorithm))
}

/// Encode a 20-byte account id as an `r...` address.
pub fn encode_account_id(id: &[u8; ACCOUNT_ID_BYTES]) -> String {
    encode_versioned(ACCOUNT_ID_PREFIX, id)
}

/// Decode an `r...` address into its 20-byte account id.
pub fn decode_account_id(input: &str) -> Result<[u8; ACCOUNT_ID_BYTES], CodecError> {
    let payload = decode_versioned(ACCOUNT_ID_PREFIX, ACCOUNT_ID_BYTES, input)?;
    let mut out = [0u8; ACCOUNT_ID_BYTES];
    out.copy_from_slice(&payload);
    Ok(out)
}

/// Encode a 33-byte compressed account public key as an `a...` string.
pub fn encode_account_public(key: &[u8; PUBLIC_KEY_BYTES]) -> String {
    encode_versioned(ACCOUNT_PUBLIC_PREFIX, key)
}

/// Decode an `a...` account public key string.
pub fn decode_account_public(input: &str) -> Result<[u8; PUBLIC_KEY_BYTES], CodecError> {
    let payload = decode_versioned(ACCOUNT_PUBLIC_PREFIX, PUBLIC_KEY_BYTES, input)?;
    let mut out = [0u8; PUBLIC_KEY_BYTES];
    out.copy_from_slice(&payload);
    Ok(out)
}

/// Encode a 33-byte compressed node public key as an `n...` string.
pub fn encode_node_public(key: &[u8; PUBLIC_KEY_BYTES]) -> String {
    encode_versioned(NODE_PUBLIC_PREFIX, key)
}

/// Decode an `n...` node public key string.
pub fn decode_node_public(input: &str) -> Result<[u8; PUBLIC_KEY_BYTES], CodecError> {
    let payload = decode_versioned(NODE_PUBLIC_PREFIX, PUBLIC_KEY_BYTES, input)?;
    let mut out = [0u8; PUBLIC_KEY_BYTES];
    out.copy_from_slice(&payload);
    Ok(out)
}
