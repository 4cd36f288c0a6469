//! The algorithm-agnostic key pair.
//!
//! A [`KeyPair`] is a closed tagged variant over the two ledger
//! algorithms. It holds whichever material it was constructed from
//! (seed, raw private bytes, or raw public bytes) and memoizes the
//! derived fields on first access. All derivations are pure, so a
//! concurrent first access at worst recomputes the same value.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use xrpl_addresscodec as codec;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::derive::{scalar_from_bytes, scalar_to_bytes};
use crate::ed25519;
use crate::error::{KeyError, Result};
use crate::hash;
use crate::secp256k1::{self, Secp256k1Backend};
use crate::seed::Seed;
use crate::KeyType;

/// Options accepted when deriving a key pair from a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeriveOptions {
    /// Derive the validator (root) key instead of an account key.
    /// Only meaningful for secp256k1.
    pub validator: bool,
    /// Account index mixed into the secp256k1 offset stage. Ignored by
    /// ed25519, which has single-account semantics.
    pub account_index: u32,
    /// Signing backend for secp256k1 operations.
    pub backend: Secp256k1Backend,
}

/// What the key pair was constructed from.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
enum KeyMaterial {
    Seed(Seed),
    Private([u8; 32]),
    PublicOnly,
}

/// A deterministic ledger key pair.
pub struct KeyPair {
    key_type: KeyType,
    validator: bool,
    account_index: u32,
    backend: Secp256k1Backend,
    material: KeyMaterial,
    private: OnceLock<[u8; 32]>,
    public: OnceLock<[u8; 33]>,
    account_id: OnceLock<[u8; 20]>,
}

/// Fallible sibling of `OnceLock::get_or_init`. Losing an init race
/// just recomputes a pure value; both results are identical.
fn get_or_try_init<T, F>(cell: &OnceLock<T>, init: F) -> Result<&T>
where
    F: FnOnce() -> Result<T>,
{
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

impl KeyPair {
    fn empty(key_type: KeyType, material: KeyMaterial, options: DeriveOptions) -> Self {
        Self {
            key_type,
            validator: options.validator,
            account_index: options.account_index,
            backend: options.backend,
            material,
            private: OnceLock::new(),
            public: OnceLock::new(),
            account_id: OnceLock::new(),
        }
    }

    /// Derive a key pair from a seed. The seed's tag selects the
    /// algorithm; `options.validator` is rejected for ed25519.
    pub fn from_seed(seed: Seed, options: DeriveOptions) -> Result<Self> {
        if options.validator && seed.key_type() != KeyType::Secp256k1 {
            return Err(KeyError::ValidatorKeyType);
        }
        let key_type = seed.key_type();
        Ok(Self::empty(key_type, KeyMaterial::Seed(seed), options))
    }

    /// Build a key pair from raw private key bytes.
    ///
    /// Accepts the type-prefixed 33-byte form (`0xED` tags ed25519,
    /// `0x00` tags secp256k1) or a bare 32-byte secp256k1 scalar.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self> {
        let (key_type, raw) = match bytes.len() {
            33 if bytes[0] == ed25519::KEY_PREFIX => (KeyType::Ed25519, &bytes[1..]),
            33 if bytes[0] == 0x00 => (KeyType::Secp256k1, &bytes[1..]),
            32 => (KeyType::Secp256k1, bytes),
            _ => return Err(KeyError::InvalidPrivateKey),
        };
        let raw: [u8; 32] = raw.try_into().map_err(|_| KeyError::InvalidPrivateKey)?;
        if key_type == KeyType::Secp256k1 && scalar_from_bytes(&raw).is_none() {
            return Err(KeyError::InvalidPrivateKey);
        }
        Ok(Self::empty(
            key_type,
            KeyMaterial::Private(raw),
            DeriveOptions::default(),
        ))
    }

    /// Build a verification-only key pair from 33 public key bytes.
    /// A leading `0xED` tags ed25519; anything else is secp256k1.
    pub fn from_public_bytes(bytes: &[u8]) -> Result<Self> {
        let public: [u8; 33] = bytes.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        let key_type = sniff_key_type(&public);
        match key_type {
            KeyType::Secp256k1 => secp256k1::validate_public(&public)?,
            KeyType::Ed25519 => ed25519::validate_public(&public)?,
        }
        let pair = Self::empty(key_type, KeyMaterial::PublicOnly, DeriveOptions::default());
        let _ = pair.public.set(public);
        Ok(pair)
    }

    /// The algorithm of this key pair.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Whether this is a validator (root-derivation) key pair.
    pub fn is_validator(&self) -> bool {
        self.validator
    }

    /// True iff the pair was constructed with seed or private bytes.
    pub fn has_private_key(&self) -> bool {
        !matches!(self.material, KeyMaterial::PublicOnly)
    }

    fn private_raw(&self) -> Result<&[u8; 32]> {
        match &self.material {
            KeyMaterial::Private(raw) => Ok(raw),
            KeyMaterial::Seed(seed) => get_or_try_init(&self.private, || match self.key_type {
                KeyType::Secp256k1 => {
                    let scalar = secp256k1::derive_private_key(
                        seed.as_bytes(),
                        self.validator,
                        self.account_index,
                    )?;
                    Ok(scalar_to_bytes(&scalar))
                }
                KeyType::Ed25519 => Ok(ed25519::derive_private_key(seed.as_bytes())),
            }),
            KeyMaterial::PublicOnly => Err(KeyError::MissingPrivateKey),
        }
    }

    /// Canonical type-prefixed private key encoding: `0x00` plus the
    /// scalar for secp256k1, `0xED` plus the secret for ed25519.
    pub fn private_bytes(&self) -> Result<[u8; 33]> {
        let raw = self.private_raw()?;
        let mut out = [0u8; 33];
        out[0] = match self.key_type {
            KeyType::Secp256k1 => 0x00,
            KeyType::Ed25519 => ed25519::KEY_PREFIX,
        };
        out[1..].copy_from_slice(raw);
        Ok(out)
    }

    /// Canonical public key encoding: compressed SEC1 for secp256k1,
    /// `0xED` plus the point for ed25519.
    pub fn public_bytes(&self) -> Result<[u8; 33]> {
        get_or_try_init(&self.public, || {
            let raw = self.private_raw()?;
            Ok(match self.key_type {
                KeyType::Secp256k1 => {
                    let scalar =
                        scalar_from_bytes(raw).ok_or(KeyError::InvalidPrivateKey)?;
                    secp256k1::public_from_private(&scalar)
                }
                KeyType::Ed25519 => ed25519::public_from_private(raw),
            })
        })
        .copied()
    }

    /// The 20-byte account identifier of the public key.
    pub fn account_id(&self) -> Result<[u8; 20]> {
        get_or_try_init(&self.account_id, || {
            Ok(hash::account_id(&self.public_bytes()?))
        })
        .copied()
    }

    /// The account identifier in its `r...` address form.
    pub fn address(&self) -> Result<String> {
        Ok(codec::encode_account_id(&self.account_id()?))
    }

    /// Sign a message. Secp256k1 pre-hashes with SHA-512-half and
    /// returns canonical DER; ed25519 signs the raw message and returns
    /// the 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        match self.key_type {
            KeyType::Secp256k1 => secp256k1::sign(message, self.private_raw()?, self.backend),
            KeyType::Ed25519 => Ok(ed25519::sign(message, self.private_raw()?)),
        }
    }

    /// Verify a signature over a message. Never errors: any malformed
    /// input is a verification failure.
    pub fn verify(&self, signature: &[u8], message: &[u8]) -> bool {
        let Ok(public) = self.public_bytes() else {
            return false;
        };
        match self.key_type {
            KeyType::Secp256k1 => secp256k1::verify(message, signature, &public),
            KeyType::Ed25519 => ed25519::verify(message, signature, &public),
        }
    }

    /// Export the key pair for JSON serialization. Validator key pairs
    /// use the node-public string form and omit the account id, since
    /// they are not conventional ledger accounts.
    pub fn export(&self) -> Result<KeyPairExport> {
        let public = self.public_bytes()?;
        let public_key = if self.validator {
            codec::encode_node_public(&public)
        } else {
            codec::encode_account_public(&public)
        };
        let id = if self.validator {
            None
        } else {
            Some(self.address()?)
        };
        let seed = match &self.material {
            KeyMaterial::Seed(seed) => Some(seed.to_string()),
            _ => None,
        };
        let private_key = if self.has_private_key() {
            Some(hex::encode_upper(self.private_bytes()?))
        } else {
            None
        };
        Ok(KeyPairExport {
            public_key,
            id,
            seed,
            private_key,
        })
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("KeyPair");
        dbg.field("key_type", &self.key_type)
            .field("validator", &self.validator);
        if let Ok(public) = self.public_bytes() {
            dbg.field("public_key", &hex::encode(&public[..8]));
        }
        dbg.finish_non_exhaustive()
    }
}

/// The sniffing rule shared with the dispatch API: 33 bytes with a
/// leading `0xED` is ed25519, everything else secp256k1.
pub(crate) fn sniff_key_type(bytes: &[u8]) -> KeyType {
    if bytes.len() == 33 && bytes[0] == ed25519::KEY_PREFIX {
        KeyType::Ed25519
    } else {
        KeyType::Secp256k1
    }
}

/// JSON shape of an exported key pair. Field names follow the ledger
/// ecosystem's camelCase convention; absent material is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPairExport {
    /// Node-public form for validators, account-public form otherwise.
    pub public_key: String,
    /// Account address; absent for validator key pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Seed string, when the pair was derived from a seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Type-prefixed private key hex, when private material exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}
