//! Deterministic key pairs for the XRP Ledger.
//!
//! Everything starts from a 16-byte [`Seed`] tagged with one of the two
//! ledger signature algorithms. From a seed this crate derives private
//! and public keys, 20-byte account identifiers and their `r...`
//! address form, signs messages, and verifies signatures, producing
//! byte-for-byte the same material as the reference ledger
//! implementation.
//!
//! # Algorithms
//!
//! * **secp256k1** - two-stage derivation (root generator scalar, then
//!   a per-account offset), ECDSA over the SHA-512-half of the message,
//!   canonical low-S DER signatures. Validator (node) keys use the root
//!   scalar directly.
//! * **ed25519** - single-stage derivation, EdDSA over the raw message,
//!   64-byte signatures. Encoded keys carry a `0xED` discriminator.
//!
//! # Example
//!
//! ```
//! use xrpl_keypairs::{derive_keypair, DeriveOptions};
//!
//! let pair = derive_keypair("snoPBrXtMeMyMHUVTgbuqAfg1SUTb", DeriveOptions::default())?;
//! assert_eq!(pair.address()?, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
//!
//! let signature = pair.sign(b"important message")?;
//! assert!(pair.verify(&signature, b"important message"));
//! # Ok::<(), xrpl_keypairs::KeyError>(())
//! ```

pub mod api;
pub mod error;
pub mod hash;
pub mod keypair;
pub mod secp256k1;
pub mod seed;

mod derive;
mod ed25519;

pub use api::{
    derive_address, derive_keypair, derive_keypair_from_phrase, derive_node_keys, generate_seed,
    is_valid_address, node_public_to_account_id, sign, verify,
};
pub use error::{KeyError, Result};
pub use keypair::{DeriveOptions, KeyPair, KeyPairExport};
pub use secp256k1::{account_public_from_generator, Secp256k1Backend};
pub use seed::{Seed, SEED_BYTES};

/// The ledger's signature algorithms, as carried by encoded seeds.
pub use xrpl_addresscodec::Algorithm as KeyType;
