//! String-level operations.
//!
//! These functions mirror the conventional wallet-tooling surface:
//! seeds and addresses travel as base58 strings, keys and signatures as
//! uppercase hex. Algorithm dispatch is by inspection of the encoded
//! material itself, so callers never pass an algorithm tag alongside a
//! key. Everything bottoms out in [`KeyPair`].

use xrpl_addresscodec as codec;

use crate::error::Result;
use crate::keypair::{DeriveOptions, KeyPair};
use crate::seed::Seed;
use crate::KeyType;

/// Encode a new seed for the given algorithm.
///
/// With `entropy` the first 16 bytes are used directly; without it the
/// operating system generator is drawn from.
pub fn generate_seed(entropy: Option<&[u8]>, key_type: KeyType) -> Result<String> {
    let seed = match entropy {
        Some(entropy) => Seed::from_entropy(entropy, key_type)?,
        None => Seed::random(key_type),
    };
    Ok(seed.to_string())
}

/// Derive a key pair from an encoded seed. The seed string carries the
/// algorithm, so none is passed here.
pub fn derive_keypair(seed: &str, options: DeriveOptions) -> Result<KeyPair> {
    KeyPair::from_seed(seed.parse()?, options)
}

/// Derive a key pair from a human passphrase.
pub fn derive_keypair_from_phrase(
    phrase: &str,
    key_type: KeyType,
    options: DeriveOptions,
) -> Result<KeyPair> {
    KeyPair::from_seed(Seed::from_phrase(phrase, key_type), options)
}

/// Sign `message` with a hex-encoded private key, returning the
/// signature as uppercase hex. The key's leading byte selects the
/// algorithm.
pub fn sign(message: &[u8], private_key: &str) -> Result<String> {
    let bytes = hex::decode(private_key)?;
    let pair = KeyPair::from_private_bytes(&bytes)?;
    Ok(hex::encode_upper(pair.sign(message)?))
}

/// Verify a hex signature over `message` against a hex public key.
///
/// Total: undecodable signatures or keys are verification failures,
/// never errors.
pub fn verify(signature: &str, message: &[u8], public_key: &str) -> bool {
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };
    let Ok(public) = hex::decode(public_key) else {
        return false;
    };
    let Ok(pair) = KeyPair::from_public_bytes(&public) else {
        return false;
    };
    pair.verify(&signature, message)
}

/// Address of a hex-encoded public key.
///
/// The bytes are hashed as given; no curve validation is performed, so
/// this accepts any hex string and is deterministic over it.
pub fn derive_address(public_key: &str) -> Result<String> {
    let bytes = hex::decode(public_key)?;
    Ok(codec::encode_account_id(&crate::hash::account_id(&bytes)))
}

/// Whether a string is a well-formed account address.
pub fn is_valid_address(address: &str) -> bool {
    codec::decode_account_id(address).is_ok()
}

/// Derive validator (node) keys from an encoded seed.
///
/// Node keys are always secp256k1 root keys, so the seed's own
/// algorithm tag is ignored and its bytes are reinterpreted.
pub fn derive_node_keys(seed: &str) -> Result<KeyPair> {
    let (bytes, _) = codec::decode_seed(seed)?;
    KeyPair::from_seed(
        Seed::new(bytes, KeyType::Secp256k1),
        DeriveOptions {
            validator: true,
            ..Default::default()
        },
    )
}

/// Account address controlled by a node public key: the account-0
/// offset is applied on the curve, then the result is hashed.
pub fn node_public_to_account_id(node_public: &str) -> Result<String> {
    let public = codec::decode_node_public(node_public)?;
    let account_public = crate::secp256k1::account_public_from_generator(&public)?;
    Ok(codec::encode_account_id(&crate::hash::account_id(
        &account_public,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_seed_from_entropy_is_deterministic() {
        let entropy = [0x42u8; 16];
        let a = generate_seed(Some(&entropy), KeyType::Secp256k1).unwrap();
        let b = generate_seed(Some(&entropy), KeyType::Secp256k1).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with('s'));
    }

    #[test]
    fn test_generate_ed25519_seed_prefix() {
        let seed = generate_seed(None, KeyType::Ed25519).unwrap();
        assert!(seed.starts_with("sEd"));
    }

    #[test]
    fn test_random_seeds_differ() {
        let a = generate_seed(None, KeyType::Secp256k1).unwrap();
        let b = generate_seed(None, KeyType::Secp256k1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_derive_keypair_dispatches_on_seed() {
        let secp = derive_keypair("snoPBrXtMeMyMHUVTgbuqAfg1SUTb", DeriveOptions::default())
            .unwrap();
        assert_eq!(secp.key_type(), KeyType::Secp256k1);

        let ed_seed = generate_seed(Some(&[7u8; 16]), KeyType::Ed25519).unwrap();
        let ed = derive_keypair(&ed_seed, DeriveOptions::default()).unwrap();
        assert_eq!(ed.key_type(), KeyType::Ed25519);
    }

    #[test]
    fn test_sign_verify_by_hex_strings() {
        let pair = derive_keypair_from_phrase(
            "masterpassphrase",
            KeyType::Secp256k1,
            DeriveOptions::default(),
        )
        .unwrap();
        let private_hex = hex::encode_upper(pair.private_bytes().unwrap());
        let public_hex = hex::encode_upper(pair.public_bytes().unwrap());

        let signature = sign(b"hello", &private_hex).unwrap();
        assert!(verify(&signature, b"hello", &public_hex));
        assert!(!verify(&signature, b"goodbye", &public_hex));
    }

    #[test]
    fn test_verify_is_total_over_garbage() {
        let pair = derive_keypair_from_phrase(
            "masterpassphrase",
            KeyType::Secp256k1,
            DeriveOptions::default(),
        )
        .unwrap();
        let public_hex = hex::encode_upper(pair.public_bytes().unwrap());

        assert!(!verify("not hex", b"msg", &public_hex));
        assert!(!verify("3044", b"msg", "also not hex"));
        assert!(!verify("3044", b"msg", "ABCD"));
        assert!(!verify("", b"msg", &public_hex));
    }

    #[test]
    fn test_derive_address_is_permissive() {
        // Hashing does not validate the point, only the hex.
        assert!(derive_address("DEADBEEF").is_ok());
        assert!(derive_address("not hex").is_err());
    }

    #[test]
    fn test_master_keypair_address() {
        let pair = derive_keypair("snoPBrXtMeMyMHUVTgbuqAfg1SUTb", DeriveOptions::default())
            .unwrap();
        let public_hex = hex::encode_upper(pair.public_bytes().unwrap());
        assert_eq!(
            derive_address(&public_hex).unwrap(),
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
        );
    }

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert!(!is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi"));
        assert!(!is_valid_address("sHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("r"));
    }

    #[test]
    fn test_derive_node_keys_ignores_seed_algorithm() {
        // An ed25519-tagged seed still yields secp256k1 node keys.
        let ed_seed = generate_seed(Some(&[7u8; 16]), KeyType::Ed25519).unwrap();
        let node = derive_node_keys(&ed_seed).unwrap();
        assert_eq!(node.key_type(), KeyType::Secp256k1);
        assert!(node.is_validator());
    }

    #[test]
    fn test_node_public_round_trip_to_account() {
        let node = derive_node_keys("snoPBrXtMeMyMHUVTgbuqAfg1SUTb").unwrap();
        let node_public =
            xrpl_addresscodec::encode_node_public(&node.public_bytes().unwrap());

        // The node's account address equals the account-0 address of the
        // same seed.
        let account =
            derive_keypair("snoPBrXtMeMyMHUVTgbuqAfg1SUTb", DeriveOptions::default()).unwrap();
        assert_eq!(
            node_public_to_account_id(&node_public).unwrap(),
            account.address().unwrap()
        );
    }
}
