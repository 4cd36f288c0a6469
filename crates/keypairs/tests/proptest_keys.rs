//! Property-based tests for seed derivation, signing and verification
//!
//! Uses proptest to verify key invariants across many randomly generated inputs.

use proptest::prelude::*;
use xrpl_keypairs::{
    account_public_from_generator, DeriveOptions, KeyPair, KeyType, Seed,
};

fn key_type_strategy() -> impl Strategy<Value = KeyType> {
    prop_oneof![Just(KeyType::Secp256k1), Just(KeyType::Ed25519)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: Seed string roundtrip
    ///
    /// Encoding a seed and parsing it back preserves bytes and algorithm.
    #[test]
    fn prop_seed_string_roundtrip(
        bytes in any::<[u8; 16]>(),
        key_type in key_type_strategy()
    ) {
        let seed = Seed::new(bytes, key_type);
        let restored: Seed = seed.to_string().parse().expect("should parse own encoding");
        prop_assert_eq!(restored.as_bytes(), &bytes);
        prop_assert_eq!(restored.key_type(), key_type);
    }

    /// Property: Derivation determinism
    ///
    /// The same seed and options always produce identical key material.
    #[test]
    fn prop_derivation_determinism(
        bytes in any::<[u8; 16]>(),
        key_type in key_type_strategy()
    ) {
        let a = KeyPair::from_seed(Seed::new(bytes, key_type), DeriveOptions::default())
            .expect("derive a");
        let b = KeyPair::from_seed(Seed::new(bytes, key_type), DeriveOptions::default())
            .expect("derive b");
        prop_assert_eq!(a.private_bytes().unwrap(), b.private_bytes().unwrap());
        prop_assert_eq!(a.public_bytes().unwrap(), b.public_bytes().unwrap());
        prop_assert_eq!(a.account_id().unwrap(), b.account_id().unwrap());
    }

    /// Property: Public key shape
    ///
    /// Derived public keys are 33 bytes with the algorithm's tag byte.
    #[test]
    fn prop_public_key_shape(
        bytes in any::<[u8; 16]>(),
        key_type in key_type_strategy()
    ) {
        let pair = KeyPair::from_seed(Seed::new(bytes, key_type), DeriveOptions::default())
            .expect("derive");
        let public = pair.public_bytes().unwrap();
        match key_type {
            KeyType::Secp256k1 => prop_assert!(public[0] == 0x02 || public[0] == 0x03),
            KeyType::Ed25519 => prop_assert_eq!(public[0], 0xED),
        }
    }

    /// Property: Sign/verify roundtrip with mutation rejection
    ///
    /// A fresh signature verifies; flipping any single bit of it or of
    /// the message does not.
    #[test]
    fn prop_sign_verify_and_mutation(
        bytes in any::<[u8; 16]>(),
        key_type in key_type_strategy(),
        message in prop::collection::vec(any::<u8>(), 1..256),
        flip_bit in 0usize..64
    ) {
        let pair = KeyPair::from_seed(Seed::new(bytes, key_type), DeriveOptions::default())
            .expect("derive");
        let signature = pair.sign(&message).expect("sign");
        prop_assert!(pair.verify(&signature, &message));

        let mut mutated = signature.clone();
        let index = flip_bit % (mutated.len() * 8);
        mutated[index / 8] ^= 1 << (index % 8);
        prop_assert!(!pair.verify(&mutated, &message));

        let mut other = message.clone();
        other[0] ^= 0x01;
        prop_assert!(!pair.verify(&signature, &other));
    }

    /// Property: Cross-construction consistency
    ///
    /// Rebuilding a pair from its exported private bytes preserves the
    /// algorithm and all derived material.
    #[test]
    fn prop_cross_construction(
        bytes in any::<[u8; 16]>(),
        key_type in key_type_strategy()
    ) {
        let original = KeyPair::from_seed(Seed::new(bytes, key_type), DeriveOptions::default())
            .expect("derive");
        let rebuilt = KeyPair::from_private_bytes(&original.private_bytes().unwrap())
            .expect("rebuild");
        prop_assert_eq!(rebuilt.key_type(), key_type);
        prop_assert_eq!(rebuilt.public_bytes().unwrap(), original.public_bytes().unwrap());
        prop_assert_eq!(rebuilt.address().unwrap(), original.address().unwrap());
    }

    /// Property: Validator key differs from every early account key
    #[test]
    fn prop_validator_differs_from_accounts(
        bytes in any::<[u8; 16]>(),
        account_index in 0u32..8
    ) {
        let validator = KeyPair::from_seed(
            Seed::new(bytes, KeyType::Secp256k1),
            DeriveOptions { validator: true, ..Default::default() },
        ).expect("derive validator");
        let account = KeyPair::from_seed(
            Seed::new(bytes, KeyType::Secp256k1),
            DeriveOptions { account_index, ..Default::default() },
        ).expect("derive account");
        prop_assert_ne!(
            validator.public_bytes().unwrap(),
            account.public_bytes().unwrap()
        );
    }

    /// Property: Account key recovery from the public generator
    ///
    /// The validator public key is the public generator; applying the
    /// account-0 offset to it alone must land on the account-0 key.
    #[test]
    fn prop_account_recovery_from_generator(bytes in any::<[u8; 16]>()) {
        let validator = KeyPair::from_seed(
            Seed::new(bytes, KeyType::Secp256k1),
            DeriveOptions { validator: true, ..Default::default() },
        ).expect("derive validator");
        let account = KeyPair::from_seed(
            Seed::new(bytes, KeyType::Secp256k1),
            DeriveOptions::default(),
        ).expect("derive account");
        let recovered = account_public_from_generator(&validator.public_bytes().unwrap())
            .expect("recover");
        prop_assert_eq!(recovered, account.public_bytes().unwrap());
    }

    /// Property: Distinct account indices yield distinct addresses
    #[test]
    fn prop_account_indices_distinct(
        bytes in any::<[u8; 16]>(),
        index1 in 0u32..16,
        index2 in 16u32..32
    ) {
        let a = KeyPair::from_seed(
            Seed::new(bytes, KeyType::Secp256k1),
            DeriveOptions { account_index: index1, ..Default::default() },
        ).expect("derive a");
        let b = KeyPair::from_seed(
            Seed::new(bytes, KeyType::Secp256k1),
            DeriveOptions { account_index: index2, ..Default::default() },
        ).expect("derive b");
        prop_assert_ne!(a.address().unwrap(), b.address().unwrap());
    }
}
