// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::DIGEST_HEX_LEN;
use crate::digest::{prove, verify, ContentDigest};

const SECRET_DATA_DIGEST: &str = "594fe9cd56ba213c385ba5b92f752662d6485aa366d350be792ee82ef7c596eb";

#[test]
fn test_prove_known_vectors() {
    assert_eq!(prove("secret_data").as_str(), SECRET_DATA_DIGEST);
    // SHA-256 of the empty string
    assert_eq!(
        prove("").as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_prove_is_deterministic() {
    let inputs = ["", "a", "secret_data", "ünïcødé payload", "line\nbreak"];
    for input in inputs {
        let first = prove(input);
        for _ in 0..8 {
            assert_eq!(prove(input), first, "digest drifted for {:?}", input);
        }
        assert_eq!(first.as_str().len(), DIGEST_HEX_LEN);
        assert!(first.is_well_formed());
    }
}

#[test]
fn test_distinct_inputs_distinct_digests() {
    let mut seen = std::collections::HashSet::new();
    for i in 0..512 {
        let digest = prove(format!("payload-{}", i));
        assert!(seen.insert(digest), "collision at payload-{}", i);
    }
    // Bytes and str of the same content agree.
    assert_eq!(prove(b"secret_data"), prove("secret_data"));
}

#[test]
fn test_verify_exact_equality() {
    let x = prove("secret_data");
    let y = prove("secret_datA");
    assert!(verify(&x, &x.clone()));
    assert!(!verify(&x, &y));

    // Case and length both matter.
    let upper = ContentDigest::from(x.as_str().to_uppercase());
    assert!(!verify(&x, &upper));
    let truncated = ContentDigest::from(&x.as_str()[..DIGEST_HEX_LEN - 1]);
    assert!(!verify(&x, &truncated));

    // Arbitrary caller strings are compared verbatim.
    assert!(!verify(&"some_hash_value".into(), &"some_expected_hash_value".into()));
    assert!(verify(&"abc".into(), &"abc".into()));
}

#[test]
fn test_well_formed() {
    assert!(ContentDigest::from(SECRET_DATA_DIGEST).is_well_formed());
    assert!(!ContentDigest::from(SECRET_DATA_DIGEST.to_uppercase()).is_well_formed());
    assert!(!ContentDigest::from("deadbeef").is_well_formed());
    assert!(!ContentDigest::from("").is_well_formed());
}

#[test]
fn test_digest_serializes_as_plain_string() {
    let digest = prove("secret_data");
    let json = serde_json::to_string(&digest).unwrap();
    assert_eq!(json, format!("\"{}\"", SECRET_DATA_DIGEST));
    let back: ContentDigest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, digest);
}
