// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants.

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Capability path a peer exposes for inbound broadcasts.
pub const RECEIVE_PATH: &str = "/receive";

/// Capability path an origin exposes for inbound acknowledgments.
pub const ACKNOWLEDGE_PATH: &str = "/acknowledge";

/// Payload used by the standalone prove capability when the caller supplies none.
pub const REFERENCE_PROVE_DATA: &str = "secret_data";

/// Digests compared by the standalone verify capability when the caller supplies none.
pub const REFERENCE_PROVIDED_HASH: &str = "some_hash_value";
pub const REFERENCE_EXPECTED_HASH: &str = "some_expected_hash_value";
