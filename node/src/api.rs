// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Request bodies and fixed response texts of the HTTP capabilities.
//!
//! Broadcast, receive and acknowledge bodies are the kernel wire messages
//! (`BroadcastMessage`, `AcknowledgmentMessage`) decoded directly.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use proofcast_kernel::config::{REFERENCE_EXPECTED_HASH, REFERENCE_PROVIDED_HASH};

use crate::errors::NodeError;

pub const HEARTBEAT_OK: &str = "Service is alive!";
pub const BROADCAST_INITIATED: &str = "Broadcast initiated";
pub const DATA_ACCEPTED: &str = "Data accepted and stored";
pub const ACK_RECEIVED: &str = "Acknowledgment received";

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ProveRequest {
    /// Payload to digest. When absent the reference payload is used.
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct VerifyRequest {
    #[serde(rename = "providedHash")]
    pub provided_hash: String,
    #[serde(rename = "expectedHash")]
    pub expected_hash: String,
}

impl Default for VerifyRequest {
    fn default() -> Self {
        Self {
            provided_hash: REFERENCE_PROVIDED_HASH.to_string(),
            expected_hash: REFERENCE_EXPECTED_HASH.to_string(),
        }
    }
}

pub fn verification_result(verified: bool) -> String {
    format!("Verification result: {}", verified)
}

/// Decodes a JSON body regardless of the declared content type.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, NodeError> {
    serde_json::from_slice(body).map_err(|e| NodeError::MalformedBody(e.to_string()))
}

/// Like [`decode_body`], but an empty body yields `T::default()`.
pub fn decode_body_or_default<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, NodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    decode_body(body)
}
