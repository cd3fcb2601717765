// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Messages exchanged between nodes. Field names match the JSON wire format.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::digest::{prove, verify, ContentDigest};

/// Payload plus its claimed digest, fanned out to every peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    pub data: String,
    pub proof: ContentDigest,
    /// Where peers send their acknowledgment.
    #[serde(rename = "originatingNodeURL")]
    pub originating_node_url: String,
}

impl BroadcastMessage {
    pub fn new(data: impl Into<String>, proof: ContentDigest, origin: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            proof,
            originating_node_url: origin.into(),
        }
    }

    /// True when `proof` is the digest of `data`.
    pub fn claims_valid_proof(&self) -> bool {
        verify(&prove(&self.data), &self.proof)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Accepted,
    Rejected,
}

impl AckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AckStatus::Accepted => "accepted",
            AckStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A peer's verdict on a broadcast, sent back to the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcknowledgmentMessage {
    /// Digest the peer computed for the payload.
    #[serde(rename = "dataId")]
    pub data_id: String,
    #[serde(rename = "nodeId")]
    pub node_id: String,
    pub status: AckStatus,
}
