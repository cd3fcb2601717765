// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Outbound side of the protocol.

mod client;

pub use client::HttpTransport;

use async_trait::async_trait;
use proofcast_kernel::message::{AcknowledgmentMessage, BroadcastMessage};
use proofcast_kernel::peers::PeerEndpoint;

use crate::errors::NodeError;

/// Sends protocol messages to other nodes.
///
/// Both calls return the remote response body on a 2xx status and an error
/// otherwise. Callers own timeouts and never retry.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// POST `message` to the peer's receive capability.
    async fn deliver(&self, peer: &PeerEndpoint, message: &BroadcastMessage) -> Result<String, NodeError>;

    /// POST `ack` to the acknowledge capability of `origin`.
    async fn acknowledge(&self, origin: &str, ack: &AcknowledgmentMessage) -> Result<String, NodeError>;
}

#[cfg(test)]
pub(crate) mod fake;
