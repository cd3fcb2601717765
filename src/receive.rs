// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Receive-side verification.
//!
//! Every inbound broadcast walks the same path:
//!
//! ```text
//! Received -> Verifying -> Accepted | Rejected -> Acknowledging -> Done
//! ```
//!
//! The digest is recomputed locally, compared with the claimed one, the record
//! is stored only on a match, and an acknowledgment addressed to the origin is
//! built last. Sending that acknowledgment is the caller's job; once it has been
//! handed off the caller marks the receipt [`ReceivePhase::Done`].

use std::sync::Arc;

use crate::digest::{prove, verify, ContentDigest};
use crate::message::{AckStatus, AcknowledgmentMessage, BroadcastMessage};
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceivePhase {
    Received,
    Verifying,
    Accepted,
    Rejected,
    Acknowledging,
    Done,
}

/// Outcome of processing one broadcast.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub status: AckStatus,
    pub local_digest: ContentDigest,
    pub acknowledgment: AcknowledgmentMessage,
    /// Origin URL the acknowledgment must be sent to.
    pub reply_to: String,
    pub phases: Vec<ReceivePhase>,
}

impl Receipt {
    pub fn is_accepted(&self) -> bool {
        self.status == AckStatus::Accepted
    }

    /// Records that the acknowledgment has been handed to the dispatcher.
    pub fn finish(&mut self) {
        if self.phases.last() != Some(&ReceivePhase::Done) {
            self.phases.push(ReceivePhase::Done);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReceiveProcessor {
    store: Arc<RecordStore>,
    node_id: String,
}

impl ReceiveProcessor {
    pub fn new(store: Arc<RecordStore>, node_id: impl Into<String>) -> Self {
        Self { store, node_id: node_id.into() }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn process(&self, message: &BroadcastMessage) -> Receipt {
        let mut phases = vec![ReceivePhase::Received, ReceivePhase::Verifying];

        let local_digest = prove(&message.data);
        let status = if verify(&local_digest, &message.proof) {
            phases.push(ReceivePhase::Accepted);
            self.store.put(message.data.clone(), local_digest.clone());
            AckStatus::Accepted
        } else {
            phases.push(ReceivePhase::Rejected);
            AckStatus::Rejected
        };

        phases.push(ReceivePhase::Acknowledging);
        let acknowledgment = AcknowledgmentMessage {
            data_id: local_digest.as_str().to_string(),
            node_id: self.node_id.clone(),
            status,
        };

        Receipt {
            status,
            local_digest,
            acknowledgment,
            reply_to: message.originating_node_url.clone(),
            phases,
        }
    }
}
