// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use proofcast_kernel::message::{AckStatus, AcknowledgmentMessage};

/// Number of acknowledgments kept for inspection.
pub const ACK_HISTORY: usize = 1024;

/// Terminal sink for acknowledgments arriving at the origin.
///
/// Nothing downstream depends on what lands here; it logs, counts and keeps a
/// bounded history.
#[derive(Debug, Default)]
pub struct AcknowledgmentSink {
    recent: Mutex<VecDeque<AcknowledgmentMessage>>,
}

impl AcknowledgmentSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_acknowledgment(&self, ack: AcknowledgmentMessage) {
        tracing::info!(
            "Received acknowledgment from Node {} regarding data {} with status: {}",
            ack.node_id,
            ack.data_id,
            ack.status
        );
        metrics::increment_counter!("proofcast_acks_received_total", "status" => ack.status.as_str());

        let mut recent = self.recent.lock().unwrap_or_else(PoisonError::into_inner);
        if recent.len() >= ACK_HISTORY {
            recent.pop_front();
        }
        recent.push_back(ack);
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<AcknowledgmentMessage> {
        self.recent.lock().unwrap_or_else(PoisonError::into_inner).iter().cloned().collect()
    }

    pub fn count(&self, status: AckStatus) -> usize {
        self.recent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|ack| ack.status == status)
            .count()
    }
}
