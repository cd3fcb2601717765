// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Inbound broadcasts: verify, store, then acknowledge to the origin.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use proofcast_kernel::message::{AcknowledgmentMessage, BroadcastMessage};
use proofcast_kernel::receive::{Receipt, ReceiveProcessor};
use proofcast_kernel::store::RecordStore;

use crate::disseminator::DeliveryPolicy;
use crate::network::Transport;

/// Sends acknowledgments back to origins, one detached task each.
#[derive(Clone)]
pub struct AckDispatcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl AckDispatcher {
    pub fn new(transport: Arc<dyn Transport>, policy: DeliveryPolicy) -> Self {
        Self {
            transport,
            timeout: policy.timeout,
            permits: policy.semaphore(),
        }
    }

    /// Fire-and-forget. Failures are logged and never retried.
    pub fn dispatch(&self, origin: String, ack: AcknowledgmentMessage) {
        let transport = self.transport.clone();
        let permits = self.permits.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                tracing::error!("Acknowledgment pool closed, dropping ack for {}", origin);
                return;
            };

            let outcome = match tokio::time::timeout(timeout, transport.acknowledge(&origin, &ack)).await {
                Ok(Ok(body)) => {
                    tracing::info!("Node {} acknowledgment response: {}", origin, body);
                    "delivered"
                }
                Ok(Err(e)) => {
                    tracing::warn!("Failed to send acknowledgment to node {}: {}", origin, e);
                    "failed"
                }
                Err(_) => {
                    tracing::warn!("Acknowledgment to node {} timed out", origin);
                    "timed_out"
                }
            };
            metrics::increment_counter!("proofcast_acks_dispatched_total", "outcome" => outcome);
        });
    }
}

pub struct Receiver {
    processor: ReceiveProcessor,
    acks: AckDispatcher,
}

impl Receiver {
    pub fn new(store: Arc<RecordStore>, node_id: impl Into<String>, acks: AckDispatcher) -> Self {
        Self {
            processor: ReceiveProcessor::new(store, node_id),
            acks,
        }
    }

    pub fn node_id(&self) -> &str {
        self.processor.node_id()
    }

    /// Runs verification synchronously and schedules the acknowledgment.
    ///
    /// The returned receipt reflects the accept/reject decision; the
    /// acknowledgment may still be in flight.
    pub fn handle(&self, message: &BroadcastMessage) -> Receipt {
        let mut receipt = self.processor.process(message);

        if receipt.is_accepted() {
            tracing::info!("Accepted {} from {}", receipt.local_digest, receipt.reply_to);
        } else {
            tracing::warn!(
                "Rejected payload from {}: claimed {} (well-formed: {}), computed {}",
                receipt.reply_to,
                message.proof,
                message.proof.is_well_formed(),
                receipt.local_digest
            );
        }
        metrics::increment_counter!("proofcast_receipts_total", "status" => receipt.status.as_str());
        tracing::debug!("Receive phases: {:?}", receipt.phases);

        self.acks.dispatch(receipt.reply_to.clone(), receipt.acknowledgment.clone());
        receipt.finish();
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fake::{wait_until, RecordingTransport};
    use proofcast_kernel::digest::{prove, ContentDigest};
    use proofcast_kernel::message::AckStatus;
    use proofcast_kernel::receive::ReceivePhase;

    fn receiver(transport: Arc<RecordingTransport>) -> (Receiver, Arc<RecordStore>) {
        receiver_with(transport, DeliveryPolicy::default())
    }

    fn receiver_with(transport: Arc<RecordingTransport>, policy: DeliveryPolicy) -> (Receiver, Arc<RecordStore>) {
        let store = Arc::new(RecordStore::new());
        let acks = AckDispatcher::new(transport, policy);
        (Receiver::new(store.clone(), "node_a", acks), store)
    }

    #[tokio::test]
    async fn test_accept_stores_and_acknowledges() {
        let transport = Arc::new(RecordingTransport::new());
        let (rx, store) = receiver(transport.clone());

        let receipt = rx.handle(&BroadcastMessage::new("secret_data", prove("secret_data"), "http://origin"));

        assert!(receipt.is_accepted());
        assert_eq!(receipt.phases.last(), Some(&ReceivePhase::Done));
        assert_eq!(store.get("secret_data"), Some(prove("secret_data")));

        assert!(wait_until(|| transport.ack_count() == 1).await);
        let (origin, ack) = transport.acks.lock().unwrap()[0].clone();
        assert_eq!(origin, "http://origin");
        assert_eq!(ack.status, AckStatus::Accepted);
        assert_eq!(ack.node_id, "node_a");
        assert_eq!(ack.data_id, prove("secret_data").into_string());
    }

    #[tokio::test]
    async fn test_reject_still_acknowledges() {
        let transport = Arc::new(RecordingTransport::new());
        let (rx, store) = receiver(transport.clone());

        let receipt = rx.handle(&BroadcastMessage::new(
            "secret_data",
            ContentDigest::from("not-a-digest"),
            "http://origin",
        ));

        assert!(!receipt.is_accepted());
        assert!(store.is_empty());
        assert!(wait_until(|| transport.ack_count() == 1).await);
        assert_eq!(transport.acks.lock().unwrap()[0].1.status, AckStatus::Rejected);
    }

    #[tokio::test]
    async fn test_ack_failure_does_not_change_outcome() {
        let transport = Arc::new(RecordingTransport::new().failing("http://gone"));
        let (rx, store) = receiver(transport.clone());

        let receipt = rx.handle(&BroadcastMessage::new("payload", prove("payload"), "http://gone"));

        assert!(receipt.is_accepted());
        assert!(store.contains("payload"));
        assert!(wait_until(|| transport.ack_count() == 1).await);
    }

    #[tokio::test]
    async fn test_hanging_origin_does_not_block_later_acks() {
        let transport = Arc::new(RecordingTransport::new().hanging("http://stalled"));
        let policy = DeliveryPolicy { timeout: Duration::from_millis(200), max_in_flight: 1 };
        let (rx, store) = receiver_with(transport.clone(), policy);

        let started = std::time::Instant::now();
        let receipt = rx.handle(&BroadcastMessage::new("first", prove("other"), "http://stalled"));
        assert!(started.elapsed() < Duration::from_millis(100));
        assert_eq!(receipt.status, AckStatus::Rejected);
        assert!(store.is_empty());
        assert!(wait_until(|| transport.ack_count() == 1).await);

        // The only permit is held by the stalled ack until its timeout fires.
        let receipt = rx.handle(&BroadcastMessage::new("second", prove("second"), "http://origin"));
        assert!(receipt.is_accepted());
        assert!(store.contains("second"));
        assert_eq!(transport.ack_count(), 1);

        assert!(wait_until(|| transport.ack_count() == 2).await);
        let (origin, ack) = transport.acks.lock().unwrap()[1].clone();
        assert_eq!(origin, "http://origin");
        assert_eq!(ack.status, AckStatus::Accepted);
    }
}
