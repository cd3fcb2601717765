// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fire-and-forget fan-out of a broadcast to every configured peer.
//!
//! `broadcast` returns as soon as the work is scheduled. Each broadcast gets
//! its own task group; every peer delivery in it waits for a permit from a
//! shared semaphore, runs under the delivery timeout and is attempted exactly
//! once. One peer failing, hanging or panicking has no effect on the others.
//! Results surface only through logs, metrics and report subscribers.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinSet};

use proofcast_kernel::digest::ContentDigest;
use proofcast_kernel::message::BroadcastMessage;
use proofcast_kernel::peers::{PeerEndpoint, PeerRegistry};

use crate::config::{DEFAULT_DELIVERY_TIMEOUT, DEFAULT_MAX_IN_FLIGHT};
use crate::network::Transport;

#[derive(Debug, Clone, Copy)]
pub struct DeliveryPolicy {
    pub timeout: Duration,
    pub max_in_flight: usize,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DELIVERY_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl DeliveryPolicy {
    pub(crate) fn semaphore(&self) -> Arc<Semaphore> {
        Arc::new(Semaphore::new(self.max_in_flight.max(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { response: String },
    Failed { reason: String },
    TimedOut,
}

impl DeliveryOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryOutcome::Delivered { .. } => "delivered",
            DeliveryOutcome::Failed { .. } => "failed",
            DeliveryOutcome::TimedOut => "timed_out",
        }
    }
}

/// Result of one delivery attempt to one peer.
#[derive(Debug, Clone)]
pub struct DeliveryReport {
    pub peer: PeerEndpoint,
    pub proof: ContentDigest,
    pub outcome: DeliveryOutcome,
}

type ReportSubscribers = Arc<Mutex<Vec<mpsc::UnboundedSender<DeliveryReport>>>>;

pub struct Disseminator {
    registry: PeerRegistry,
    transport: Arc<dyn Transport>,
    policy: DeliveryPolicy,
    permits: Arc<Semaphore>,
    subscribers: ReportSubscribers,
}

impl Disseminator {
    pub fn new(registry: PeerRegistry, transport: Arc<dyn Transport>, policy: DeliveryPolicy) -> Self {
        Self {
            registry,
            transport,
            permits: policy.semaphore(),
            policy,
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    /// Receives a report for every delivery finished after this call.
    pub fn subscribe_reports(&self) -> mpsc::UnboundedReceiver<DeliveryReport> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner).push(tx);
        rx
    }

    /// Schedules delivery of `message` to every peer and returns immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn broadcast(&self, message: BroadcastMessage) {
        metrics::increment_counter!("proofcast_broadcasts_total");

        if self.registry.is_empty() {
            tracing::debug!("No peers configured, broadcast of {} goes nowhere", message.proof);
            return;
        }

        tracing::info!("Broadcasting {} to {} peers", message.proof, self.registry.len());

        let registry = self.registry.clone();
        let transport = self.transport.clone();
        let permits = self.permits.clone();
        let timeout = self.policy.timeout;
        let subscribers = self.subscribers.clone();
        let message = Arc::new(message);

        tokio::spawn(async move {
            let mut group = JoinSet::new();

            for peer in registry.peers().iter().cloned() {
                // Report finished deliveries while waiting for a free permit.
                let acquired = loop {
                    tokio::select! {
                        acquired = permits.clone().acquire_owned() => break acquired,
                        Some(joined) = group.join_next(), if !group.is_empty() => {
                            settle(&subscribers, joined);
                        }
                    }
                };
                let Ok(permit) = acquired else {
                    tracing::error!("Delivery pool closed, dropping remaining deliveries");
                    break;
                };
                let transport = transport.clone();
                let message = message.clone();

                group.spawn(async move {
                    let _permit = permit;
                    let outcome = deliver_once(transport.as_ref(), &peer, &message, timeout).await;
                    DeliveryReport { peer, proof: message.proof.clone(), outcome }
                });
            }

            while let Some(joined) = group.join_next().await {
                settle(&subscribers, joined);
            }
        });
    }
}

async fn deliver_once(
    transport: &dyn Transport,
    peer: &PeerEndpoint,
    message: &BroadcastMessage,
    timeout: Duration,
) -> DeliveryOutcome {
    match tokio::time::timeout(timeout, transport.deliver(peer, message)).await {
        Ok(Ok(response)) => DeliveryOutcome::Delivered { response },
        Ok(Err(e)) => DeliveryOutcome::Failed { reason: e.to_string() },
        Err(_) => DeliveryOutcome::TimedOut,
    }
}

fn settle(subscribers: &ReportSubscribers, joined: Result<DeliveryReport, JoinError>) {
    match joined {
        Ok(report) => record(subscribers, report),
        Err(e) => tracing::error!("Delivery task aborted: {}", e),
    }
}

fn record(subscribers: &ReportSubscribers, report: DeliveryReport) {
    match &report.outcome {
        DeliveryOutcome::Delivered { response } => {
            tracing::info!("Node {} response: {}", report.peer, response);
        }
        DeliveryOutcome::Failed { reason } => {
            tracing::warn!("Failed to broadcast to node {}: {}", report.peer, reason);
        }
        DeliveryOutcome::TimedOut => {
            tracing::warn!("Broadcast to node {} timed out", report.peer);
        }
    }
    metrics::increment_counter!("proofcast_deliveries_total", "outcome" => report.outcome.label());

    let mut subs = subscribers.lock().unwrap_or_else(PoisonError::into_inner);
    subs.retain(|tx| tx.send(report.clone()).is_ok());
}
