// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

use crate::errors::NodeError;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() -> Result<(), NodeError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "proofcast_node=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| NodeError::Internal(format!("failed to install tracing subscriber: {}", e)))?;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| NodeError::Internal(format!("failed to install Prometheus recorder: {}", e)))?;

    if PROM_HANDLE.set(handle).is_err() {
        tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
    }

    metrics::describe_counter!("proofcast_broadcasts_total", "Broadcasts accepted for fan-out");
    metrics::describe_counter!("proofcast_deliveries_total", "Peer delivery attempts by outcome");
    metrics::describe_counter!("proofcast_receipts_total", "Inbound broadcasts by verification status");
    metrics::describe_counter!("proofcast_acks_dispatched_total", "Outbound acknowledgments by outcome");
    metrics::describe_counter!("proofcast_acks_received_total", "Inbound acknowledgments by status");

    metrics::gauge!("proofcast_node_up", 1.0);
    Ok(())
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
