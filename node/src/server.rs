// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use proofcast_kernel::config::REFERENCE_PROVE_DATA;
use proofcast_kernel::digest::{prove, verify, ContentDigest};
use proofcast_kernel::message::{AcknowledgmentMessage, BroadcastMessage};

use crate::api::*;
use crate::errors::NodeError;
use crate::state::SharedNode;

pub fn build_router(state: SharedNode) -> Router {
    Router::new()
        .route("/", get(heartbeat))
        .route("/prove", post(prove_handler))
        .route("/verify", post(verify_handler))
        .route("/broadcast", post(broadcast))
        .route("/receive", post(receive))
        .route("/acknowledge", post(acknowledge))
        // Observability
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn heartbeat() -> &'static str {
    HEARTBEAT_OK
}

async fn prove_handler(body: Bytes) -> Result<String, NodeError> {
    let req: ProveRequest = decode_body_or_default(&body)?;
    let data = req.data.unwrap_or_else(|| REFERENCE_PROVE_DATA.to_string());
    Ok(prove(&data).into_string())
}

async fn verify_handler(body: Bytes) -> Result<String, NodeError> {
    let req: VerifyRequest = decode_body_or_default(&body)?;
    let verified = verify(
        &ContentDigest::from(req.provided_hash),
        &ContentDigest::from(req.expected_hash),
    );
    Ok(verification_result(verified))
}

async fn broadcast(
    State(node): State<SharedNode>,
    body: Bytes,
) -> Result<&'static str, NodeError> {
    let message: BroadcastMessage = decode_body(&body)?;

    if !message.claims_valid_proof() {
        tracing::warn!("Refusing to broadcast payload with mismatched proof {}", message.proof);
        return Err(NodeError::ProofMismatch);
    }

    node.disseminator.broadcast(message);
    Ok(BROADCAST_INITIATED)
}

async fn receive(
    State(node): State<SharedNode>,
    body: Bytes,
) -> Result<&'static str, NodeError> {
    let message: BroadcastMessage = decode_body(&body)?;

    let receipt = node.receiver.handle(&message);
    if receipt.is_accepted() {
        Ok(DATA_ACCEPTED)
    } else {
        Err(NodeError::VerificationFailed)
    }
}

async fn acknowledge(
    State(node): State<SharedNode>,
    body: Bytes,
) -> Result<&'static str, NodeError> {
    let ack: AcknowledgmentMessage = decode_body(&body)?;
    node.acks.on_acknowledgment(ack);
    Ok(ACK_RECEIVED)
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
