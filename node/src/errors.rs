// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use proofcast_kernel::error::KernelError;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Failed to decode request body: {0}")]
    MalformedBody(String),
    /// `/broadcast` was asked to disseminate a payload whose proof does not match.
    #[error("Proof verification failed")]
    ProofMismatch,
    /// `/receive` recomputed a different digest than the one claimed.
    #[error("Data verification failed")]
    VerificationFailed,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Peer responded with status {status}: {body}")]
    PeerStatus { status: u16, body: String },
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = match &self {
            NodeError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            NodeError::ProofMismatch | NodeError::VerificationFailed => StatusCode::UNAUTHORIZED,
            NodeError::Kernel(_) => StatusCode::BAD_REQUEST,
            NodeError::Network(_) | NodeError::PeerStatus { .. } => StatusCode::BAD_GATEWAY,
            NodeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
