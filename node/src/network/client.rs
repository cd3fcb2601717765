use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use proofcast_kernel::config::{ACKNOWLEDGE_PATH, RECEIVE_PATH};
use proofcast_kernel::message::{AcknowledgmentMessage, BroadcastMessage};
use proofcast_kernel::peers::PeerEndpoint;

use crate::errors::NodeError;
use crate::network::Transport;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// No request timeout is set on the client: callers bound every request
    /// themselves and report expiry as a timeout, not a send error.
    pub fn new() -> Result<Self, NodeError> {
        let client = Client::builder()
            .build()
            .map_err(|e| NodeError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<String, NodeError> {
        let resp = self.client.post(url).json(body).send().await
            .map_err(|e| NodeError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| NodeError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(NodeError::PeerStatus { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn deliver(&self, peer: &PeerEndpoint, message: &BroadcastMessage) -> Result<String, NodeError> {
        self.post_json(&peer.route(RECEIVE_PATH), message).await
    }

    async fn acknowledge(&self, origin: &str, ack: &AcknowledgmentMessage) -> Result<String, NodeError> {
        // The origin URL comes from an untrusted message body.
        let origin = PeerEndpoint::parse(origin)?;
        self.post_json(&origin.route(ACKNOWLEDGE_PATH), ack).await
    }
}
