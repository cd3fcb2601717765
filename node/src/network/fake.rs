//! In-memory transport for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use proofcast_kernel::message::{AcknowledgmentMessage, BroadcastMessage};
use proofcast_kernel::peers::PeerEndpoint;

use crate::errors::NodeError;
use crate::network::Transport;

#[derive(Default)]
pub struct RecordingTransport {
    pub deliveries: Mutex<Vec<(PeerEndpoint, BroadcastMessage)>>,
    pub acks: Mutex<Vec<(String, AcknowledgmentMessage)>>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    panicking: HashSet<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn hanging(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    pub fn panicking(mut self, url: &str) -> Self {
        self.panicking.insert(url.to_string());
        self
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn ack_count(&self) -> usize {
        self.acks.lock().unwrap().len()
    }

    async fn behave(&self, url: &str) -> Result<(), NodeError> {
        if self.panicking.contains(url) {
            panic!("transport blew up for {}", url);
        }
        if self.hanging.contains(url) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.contains(url) {
            return Err(NodeError::Network(format!("connection refused: {}", url)));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, peer: &PeerEndpoint, message: &BroadcastMessage) -> Result<String, NodeError> {
        self.deliveries.lock().unwrap().push((peer.clone(), message.clone()));
        self.behave(peer.as_str()).await?;
        Ok("Data accepted and stored".to_string())
    }

    async fn acknowledge(&self, origin: &str, ack: &AcknowledgmentMessage) -> Result<String, NodeError> {
        self.acks.lock().unwrap().push((origin.to_string(), ack.clone()));
        self.behave(origin).await?;
        Ok("Acknowledgment received".to_string())
    }
}

/// Polls `check` until it holds or two seconds pass.
pub async fn wait_until(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
