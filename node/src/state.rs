// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use proofcast_kernel::peers::PeerRegistry;
use proofcast_kernel::store::RecordStore;

use crate::ack_sink::AcknowledgmentSink;
use crate::config::NodeConfig;
use crate::disseminator::{DeliveryPolicy, Disseminator};
use crate::errors::NodeError;
use crate::network::{HttpTransport, Transport};
use crate::receiver::{AckDispatcher, Receiver};

/// Everything a running node owns, wired from its config.
pub struct NodeState {
    pub config: NodeConfig,
    pub store: Arc<RecordStore>,
    pub disseminator: Disseminator,
    pub receiver: Receiver,
    pub acks: Arc<AcknowledgmentSink>,
}

pub type SharedNode = Arc<NodeState>;

impl NodeState {
    /// Builds a node that talks to peers over HTTP.
    pub fn from_config(config: NodeConfig) -> Result<Self, NodeError> {
        let transport = HttpTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: NodeConfig, transport: Arc<dyn Transport>) -> Result<Self, NodeError> {
        let registry = PeerRegistry::new(
            config.peers.iter().map(|p| p.trim()).filter(|p| !p.is_empty()),
        )?;
        let policy = DeliveryPolicy {
            timeout: config.delivery_timeout,
            max_in_flight: config.max_in_flight,
        };

        let store = Arc::new(RecordStore::new());
        let disseminator = Disseminator::new(registry, transport.clone(), policy);
        let receiver = Receiver::new(store.clone(), config.node_id.clone(), AckDispatcher::new(transport, policy));

        Ok(Self {
            config,
            store,
            disseminator,
            receiver,
            acks: Arc::new(AcknowledgmentSink::new()),
        })
    }

    pub fn shared(self) -> SharedNode {
        Arc::new(self)
    }
}
