// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use proofcast_node::config::{NodeConfig, DEFAULT_MAX_IN_FLIGHT, DEFAULT_NODE_ID};
use proofcast_node::server::build_router;
use proofcast_node::state::NodeState;
use proofcast_node::telemetry::init_telemetry;

#[derive(Parser, Debug)]
#[command(name = "proofcast-node")]
#[command(about = "Disseminates content-digest proofs to a static set of peers", long_about = None)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "PROOFCAST_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Identity reported in acknowledgments.
    #[arg(long, env = "PROOFCAST_NODE_ID", default_value = DEFAULT_NODE_ID)]
    node_id: String,

    /// Comma separated peer base URLs, e.g. https://node1.example.com
    #[arg(long, env = "PROOFCAST_PEERS", value_delimiter = ',')]
    peers: Vec<String>,

    /// Per-request timeout for peer deliveries and acknowledgments.
    #[arg(long, env = "PROOFCAST_DELIVERY_TIMEOUT_MS", default_value_t = 5000)]
    delivery_timeout_ms: u64,

    /// Maximum concurrent outbound requests.
    #[arg(long, env = "PROOFCAST_MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    max_in_flight: usize,
}

impl From<Args> for NodeConfig {
    fn from(args: Args) -> Self {
        NodeConfig {
            bind_addr: args.bind,
            node_id: args.node_id,
            peers: args.peers,
            delivery_timeout: Duration::from_millis(args.delivery_timeout_ms),
            max_in_flight: args.max_in_flight,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: NodeConfig = Args::parse().into();
    init_telemetry()?;

    tracing::info!("Initializing proofcast node with config: {:?}", cfg);

    let addr = cfg.bind_addr;
    let node = NodeState::from_config(cfg).context("invalid node configuration")?.shared();
    tracing::info!(
        "Node {} fans out to {} peers",
        node.receiver.node_id(),
        node.disseminator.registry().len()
    );

    let app = build_router(node);

    let listener = TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
