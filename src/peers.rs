// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Static peer set.

use core::fmt;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{KernelError, KernelResult};

/// Base URL of a peer node, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerEndpoint(String);

impl PeerEndpoint {
    pub fn parse(raw: &str) -> KernelResult<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let has_host = trimmed.split("://").nth(1).is_some_and(|rest| !rest.is_empty());
        if !has_scheme || !has_host {
            return Err(KernelError::InvalidPeer(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full URL of a capability on this peer, e.g. `route("/receive")`.
    pub fn route(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for PeerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, read-only list of peers to fan out to.
///
/// Built once at start-up. An empty registry is valid and disables fan-out.
#[derive(Debug, Clone)]
pub struct PeerRegistry {
    peers: Arc<[PeerEndpoint]>,
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self { peers: Arc::from(Vec::new()) }
    }
}

impl PeerRegistry {
    pub fn new<I, S>(endpoints: I) -> KernelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut peers = Vec::new();
        for raw in endpoints {
            let peer = PeerEndpoint::parse(raw.as_ref())?;
            if !seen.insert(peer.clone()) {
                return Err(KernelError::DuplicatePeer(peer.0));
            }
            peers.push(peer);
        }
        Ok(Self { peers: peers.into() })
    }

    /// Parses a comma separated list. Blank entries are skipped.
    pub fn parse_list(list: &str) -> KernelResult<Self> {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn peers(&self) -> &[PeerEndpoint] {
        &self.peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
