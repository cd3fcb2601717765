// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;

/// A payload accepted after its digest was verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub data: String,
    pub proof: ContentDigest,
}

/// Verified records keyed by payload.
///
/// All access goes through one `RwLock`, so concurrent `put` calls are applied
/// in some serial order and none are lost. Re-inserting a key overwrites it.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<HashMap<String, ContentDigest>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: impl Into<String>, proof: ContentDigest) {
        // A writer that panicked cannot have left a half-applied insert behind.
        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.into(), proof);
    }

    pub fn get(&self, key: &str) -> Option<ContentDigest> {
        let guard = self.records.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        let guard = self.records.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every record, ordered by key.
    pub fn records(&self) -> Vec<ProofRecord> {
        let guard = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<ProofRecord> = guard
            .iter()
            .map(|(data, proof)| ProofRecord { data: data.clone(), proof: proof.clone() })
            .collect();
        out.sort_by(|a, b| a.data.cmp(&b.data));
        out
    }
}
