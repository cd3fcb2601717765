// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Peer address is empty or not an http(s) URL.
    #[error("invalid peer endpoint: {0:?}")]
    InvalidPeer(String),
    /// The same endpoint was configured twice.
    #[error("duplicate peer endpoint: {0}")]
    DuplicatePeer(String),
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
