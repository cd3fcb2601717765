// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! proofcast-kernel: content-digest proofs, the static peer registry, the
//! verified record store and the receive-side state machine.
//!
//! Nothing in this crate performs I/O. Fan-out, acknowledgment dispatch and the
//! HTTP surface live in `proofcast-node`.

pub mod config;
pub mod error;
pub mod digest;
pub mod peers;
pub mod store;
pub mod message;
pub mod receive;

#[cfg(test)]
pub mod tests;
