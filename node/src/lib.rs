// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod api;
pub mod network;
pub mod disseminator;
pub mod receiver;
pub mod ack_sink;
pub mod state;
pub mod server;
pub mod telemetry;
