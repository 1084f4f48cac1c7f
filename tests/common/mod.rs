//! Integration test common infrastructure.
//!
//! Provides an in-process test server bound to ephemeral ports, plus a
//! text client and a WebSocket client for asserting on message flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::{Line, TestClient, WsClient};
#[allow(unused_imports)]
pub use server::TestServer;
