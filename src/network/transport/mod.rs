//! Wire transports.
//!
//! A transport is split into a [`CommandSource`] read by the connection
//! task and a [`ReplySink`] owned by its writer task. Both transports
//! produce the same [`Command`] values and accept the same [`Reply`]
//! values, so nothing above this layer knows which one a session uses.

mod json;
mod line;

pub use json::{JsonSink, JsonSource, websocket};
pub use line::{LineSink, LineSource, text};

use async_trait::async_trait;
use dualirc_proto::{Command, Reply};

use crate::error::TransportError;

/// Inbound half of a transport.
#[async_trait]
pub trait CommandSource: Send {
    /// Next decoded command; `Ok(None)` when the peer closed cleanly.
    ///
    /// Input that does not decode to a known command is skipped.
    async fn receive(&mut self) -> Result<Option<Command>, TransportError>;
}

/// Outbound half of a transport.
#[async_trait]
pub trait ReplySink: Send {
    async fn send(&mut self, reply: &Reply) -> Result<(), TransportError>;

    /// Flush and shut the write side down.
    async fn close(&mut self) -> Result<(), TransportError>;
}
