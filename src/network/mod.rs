//! Network module.
//!
//! Contains the Gateway (TCP and WebSocket listeners), the per-connection
//! driver, and the two wire transports.

mod connection;
mod gateway;
pub mod transport;

pub use connection::Connection;
pub use gateway::Gateway;
