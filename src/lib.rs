//! dualircd - an IRC server speaking CRLF text over TCP and JSON events
//! over WebSocket, with every session sharing one nickname and channel
//! namespace.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use server::Server;
