//! Configuration loading and management.
//!
//! - [`types`]: the top-level [`Config`], server identity, admin block, MOTD
//! - [`listen`]: TCP and WebSocket listeners
//! - [`limits`]: protocol limits and keepalive timing
//! - [`oper`]: the shared operator password
//! - [`validation`]: startup sanity checks

mod limits;
mod listen;
mod oper;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::{ListenConfig, WebSocketConfig};
pub use oper::OperConfig;
pub use types::{AdminConfig, Config, ConfigError, MotdConfig, ServerConfig};
pub use validation::{ValidationError, validate};
