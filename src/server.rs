//! Server assembly: the state actor plus the gateway feeding it.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::network::Gateway;
use crate::state::Actor;

/// A bound, not yet running server.
pub struct Server {
    actor: Actor,
    gateway: Gateway,
}

impl Server {
    /// Build the state actor and bind every configured listener.
    pub async fn bind(config: Config) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let (actor, events) = Actor::new(Arc::clone(&config));
        let gateway = Gateway::bind(config, events).await?;
        Ok(Self { actor, gateway })
    }

    /// Address of the CRLF text listener.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.gateway.local_addr()
    }

    /// Address of the WebSocket listener, when enabled.
    pub fn websocket_addr(&self) -> Option<SocketAddr> {
        self.gateway.websocket_addr()
    }

    /// Run until the gateway fails.
    pub async fn run(self) -> anyhow::Result<()> {
        tokio::spawn(self.actor.run());
        info!("accepting connections");
        self.gateway.run().await
    }
}
