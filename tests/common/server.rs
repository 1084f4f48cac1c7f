//! Test server management.
//!
//! Runs a dualircd instance inside the test's runtime, bound to ephemeral
//! ports on the loopback interface.

use std::net::SocketAddr;

use dualircd::{Config, Server};
use tokio::task::JoinHandle;

/// A test server instance. The server task is aborted on drop.
pub struct TestServer {
    address: SocketAddr,
    websocket: SocketAddr,
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a server with the base configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with("").await
    }

    /// Spawn a server with extra TOML appended to the base configuration.
    pub async fn spawn_with(extra: &str) -> anyhow::Result<Self> {
        Self::spawn_config(&[], extra).await
    }

    /// Spawn a server whose WebSocket listener only accepts `origins`.
    #[allow(dead_code)]
    pub async fn spawn_with_origins(origins: &[&str]) -> anyhow::Result<Self> {
        Self::spawn_config(origins, "").await
    }

    async fn spawn_config(origins: &[&str], extra: &str) -> anyhow::Result<Self> {
        let config_content = format!(
            r#"
[server]
name = "irc.test"
network = "TestNet"
info = ["dualircd integration server"]

[admin]
location1 = "Test Lab"
email = "admin@irc.test"

[listen]
address = "127.0.0.1:0"

[websocket]
address = "127.0.0.1:0"
allow_origins = {origins:?}

[oper]
password = "testpass"

{extra}
"#
        );
        let config = Config::from_toml(&config_content)?;
        let server = Server::bind(config).await?;
        let address = server.local_addr()?;
        let websocket = server
            .websocket_addr()
            .ok_or_else(|| anyhow::anyhow!("websocket listener not bound"))?;
        let task = tokio::spawn(server.run());
        Ok(Self {
            address,
            websocket,
            task,
        })
    }

    /// Address of the text listener.
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// `ws://` URL of the WebSocket listener.
    #[allow(dead_code)]
    pub fn websocket_url(&self) -> String {
        format!("ws://{}", self.websocket)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
