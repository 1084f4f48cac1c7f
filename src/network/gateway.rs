//! Gateway - TCP and WebSocket listeners that accept incoming connections.
//!
//! The Gateway binds its sockets up front and spawns a [`Connection`] task
//! for each accepted client.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tracing::{error, info, instrument, warn};

use crate::config::{Config, WebSocketConfig};
use crate::network::Connection;
use crate::network::transport::{text, websocket};
use crate::state::{ServerEvent, TransportKind, Uid, UidGenerator};

/// The Gateway accepts incoming connections and spawns handlers.
pub struct Gateway {
    plaintext_listener: TcpListener,
    websocket_listener: Option<(TcpListener, WebSocketConfig)>,
    config: Arc<Config>,
    events: mpsc::UnboundedSender<ServerEvent>,
    uids: Arc<UidGenerator>,
}

impl Gateway {
    /// Bind the listeners named in the configuration.
    pub async fn bind(
        config: Arc<Config>,
        events: mpsc::UnboundedSender<ServerEvent>,
    ) -> anyhow::Result<Self> {
        let plaintext_listener = TcpListener::bind(config.listen.address).await?;
        info!(address = %plaintext_listener.local_addr()?, "Plaintext listener bound");

        let websocket_listener = if let Some(ws_cfg) = config.websocket.clone() {
            let listener = TcpListener::bind(ws_cfg.address).await?;
            info!(address = %listener.local_addr()?, "WebSocket listener bound");
            Some((listener, ws_cfg))
        } else {
            None
        };

        Ok(Self {
            plaintext_listener,
            websocket_listener,
            config,
            events,
            uids: Arc::new(UidGenerator::new()),
        })
    }

    /// Bound address of the text listener.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.plaintext_listener.local_addr()
    }

    /// Bound address of the WebSocket listener, if configured.
    pub fn websocket_addr(&self) -> Option<SocketAddr> {
        self.websocket_listener
            .as_ref()
            .and_then(|(listener, _)| listener.local_addr().ok())
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        if let Some((ws_listener, ws_config)) = self.websocket_listener {
            let events = self.events.clone();
            let uids = Arc::clone(&self.uids);
            let ws_config = Arc::new(ws_config);
            tokio::spawn(async move {
                loop {
                    match ws_listener.accept().await {
                        Ok((stream, addr)) => {
                            info!(%addr, "WebSocket connection attempt");
                            let events = events.clone();
                            let uid = uids.next();
                            let ws_config = Arc::clone(&ws_config);
                            tokio::spawn(async move {
                                serve_websocket(stream, addr, uid, &ws_config, events).await;
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to accept WebSocket connection");
                        }
                    }
                }
            });
        }

        let max_line = self.config.limits.max_line_length;
        loop {
            match self.plaintext_listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Plaintext connection accepted");
                    let uid = self.uids.next();
                    let halves = text(stream, max_line, self.config.server.name.clone());
                    let connection = Connection::new(
                        uid,
                        addr,
                        TransportKind::ByteStream,
                        halves,
                        self.events.clone(),
                    );
                    tokio::spawn(connection.run());
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept plaintext connection");
                }
            }
        }
    }
}

/// Complete the WebSocket handshake, rejecting disallowed origins, then
/// drive the connection.
async fn serve_websocket(
    stream: TcpStream,
    addr: SocketAddr,
    uid: Uid,
    ws_config: &WebSocketConfig,
    events: mpsc::UnboundedSender<ServerEvent>,
) {
    let cors_callback = |req: &Request, response: Response| {
        let origin = req.headers().get("Origin").and_then(|o| o.to_str().ok());
        if ws_config.origin_allowed(origin) {
            return Ok(response);
        }
        warn!(%addr, origin = origin.unwrap_or("-"), "WebSocket CORS rejected");
        let mut rejection = ErrorResponse::new(Some("CORS origin not allowed".to_string()));
        *rejection.status_mut() = http::StatusCode::FORBIDDEN;
        Err(rejection)
    };

    match accept_hdr_async(stream, cors_callback).await {
        Ok(socket) => {
            info!(%addr, "WebSocket handshake successful");
            Connection::new(
                uid,
                addr,
                TransportKind::Structured,
                websocket(socket),
                events,
            )
            .run()
            .await;
        }
        Err(e) => {
            warn!(%addr, error = %e, "WebSocket handshake failed");
        }
    }
}
