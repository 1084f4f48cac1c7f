//! JSON event envelopes over WebSocket.
//!
//! One envelope per text frame. Ping and pong control frames are answered
//! by tungstenite itself; a close frame ends the session.

use async_trait::async_trait;
use dualirc_proto::{Command, Reply, json};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use super::{CommandSource, ReplySink};
use crate::error::TransportError;

type Socket = WebSocketStream<TcpStream>;

/// Split an accepted WebSocket into the JSON transport halves.
pub fn websocket(socket: Socket) -> (JsonSource, JsonSink) {
    let (sink, stream) = socket.split();
    (JsonSource { frames: stream }, JsonSink { frames: sink })
}

pub struct JsonSource {
    frames: SplitStream<Socket>,
}

impl JsonSource {
    fn decode(text: &str) -> Option<Command> {
        match json::decode(text) {
            Ok(command) => Some(command),
            Err(e) => {
                debug!(error = %e, "undecodable frame ignored");
                None
            }
        }
    }
}

#[async_trait]
impl CommandSource for JsonSource {
    async fn receive(&mut self) -> Result<Option<Command>, TransportError> {
        while let Some(frame) = self.frames.next().await {
            let command = match frame? {
                Message::Text(text) => Self::decode(&text),
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => Self::decode(text),
                    Err(_) => {
                        debug!(len = bytes.len(), "non-UTF-8 binary frame ignored");
                        None
                    }
                },
                Message::Close(_) => return Ok(None),
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
            };
            if let Some(command) = command {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }
}

pub struct JsonSink {
    frames: SplitSink<Socket, Message>,
}

#[async_trait]
impl ReplySink for JsonSink {
    async fn send(&mut self, reply: &Reply) -> Result<(), TransportError> {
        let text = json::encode(reply)?;
        self.frames.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.frames.close().await?;
        Ok(())
    }
}
