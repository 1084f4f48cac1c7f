//! Test IRC clients.
//!
//! [`TestClient`] speaks CRLF text over TCP; [`WsClient`] speaks JSON
//! envelopes over WebSocket. Both can send commands and assert on
//! received responses.

use std::net::SocketAddr;
use std::time::Duration;

use dualirc_proto::text::tokenize;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// One received text line, tokenized.
#[derive(Debug, Clone)]
pub struct Line {
    pub raw: String,
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl Line {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        let tokens =
            tokenize(raw).ok_or_else(|| anyhow::anyhow!("unparseable line: {raw:?}"))?;
        Ok(Self {
            raw: raw.to_owned(),
            prefix: tokens.prefix.map(str::to_owned),
            command: tokens.command.to_owned(),
            params: tokens.params.iter().map(|p| (*p).to_owned()).collect(),
        })
    }

    /// Whether this is the numeric reply `code`.
    pub fn is(&self, code: &str) -> bool {
        self.command == code
    }

    /// Parameter `i`, or the empty string.
    pub fn param(&self, i: usize) -> &str {
        self.params.get(i).map(String::as_str).unwrap_or("")
    }

    /// The last parameter.
    pub fn trailing(&self) -> &str {
        self.params.last().map(String::as_str).unwrap_or("")
    }
}

/// A test IRC client on the text transport.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: SocketAddr, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    /// Send a raw IRC line.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Line> {
        self.recv_timeout(RECV_TIMEOUT).await
    }

    /// Receive a line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Line> {
        let mut raw = String::new();
        let n = timeout(dur, self.reader.read_line(&mut raw)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Line::parse(raw.trim_end())
    }

    /// Receive lines until the predicate matches, returning all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Line>>
    where
        F: FnMut(&Line) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Wait for the numeric `code` and return it.
    pub async fn expect(&mut self, code: &str) -> anyhow::Result<Line> {
        let lines = self.recv_until(|l| l.is(code)).await?;
        lines
            .into_iter()
            .last()
            .ok_or_else(|| anyhow::anyhow!("no {code} received"))
    }

    /// Whether the server closes the connection within the timeout.
    #[allow(dead_code)]
    pub async fn closed(&mut self) -> bool {
        loop {
            let mut raw = String::new();
            match timeout(RECV_TIMEOUT, self.reader.read_line(&mut raw)).await {
                Ok(Ok(0)) | Ok(Err(_)) => return true,
                Ok(Ok(_)) => continue,
                Err(_) => return false,
            }
        }
    }

    /// Register with the server (NICK + USER), consuming the welcome burst.
    pub async fn register(&mut self) -> anyhow::Result<Vec<Line>> {
        let nick = self.nick.clone();
        self.send_raw(&format!("NICK {nick}")).await?;
        self.send_raw(&format!("USER {nick} 0 * :Test User {nick}"))
            .await?;
        let lines = self.recv_until(|l| l.is("376") || l.is("422")).await?;
        if !lines.iter().any(|l| l.is("001")) {
            anyhow::bail!("Registration failed: no RPL_WELCOME received");
        }
        Ok(lines)
    }

    /// Join a channel and wait for the end of its NAMES list.
    #[allow(dead_code)]
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<Line>> {
        self.send_raw(&format!("JOIN {channel}")).await?;
        self.recv_until(|l| l.is("366")).await
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A test client on the JSON WebSocket transport.
#[allow(dead_code)]
pub struct WsClient {
    socket: Socket,
    nick: String,
}

#[allow(dead_code)]
impl WsClient {
    /// Connect to the WebSocket listener.
    pub async fn connect(url: &str, nick: &str) -> anyhow::Result<Self> {
        let (socket, _) = connect_async(url).await?;
        Ok(Self {
            socket,
            nick: nick.to_string(),
        })
    }

    /// Send one event envelope.
    pub async fn send(&mut self, event: &str, data: Value) -> anyhow::Result<()> {
        let frame = json!({ "event": event, "data": data }).to_string();
        self.socket.send(Message::Text(frame)).await?;
        Ok(())
    }

    /// Receive the next event envelope.
    pub async fn recv(&mut self) -> anyhow::Result<Value> {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.socket.next())
                .await?
                .ok_or_else(|| anyhow::anyhow!("connection closed"))??;
            match frame {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(_) => anyhow::bail!("connection closed"),
                _ => continue,
            }
        }
    }

    /// Receive envelopes until one carries `event`, returning all of them.
    pub async fn recv_until(&mut self, event: &str) -> anyhow::Result<Vec<Value>> {
        let mut events = Vec::new();
        loop {
            let envelope = self.recv().await?;
            let done = envelope["event"] == event;
            events.push(envelope);
            if done {
                return Ok(events);
            }
        }
    }

    /// Register with the server, consuming the welcome burst.
    pub async fn register(&mut self) -> anyhow::Result<Vec<Value>> {
        let nick = self.nick.clone();
        self.send("NICK", json!({ "nickname": nick })).await?;
        self.send(
            "USER",
            json!({ "user": nick, "mode": "0", "realname": format!("Web User {nick}") }),
        )
        .await?;
        let mut events = Vec::new();
        loop {
            let envelope = self.recv().await?;
            let done = envelope["event"] == "RPL_ENDOFMOTD" || envelope["event"] == "ERR_NOMOTD";
            events.push(envelope);
            if done {
                break;
            }
        }
        if !events.iter().any(|e| e["event"] == "RPL_WELCOME") {
            anyhow::bail!("Registration failed: no RPL_WELCOME received");
        }
        Ok(events)
    }
}
