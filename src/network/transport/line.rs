//! CRLF text lines over TCP.

use async_trait::async_trait;
use dualirc_proto::text::{parse_line, render};
use dualirc_proto::{Command, LineCodec, Reply};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::debug;

use super::{CommandSource, ReplySink};
use crate::error::TransportError;

/// Split a TCP stream into the text transport halves.
///
/// Inbound lines longer than `max_line` bytes are discarded.
pub fn text(stream: TcpStream, max_line: usize, server: String) -> (LineSource, LineSink) {
    let (read, write) = stream.into_split();
    (
        LineSource {
            lines: FramedRead::new(read, LineCodec::with_max_len(max_line)),
        },
        LineSink {
            lines: FramedWrite::new(write, LineCodec::new()),
            server,
        },
    )
}

pub struct LineSource {
    lines: FramedRead<OwnedReadHalf, LineCodec>,
}

#[async_trait]
impl CommandSource for LineSource {
    async fn receive(&mut self) -> Result<Option<Command>, TransportError> {
        while let Some(line) = self.lines.next().await {
            let line = line?;
            match parse_line(&line) {
                Some(command) => return Ok(Some(command)),
                None => debug!(%line, "unknown command ignored"),
            }
        }
        Ok(None)
    }
}

pub struct LineSink {
    lines: FramedWrite<OwnedWriteHalf, LineCodec>,
    /// Prefix for numerics and server-originated lines.
    server: String,
}

#[async_trait]
impl ReplySink for LineSink {
    async fn send(&mut self, reply: &Reply) -> Result<(), TransportError> {
        for line in render(reply, &self.server) {
            self.lines.feed(line).await?;
        }
        self.lines.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.lines.close().await?;
        Ok(())
    }
}
