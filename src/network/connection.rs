//! Connection - drives one client.
//!
//! ```text
//!   CommandSource ──Inbound──▶ actor ──Reply──▶ outbound queue ──▶ writer task ──▶ ReplySink
//! ```
//!
//! The reader loop forwards decoded commands to the state actor until the
//! peer goes away or the session is torn down (its token is cancelled).
//! The writer task drains the session's outbound queue; the queue closes
//! when the actor drops the session, after which the writer flushes what
//! is left and closes the transport.

use std::net::SocketAddr;

use dualirc_proto::Reply;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

use super::transport::{CommandSource, ReplySink};
use crate::state::{ServerEvent, TransportKind, Uid};
use crate::telemetry::spans;

/// A client connection handler.
pub struct Connection<S, K> {
    uid: Uid,
    addr: SocketAddr,
    kind: TransportKind,
    source: S,
    sink: K,
    events: mpsc::UnboundedSender<ServerEvent>,
}

impl<S, K> Connection<S, K>
where
    S: CommandSource,
    K: ReplySink + 'static,
{
    pub fn new(
        uid: Uid,
        addr: SocketAddr,
        kind: TransportKind,
        (source, sink): (S, K),
        events: mpsc::UnboundedSender<ServerEvent>,
    ) -> Self {
        Self {
            uid,
            addr,
            kind,
            source,
            sink,
            events,
        }
    }

    /// Run until the peer disconnects or the session is torn down.
    pub async fn run(self) {
        let span = spans::connection(self.uid, self.addr, self.kind.as_str());
        self.drive().instrument(span).await;
    }

    async fn drive(self) {
        let Self {
            uid,
            addr,
            kind,
            mut source,
            sink,
            events,
        } = self;

        let (outbound, queue) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let connect = ServerEvent::Connect {
            uid,
            kind,
            host: addr.ip().to_string(),
            outbound,
            cancel: cancel.clone(),
        };
        if events.send(connect).is_err() {
            warn!("state actor is gone, dropping connection");
            return;
        }
        info!("connection registered with state actor");

        let writer = tokio::spawn(write_loop(sink, queue).in_current_span());

        let reason = loop {
            tokio::select! {
                _ = cancel.cancelled() => break None,
                received = source.receive() => match received {
                    Ok(Some(command)) => {
                        if events.send(ServerEvent::Inbound { uid, command }).is_err() {
                            break None;
                        }
                    }
                    Ok(None) => break Some("Connection closed".to_owned()),
                    Err(e) => {
                        warn!(error = %e, "read error");
                        break Some(format!("Read error: {e}"));
                    }
                },
            }
        };

        if let Some(reason) = reason {
            let _ = events.send(ServerEvent::Disconnect { uid, reason });
        }
        drop(source);

        if let Err(e) = writer.await {
            warn!(error = %e, "writer task failed");
        }
        info!("connection closed");
    }
}

async fn write_loop<K: ReplySink>(mut sink: K, mut queue: mpsc::UnboundedReceiver<Reply>) {
    while let Some(reply) = queue.recv().await {
        if let Err(e) = sink.send(&reply).await {
            debug!(error = %e, "write failed, discarding outbound queue");
            return;
        }
    }
    if let Err(e) = sink.close().await {
        debug!(error = %e, "close failed");
    }
}
