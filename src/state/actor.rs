//! The actor that owns the [`Matrix`].
//!
//! Connections, tickers and the gateway never touch state directly; they
//! send [`ServerEvent`]s. The actor applies each event to completion before
//! reading the next, so handlers run without locks and never observe a
//! half-applied command.

use std::sync::Arc;

use dualirc_proto::{Command, Reply};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{Matrix, TransportKind, Uid};
use crate::config::Config;
use crate::handlers::{Context, Registry, connection};

/// Everything that can happen to server state.
#[derive(Debug)]
pub enum ServerEvent {
    /// A transport finished its handshake.
    Connect {
        uid: Uid,
        kind: TransportKind,
        host: String,
        outbound: mpsc::UnboundedSender<Reply>,
        cancel: CancellationToken,
    },
    /// A decoded client command.
    Inbound { uid: Uid, command: Command },
    /// One second elapsed for a registered session.
    Tick { uid: Uid },
    /// The transport closed or failed.
    Disconnect { uid: Uid, reason: String },
}

pub struct Actor {
    matrix: Matrix,
    registry: Registry,
    events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Actor {
    /// Create the actor and the sender every producer uses to reach it.
    pub fn new(config: Arc<Config>) -> (Self, mpsc::UnboundedSender<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = Self {
            matrix: Matrix::new(config, &tx),
            registry: Registry::new(),
            events: rx,
        };
        (actor, tx)
    }

    /// Process events until every sender is gone.
    pub async fn run(mut self) {
        info!(server = %self.matrix.server.name, "state actor started");
        while let Some(event) = self.events.recv().await {
            self.handle(event);
        }
        info!(dispatched = self.registry.dispatched(), "state actor stopped");
    }

    pub fn handle(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Connect {
                uid,
                kind,
                host,
                outbound,
                cancel,
            } => self.matrix.connect(uid, kind, host, outbound, cancel),
            ServerEvent::Inbound { uid, command } => {
                if !self.matrix.sessions.contains_key(&uid) {
                    debug!(%uid, command = command.name(), "command for closed session dropped");
                    return;
                }
                let mut ctx = Context::new(uid, &mut self.matrix);
                self.registry.dispatch(&mut ctx, command);
            }
            ServerEvent::Tick { uid } => connection::tick(&mut self.matrix, uid),
            ServerEvent::Disconnect { uid, reason } => {
                self.matrix.teardown(uid, &reason);
            }
        }
    }
}
