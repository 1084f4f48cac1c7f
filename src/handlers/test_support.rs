//! In-memory harness for handler tests.
//!
//! Drives the registry against a real [`Matrix`] and collects each
//! session's replies from its outbound queue.

use std::collections::HashMap;
use std::sync::Arc;

use dualirc_proto::text::parse_line;
use dualirc_proto::{Command, Numeric, Reply};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio_util::sync::CancellationToken;

use super::{Context, Registry};
use crate::config::Config;
use crate::state::{Matrix, ServerEvent, TransportKind, Uid, UidGenerator};

pub const BASE_CONFIG: &str = r#"
    [server]
    name = "irc.test"
    info = ["dualircd test server"]
    comments = "testing"

    [admin]
    location1 = "Somewhere"
    location2 = "Else"
    email = "admin@irc.test"

    [listen]
    address = "127.0.0.1:0"

    [oper]
    password = "letmein"
"#;

pub struct Harness {
    pub matrix: Matrix,
    registry: Registry,
    uids: UidGenerator,
    outbound: HashMap<Uid, mpsc::UnboundedReceiver<Reply>>,
    pub events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(BASE_CONFIG)
    }

    /// Harness with extra TOML appended to the base config.
    pub fn with_extra(extra: &str) -> Self {
        Self::with_config(&format!("{BASE_CONFIG}\n{extra}"))
    }

    pub fn with_config(toml: &str) -> Self {
        let config = Arc::new(Config::from_toml(toml).expect("test config"));
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            matrix: Matrix::new(config, &tx),
            registry: Registry::new(),
            uids: UidGenerator::new(),
            outbound: HashMap::new(),
            events: rx,
        }
    }

    pub fn connect(&mut self) -> Uid {
        let uid = self.uids.next();
        let (tx, rx) = mpsc::unbounded_channel();
        self.matrix.connect(
            uid,
            TransportKind::ByteStream,
            "127.0.0.1".into(),
            tx,
            CancellationToken::new(),
        );
        self.outbound.insert(uid, rx);
        uid
    }

    /// Connect and complete registration, discarding the welcome burst.
    pub fn register(&mut self, nick: &str) -> Uid {
        let uid = self.connect();
        self.line(uid, &format!("NICK {nick}"));
        self.line(uid, &format!("USER {nick} 0 * :{nick} Real"));
        self.drain(uid);
        uid
    }

    pub fn dispatch(&mut self, uid: Uid, command: Command) {
        let mut ctx = Context::new(uid, &mut self.matrix);
        self.registry.dispatch(&mut ctx, command);
    }

    pub fn line(&mut self, uid: Uid, line: &str) {
        let command = parse_line(line).expect("parseable test line");
        self.dispatch(uid, command);
    }

    pub fn drain(&mut self, uid: Uid) -> Vec<Reply> {
        let mut out = Vec::new();
        if let Some(rx) = self.outbound.get_mut(&uid) {
            while let Ok(reply) = rx.try_recv() {
                out.push(reply);
            }
        }
        out
    }

    /// Numerics queued for `uid`, draining the queue.
    pub fn numerics(&mut self, uid: Uid) -> Vec<Numeric> {
        self.drain(uid).iter().filter_map(Reply::numeric).collect()
    }

    /// Send a line and return just the numerics it produced.
    pub fn numerics_for(&mut self, uid: Uid, line: &str) -> Vec<Numeric> {
        self.line(uid, line);
        self.numerics(uid)
    }

    /// Whether the outbound queue for `uid` is closed.
    pub fn is_closed(&mut self, uid: Uid) -> bool {
        match self.outbound.get_mut(&uid) {
            Some(rx) => loop {
                match rx.try_recv() {
                    Ok(_) => continue,
                    Err(TryRecvError::Empty) => return false,
                    Err(TryRecvError::Disconnected) => return true,
                }
            },
            None => true,
        }
    }
}
