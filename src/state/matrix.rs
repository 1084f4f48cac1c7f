//! The Matrix: every session, nickname and channel the server knows about.
//!
//! The Matrix is owned by the actor task and mutated only from there, one
//! event at a time. The nickname index and channel table are plain maps
//! keyed by the RFC 1459 folded name.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dualirc_proto::reply::QuitEvent;
use dualirc_proto::{fold, Reply};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{Channel, ServerEvent, Session, TransportKind, Uid};
use crate::config::Config;

/// Server identity used by replies.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    /// Human-readable start time for RPL_CREATED.
    pub created: String,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            version: concat!("dualircd-", env!("CARGO_PKG_VERSION")).to_string(),
            created: Utc::now().to_rfc2822(),
        }
    }
}

/// LUSERS counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Connected but not yet registered.
    pub unknown: usize,
    pub registered: usize,
    pub operators: usize,
}

/// All server state.
#[derive(Debug)]
pub struct Matrix {
    pub config: Arc<Config>,
    pub server: ServerInfo,
    pub sessions: HashMap<Uid, Session>,
    /// Folded nickname to owner, for every session that set a nickname.
    pub nicks: HashMap<String, Uid>,
    /// Folded channel name to channel.
    pub channels: HashMap<String, Channel>,
    pub counters: Counters,
    /// Tickers hold no strong sender, so the actor stops once every
    /// producer is gone.
    events: mpsc::WeakUnboundedSender<ServerEvent>,
}

impl Matrix {
    pub fn new(config: Arc<Config>, events: &mpsc::UnboundedSender<ServerEvent>) -> Self {
        let server = ServerInfo::from_config(&config);
        Self {
            config,
            server,
            sessions: HashMap::new(),
            nicks: HashMap::new(),
            channels: HashMap::new(),
            counters: Counters::default(),
            events: events.downgrade(),
        }
    }

    /// Register a freshly accepted connection.
    pub fn connect(
        &mut self,
        uid: Uid,
        kind: TransportKind,
        host: String,
        outbound: mpsc::UnboundedSender<Reply>,
        cancel: CancellationToken,
    ) {
        debug!(%uid, transport = kind.as_str(), %host, "session created");
        self.sessions
            .insert(uid, Session::new(uid, kind, host, outbound, cancel));
        self.counters.unknown += 1;
    }

    pub fn uid_by_nick(&self, nick: &str) -> Option<Uid> {
        self.nicks.get(&fold(nick)).copied()
    }

    pub fn session_by_nick(&self, nick: &str) -> Option<&Session> {
        self.uid_by_nick(nick).and_then(|uid| self.sessions.get(&uid))
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&fold(name))
    }

    /// Queue a reply for one session.
    pub fn send(&self, uid: Uid, reply: impl Into<Reply>) {
        if let Some(session) = self.sessions.get(&uid) {
            session.send(reply);
        }
    }

    /// Every other session sharing at least one channel with `uid`, once each.
    pub fn peers(&self, uid: Uid) -> Vec<Uid> {
        let Some(session) = self.sessions.get(&uid) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut peers = Vec::new();
        for key in &session.channels {
            let Some(channel) = self.channels.get(key) else {
                continue;
            };
            for member in &channel.members {
                if member.uid != uid && seen.insert(member.uid) {
                    peers.push(member.uid);
                }
            }
        }
        peers
    }

    /// Whether two sessions share a channel.
    pub fn share_channel(&self, a: Uid, b: Uid) -> bool {
        let Some(session) = self.sessions.get(&a) else {
            return false;
        };
        session.channels.iter().any(|key| {
            self.channels
                .get(key)
                .is_some_and(|channel| channel.is_member(b))
        })
    }

    /// Point the nickname index at `uid` for `new`, releasing its old name.
    pub fn set_nick(&mut self, uid: Uid, new: &str) {
        let Some(session) = self.sessions.get_mut(&uid) else {
            return;
        };
        if let Some(old) = session.nick.replace(new.to_owned()) {
            let old_key = fold(&old);
            if self.nicks.get(&old_key) == Some(&uid) {
                self.nicks.remove(&old_key);
            }
        }
        self.nicks.insert(fold(new), uid);
    }

    /// Take `uid` out of one channel without notifying anyone, deleting the
    /// channel when it empties.
    pub fn leave_channel(&mut self, uid: Uid, key: &str) {
        if let Some(session) = self.sessions.get_mut(&uid) {
            session.channels.retain(|c| c != key);
        }
        let emptied = match self.channels.get_mut(key) {
            Some(channel) => {
                channel.remove_member(uid);
                channel.is_empty()
            }
            None => false,
        };
        if emptied {
            self.channels.remove(key);
            debug!(channel = %key, "channel removed");
        }
    }

    /// Start the once-per-second ticker for a registered session.
    pub fn start_ticker(&self, uid: Uid) {
        let Some(session) = self.sessions.get(&uid) else {
            return;
        };
        let token = session.cancel_token().clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let Some(sender) = events.upgrade() else {
                            break;
                        };
                        if sender.send(ServerEvent::Tick { uid }).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Destroy a session: the single exit path for QUIT, KILL, ping timeout
    /// and transport close.
    ///
    /// Every peer sharing a channel gets one QUIT; the session leaves every
    /// roster, its invites and nickname are released, its ticker and
    /// connection are cancelled. Returns the removed session so the caller
    /// can queue final words before its outbound queue is dropped. Returns
    /// `None` if the session is already gone.
    pub fn teardown(&mut self, uid: Uid, reason: &str) -> Option<Session> {
        let peers = self.peers(uid);
        let mut session = self.sessions.remove(&uid)?;
        session.quit_message = Some(reason.to_owned());

        if !peers.is_empty() {
            let quit = Reply::Quit(QuitEvent {
                source: session.source(),
                reason: reason.to_owned(),
            });
            for peer in peers {
                self.send(peer, quit.clone());
            }
        }

        for key in &session.channels {
            let emptied = match self.channels.get_mut(key) {
                Some(channel) => {
                    channel.remove_member(uid);
                    channel.is_empty()
                }
                None => false,
            };
            if emptied {
                self.channels.remove(key);
            }
        }

        if let Some(nick) = session.nick.as_deref() {
            let folded = fold(nick);
            for key in &session.invites {
                if let Some(channel) = self.channels.get_mut(key) {
                    channel.drop_invite(&folded);
                }
            }
            if self.nicks.get(&folded) == Some(&uid) {
                self.nicks.remove(&folded);
            }
        }

        session.cancel_token().cancel();

        if session.welcomed {
            self.counters.registered = self.counters.registered.saturating_sub(1);
        } else {
            self.counters.unknown = self.counters.unknown.saturating_sub(1);
        }
        if session.modes.is_operator() {
            self.counters.operators = self.counters.operators.saturating_sub(1);
        }

        info!(%uid, nick = session.display_nick(), %reason, "session closed");
        Some(session)
    }
}
