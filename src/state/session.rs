//! Per-connection protocol state.

use chrono::Utc;
use dualirc_proto::{Reply, Source};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::Uid;

/// Which wire format a session speaks. Informational only: handlers never
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// JSON events over WebSocket.
    Structured,
    /// CRLF text lines over TCP.
    ByteStream,
}

impl TransportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "json",
            Self::ByteStream => "text",
        }
    }
}

/// User mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserModes {
    pub away: bool,       // +a
    pub invisible: bool,  // +i
    pub wallops: bool,    // +w
    pub restricted: bool, // +r
    pub oper: bool,       // +o
    pub local_oper: bool, // +O
    pub notices: bool,    // +s
}

impl UserModes {
    /// Letters in display order.
    pub const LETTERS: &'static str = "aiwroOs";

    pub fn get(&self, letter: char) -> Option<bool> {
        Some(match letter {
            'a' => self.away,
            'i' => self.invisible,
            'w' => self.wallops,
            'r' => self.restricted,
            'o' => self.oper,
            'O' => self.local_oper,
            's' => self.notices,
            _ => return None,
        })
    }

    /// Set a flag; returns `false` for unknown letters.
    pub fn set(&mut self, letter: char, on: bool) -> bool {
        let slot = match letter {
            'a' => &mut self.away,
            'i' => &mut self.invisible,
            'w' => &mut self.wallops,
            'r' => &mut self.restricted,
            'o' => &mut self.oper,
            'O' => &mut self.local_oper,
            's' => &mut self.notices,
            _ => return false,
        };
        *slot = on;
        true
    }

    /// Either operator flag.
    pub fn is_operator(&self) -> bool {
        self.oper || self.local_oper
    }

    /// Convert modes to a string like "+iw".
    pub fn as_mode_string(&self) -> String {
        let mut s = String::from("+");
        s.extend(
            Self::LETTERS
                .chars()
                .filter(|&c| self.get(c).unwrap_or(false)),
        );
        s
    }
}

/// One live connection.
#[derive(Debug)]
pub struct Session {
    pub uid: Uid,
    pub kind: TransportKind,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub realname: String,
    /// Peer IP address as text.
    pub host: String,
    pub modes: UserModes,
    pub away: Option<String>,
    pub idle_secs: u64,
    pub ping_idle_secs: u64,
    /// Welcome sequence sent; the session is registered.
    pub welcomed: bool,
    /// Joined channels, folded names, in join order.
    pub channels: Vec<String>,
    /// Channels this session holds an invite to, folded names.
    pub invites: Vec<String>,
    pub quit_message: Option<String>,
    /// Unix seconds.
    pub signon: i64,
    sender: mpsc::UnboundedSender<Reply>,
    cancel: CancellationToken,
}

impl Session {
    pub fn new(
        uid: Uid,
        kind: TransportKind,
        host: String,
        sender: mpsc::UnboundedSender<Reply>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            uid,
            kind,
            nick: None,
            user: None,
            realname: String::new(),
            host,
            modes: UserModes::default(),
            away: None,
            idle_secs: 0,
            ping_idle_secs: 0,
            welcomed: false,
            channels: Vec::new(),
            invites: Vec::new(),
            quit_message: None,
            signon: Utc::now().timestamp(),
            sender,
            cancel,
        }
    }

    /// Nickname for reply addressing; `*` until one is set.
    pub fn display_nick(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    pub fn username(&self) -> &str {
        self.user.as_deref().unwrap_or("*")
    }

    pub fn source(&self) -> Source {
        Source::new(self.display_nick(), self.username(), self.host.clone())
    }

    /// Both NICK and USER have been accepted.
    pub fn ready_to_register(&self) -> bool {
        !self.welcomed && self.nick.is_some() && self.user.is_some()
    }

    /// Queue a reply; a closed queue means the connection is already going away.
    pub fn send(&self, reply: impl Into<Reply>) {
        let _ = self.sender.send(reply.into());
    }

    pub fn sender(&self) -> &mpsc::UnboundedSender<Reply> {
        &self.sender
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_on(&self, channel_key: &str) -> bool {
        self.channels.iter().any(|c| c == channel_key)
    }

    pub fn has_invite(&self, channel_key: &str) -> bool {
        self.invites.iter().any(|c| c == channel_key)
    }
}
