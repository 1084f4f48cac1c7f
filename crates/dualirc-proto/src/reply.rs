//! Outbound replies.
//!
//! A [`Reply`] is transport-neutral: [`crate::json`] turns it into an event
//! envelope and [`crate::text`] into RFC-style lines.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::numeric::Numeric;

/// Origin of a relayed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub nick: String,
    pub user: String,
    pub host: String,
}

impl Source {
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
        }
    }

    /// The identity relays on anonymous (`+a`) channels carry.
    pub fn anonymous() -> Self {
        Self::new("anonymous", "anonymous", "anonymous.")
    }

    /// `nick!user@host`
    pub fn mask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }
}

/// A numeric reply addressed to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericReply {
    pub numeric: Numeric,
    /// Recipient nickname, `*` before one is set.
    pub to: String,
    /// Middle parameters between the recipient and the trailing text.
    pub params: Vec<String>,
    pub text: String,
}

impl NumericReply {
    /// Reply with the catalog's default text.
    pub fn new(numeric: Numeric, to: impl Into<String>) -> Self {
        Self {
            numeric,
            to: to.into(),
            params: Vec::new(),
            text: numeric.default_text().to_owned(),
        }
    }

    pub fn param(mut self, p: impl Into<String>) -> Self {
        self.params.push(p.into());
        self
    }

    pub fn params<I, S>(mut self, ps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(ps.into_iter().map(Into::into));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

impl Serialize for NumericReply {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let len = if self.params.is_empty() { 2 } else { 3 };
        let mut st = s.serialize_struct("NumericReply", len)?;
        st.serialize_field("num", &self.numeric.code())?;
        if !self.params.is_empty() {
            st.serialize_field("params", &self.params)?;
        }
        st.serialize_field("msg", &self.text)?;
        st.end()
    }
}

/// Channel visibility marker in a names listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Public,
    Private,
    Secret,
}

impl ChannelKind {
    pub const fn symbol(self) -> char {
        match self {
            Self::Public => '=',
            Self::Private => '*',
            Self::Secret => '@',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameEntry {
    pub nick: String,
    pub operator: bool,
    pub voice: bool,
    pub user: String,
    pub host: String,
}

impl NameEntry {
    /// Nickname with its `@`/`+` status prefix.
    pub fn prefixed(&self) -> String {
        if self.operator {
            format!("@{}", self.nick)
        } else if self.voice {
            format!("+{}", self.nick)
        } else {
            self.nick.clone()
        }
    }
}

/// RPL_NAMREPLY
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamesReply {
    #[serde(skip)]
    pub to: String,
    #[serde(skip)]
    pub kind: ChannelKind,
    pub channel: String,
    pub names: Vec<NameEntry>,
}

/// RPL_CHANNELMODEIS
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelModeIs {
    #[serde(skip)]
    pub to: String,
    pub mode: String,
    pub channel: String,
    pub params: Vec<String>,
}

/// One batch of RPL_LIST entries; the three vectors are index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListBatch {
    #[serde(skip)]
    pub to: String,
    pub channels: Vec<String>,
    pub users: Vec<usize>,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinEvent {
    #[serde(flatten)]
    pub source: Source,
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartEvent {
    #[serde(flatten)]
    pub source: Source,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// PRIVMSG and NOTICE relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEvent {
    #[serde(flatten)]
    pub source: Source,
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NickEvent {
    #[serde(flatten)]
    pub source: Source,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeEvent {
    #[serde(flatten)]
    pub source: Source,
    pub target: String,
    pub modes: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KickEvent {
    #[serde(flatten)]
    pub source: Source,
    pub channel: String,
    pub user: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuitEvent {
    #[serde(flatten)]
    pub source: Source,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteEvent {
    #[serde(flatten)]
    pub source: Source,
    pub nickname: String,
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEvent {
    #[serde(flatten)]
    pub source: Source,
    pub channel: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallopsEvent {
    #[serde(flatten)]
    pub source: Source,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillEvent {
    #[serde(flatten)]
    pub source: Source,
    pub nickname: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingEvent {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PongEvent {
    pub server: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEvent {
    pub message: String,
}

/// Everything the server sends to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Numeric(NumericReply),
    Names(NamesReply),
    ChannelModeIs(ChannelModeIs),
    List(ListBatch),
    Join(JoinEvent),
    Part(PartEvent),
    Privmsg(MessageEvent),
    Notice(MessageEvent),
    Nick(NickEvent),
    Mode(ModeEvent),
    Kick(KickEvent),
    Quit(QuitEvent),
    Invite(InviteEvent),
    Topic(TopicEvent),
    Wallops(WallopsEvent),
    Kill(KillEvent),
    Ping(PingEvent),
    Pong(PongEvent),
    Error(ErrorEvent),
}

impl Reply {
    /// Event name on the structured transport.
    pub fn event(&self) -> &'static str {
        match self {
            Self::Numeric(n) => n.numeric.name(),
            Self::Names(_) => Numeric::RPL_NAMREPLY.name(),
            Self::ChannelModeIs(_) => Numeric::RPL_CHANNELMODEIS.name(),
            Self::List(_) => Numeric::RPL_LIST.name(),
            Self::Join(_) => "JOIN",
            Self::Part(_) => "PART",
            Self::Privmsg(_) => "PRIVMSG",
            Self::Notice(_) => "NOTICE",
            Self::Nick(_) => "NICK",
            Self::Mode(_) => "MODE",
            Self::Kick(_) => "KICK",
            Self::Quit(_) => "QUIT",
            Self::Invite(_) => "INVITE",
            Self::Topic(_) => "TOPIC",
            Self::Wallops(_) => "WALLOPS",
            Self::Kill(_) => "KILL",
            Self::Ping(_) => "PING",
            Self::Pong(_) => "PONG",
            Self::Error(_) => "ERROR",
        }
    }

    /// The numeric, if this is a numeric-style reply.
    pub fn numeric(&self) -> Option<Numeric> {
        match self {
            Self::Numeric(n) => Some(n.numeric),
            Self::Names(_) => Some(Numeric::RPL_NAMREPLY),
            Self::ChannelModeIs(_) => Some(Numeric::RPL_CHANNELMODEIS),
            Self::List(_) => Some(Numeric::RPL_LIST),
            _ => None,
        }
    }
}

impl From<NumericReply> for Reply {
    fn from(n: NumericReply) -> Self {
        Self::Numeric(n)
    }
}
