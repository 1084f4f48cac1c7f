//! Inbound commands.
//!
//! Each client command carries a typed payload. The structured transport
//! deserialises the payload straight from the `data` object of an event;
//! the text transport builds the same struct from positional parameters
//! (see [`crate::text`]). Handlers only ever see these types.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ProtocolError, Result};

/// Lenient field decoders for structured payloads.
///
/// Browser clients are loose about types: a channel list may arrive as a bare
/// string, a mode as a number, an optional field as `null`.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar(v: Value) -> Option<String> {
        match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar(Value::deserialize(d)?))
    }

    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(scalar).collect(),
            Value::String(s) => s
                .split(',')
                .filter(|p| !p.is_empty())
                .map(str::to_owned)
                .collect(),
            other => scalar(other).into_iter().collect(),
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_u64().is_some_and(|n| n != 0),
            Value::String(s) => !s.is_empty() && s != "0" && s != "false",
            _ => false,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NickArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub nickname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user: String,
    /// RFC 2812 mode bitmask, kept as given.
    #[serde(default, deserialize_with = "lenient::string")]
    pub mode: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub realname: String,
}

impl UserArgs {
    /// Numeric value of `mode`; anything non-numeric counts as zero.
    pub fn mode_bits(&self) -> u32 {
        self.mode.trim().parse().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JoinArgs {
    #[serde(default, deserialize_with = "lenient::list")]
    pub channels: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartArgs {
    #[serde(default, deserialize_with = "lenient::list")]
    pub channels: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reason: Option<String>,
}

/// Payload shared by PRIVMSG and NOTICE.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModeArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub modes: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopicArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub channel: String,
    /// `None` queries; `Some("")` clears.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WhoisArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub mask: Option<String>,
}

impl WhoisArgs {
    /// The nickname being asked about.
    pub fn nickname(&self) -> &str {
        match self.mask.as_deref() {
            Some(mask) if !mask.is_empty() => mask,
            _ => &self.target,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WhoArgs {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub mask: Option<String>,
    /// Restrict the listing to IRC operators.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub o: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KickArgs {
    #[serde(default, deserialize_with = "lenient::list")]
    pub channel: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub user: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InviteArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub nickname: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub channel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AwayArgs {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WallopsArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KillArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub nickname: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OperArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuitArgs {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PingArgs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChannelListArgs {
    #[serde(default, deserialize_with = "lenient::list")]
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NickListArgs {
    #[serde(default, deserialize_with = "lenient::list")]
    pub nicknames: Vec<String>,
}

/// Payload of the server information queries (MOTD, LUSERS, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetArgs {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub target: Option<String>,
}

/// Payload-less commands still accept (and ignore) an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Empty {}

/// A client command with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Nick(NickArgs),
    User(UserArgs),
    Join(JoinArgs),
    Part(PartArgs),
    Privmsg(MessageArgs),
    Notice(MessageArgs),
    Mode(ModeArgs),
    Topic(TopicArgs),
    Whois(WhoisArgs),
    Who(WhoArgs),
    List(Empty),
    Kick(KickArgs),
    Invite(InviteArgs),
    Away(AwayArgs),
    Wallops(WallopsArgs),
    Kill(KillArgs),
    Oper(OperArgs),
    Quit(QuitArgs),
    Ping(PingArgs),
    Pong(Empty),
    Names(ChannelListArgs),
    Ison(NickListArgs),
    Userhost(NickListArgs),
    Motd(TargetArgs),
    Lusers(TargetArgs),
    Version(TargetArgs),
    Time(TargetArgs),
    Admin(TargetArgs),
    Info(TargetArgs),
}

/// Every command name the server understands, upper case.
pub const COMMAND_NAMES: &[&str] = &[
    "NICK", "USER", "JOIN", "PART", "PRIVMSG", "NOTICE", "MODE", "TOPIC", "WHOIS", "WHO", "LIST",
    "KICK", "INVITE", "AWAY", "WALLOPS", "KILL", "OPER", "QUIT", "PING", "PONG", "NAMES", "ISON",
    "USERHOST", "MOTD", "LUSERS", "VERSION", "TIME", "ADMIN", "INFO",
];

impl Command {
    /// Upper-case command name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nick(_) => "NICK",
            Self::User(_) => "USER",
            Self::Join(_) => "JOIN",
            Self::Part(_) => "PART",
            Self::Privmsg(_) => "PRIVMSG",
            Self::Notice(_) => "NOTICE",
            Self::Mode(_) => "MODE",
            Self::Topic(_) => "TOPIC",
            Self::Whois(_) => "WHOIS",
            Self::Who(_) => "WHO",
            Self::List(_) => "LIST",
            Self::Kick(_) => "KICK",
            Self::Invite(_) => "INVITE",
            Self::Away(_) => "AWAY",
            Self::Wallops(_) => "WALLOPS",
            Self::Kill(_) => "KILL",
            Self::Oper(_) => "OPER",
            Self::Quit(_) => "QUIT",
            Self::Ping(_) => "PING",
            Self::Pong(_) => "PONG",
            Self::Names(_) => "NAMES",
            Self::Ison(_) => "ISON",
            Self::Userhost(_) => "USERHOST",
            Self::Motd(_) => "MOTD",
            Self::Lusers(_) => "LUSERS",
            Self::Version(_) => "VERSION",
            Self::Time(_) => "TIME",
            Self::Admin(_) => "ADMIN",
            Self::Info(_) => "INFO",
        }
    }

    /// Build a command from an event name and its payload object.
    ///
    /// The name is matched case-insensitively. A `null` payload is treated as
    /// an empty object.
    pub fn from_event(event: &str, data: Value) -> Result<Command> {
        let data = match data {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        let cmd = match event.to_ascii_uppercase().as_str() {
            "NICK" => Self::Nick(serde_json::from_value(data)?),
            "USER" => Self::User(serde_json::from_value(data)?),
            "JOIN" => Self::Join(serde_json::from_value(data)?),
            "PART" => Self::Part(serde_json::from_value(data)?),
            "PRIVMSG" => Self::Privmsg(serde_json::from_value(data)?),
            "NOTICE" => Self::Notice(serde_json::from_value(data)?),
            "MODE" => Self::Mode(serde_json::from_value(data)?),
            "TOPIC" => Self::Topic(serde_json::from_value(data)?),
            "WHOIS" => Self::Whois(serde_json::from_value(data)?),
            "WHO" => Self::Who(serde_json::from_value(data)?),
            "LIST" => Self::List(Empty {}),
            "KICK" => Self::Kick(serde_json::from_value(data)?),
            "INVITE" => Self::Invite(serde_json::from_value(data)?),
            "AWAY" => Self::Away(serde_json::from_value(data)?),
            "WALLOPS" => Self::Wallops(serde_json::from_value(data)?),
            "KILL" => Self::Kill(serde_json::from_value(data)?),
            "OPER" => Self::Oper(serde_json::from_value(data)?),
            "QUIT" => Self::Quit(serde_json::from_value(data)?),
            "PING" => Self::Ping(serde_json::from_value(data)?),
            "PONG" => Self::Pong(Empty {}),
            "NAMES" => Self::Names(serde_json::from_value(data)?),
            "ISON" => Self::Ison(serde_json::from_value(data)?),
            "USERHOST" => Self::Userhost(serde_json::from_value(data)?),
            "MOTD" => Self::Motd(serde_json::from_value(data)?),
            "LUSERS" => Self::Lusers(serde_json::from_value(data)?),
            "VERSION" => Self::Version(serde_json::from_value(data)?),
            "TIME" => Self::Time(serde_json::from_value(data)?),
            "ADMIN" => Self::Admin(serde_json::from_value(data)?),
            "INFO" => Self::Info(serde_json::from_value(data)?),
            _ => return Err(ProtocolError::UnknownEvent(event.to_owned())),
        };
        Ok(cmd)
    }
}
