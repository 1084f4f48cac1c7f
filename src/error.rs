//! Unified error handling for dualircd.
//!
//! Handler failures map to exactly one numeric reply for the session that
//! issued the command; transport failures end the connection.

use dualirc_proto::{Numeric, NumericReply, ProtocolError};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not registered")]
    NotRegistered,

    #[error("not enough parameters for {0}")]
    NeedMoreParams(&'static str),

    #[error("already registered")]
    AlreadyRegistered,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("no recipient for {0}")]
    NoRecipient(&'static str),

    #[error("no text to send")]
    NoTextToSend,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such server: {0}")]
    NoSuchServer(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("cannot send to channel: {0}")]
    CannotSendToChan(String),

    #[error("not on channel: {0}")]
    NotOnChannel(String),

    #[error("{nick} is not on {channel}")]
    UserNotInChannel { nick: String, channel: String },

    #[error("{nick} is already on {channel}")]
    UserOnChannel { nick: String, channel: String },

    #[error("channel operator privileges needed on {0}")]
    ChanOpPrivsNeeded(String),

    #[error("key already set on {0}")]
    KeySet(String),

    #[error("unknown channel mode {mode} on {channel}")]
    UnknownMode { mode: char, channel: String },

    #[error("cannot join {channel}: {reason}")]
    Channel {
        channel: String,
        reason: ChannelError,
    },

    #[error("permission denied")]
    NoPrivileges,

    #[error("password mismatch")]
    PasswdMismatch,

    #[error("cannot kill a server")]
    CantKillServer,

    #[error("unknown user mode flag")]
    UmodeUnknownFlag,

    #[error("cannot change modes of other users")]
    UsersDontMatch,

    /// The issuing session no longer exists (torn down earlier in the queue).
    #[error("session gone")]
    SessionGone,

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotRegistered => "not_registered",
            Self::NeedMoreParams(_) => "need_more_params",
            Self::AlreadyRegistered => "already_registered",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::NoRecipient(_) => "no_recipient",
            Self::NoTextToSend => "no_text_to_send",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchServer(_) => "no_such_server",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::CannotSendToChan(_) => "cannot_send_to_chan",
            Self::NotOnChannel(_) => "not_on_channel",
            Self::UserNotInChannel { .. } => "user_not_in_channel",
            Self::UserOnChannel { .. } => "user_on_channel",
            Self::ChanOpPrivsNeeded(_) => "chanop_privs_needed",
            Self::KeySet(_) => "key_set",
            Self::UnknownMode { .. } => "unknown_mode",
            Self::Channel { .. } => "join_denied",
            Self::NoPrivileges => "no_privileges",
            Self::PasswdMismatch => "passwd_mismatch",
            Self::CantKillServer => "cant_kill_server",
            Self::UmodeUnknownFlag => "umode_unknown_flag",
            Self::UsersDontMatch => "users_dont_match",
            Self::SessionGone => "session_gone",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to the numeric reply owed to the initiator.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_reply(&self, nick: &str) -> Option<NumericReply> {
        let reply = |n: Numeric| NumericReply::new(n, nick);
        let reply = match self {
            Self::NotRegistered => reply(Numeric::ERR_NOTREGISTERED),
            Self::NeedMoreParams(cmd) => reply(Numeric::ERR_NEEDMOREPARAMS).param(*cmd),
            Self::AlreadyRegistered => reply(Numeric::ERR_ALREADYREGISTRED),
            Self::NoNicknameGiven => reply(Numeric::ERR_NONICKNAMEGIVEN),
            Self::ErroneousNickname(bad) => reply(Numeric::ERR_ERRONEUSNICKNAME).param(bad),
            Self::NicknameInUse(bad) => reply(Numeric::ERR_NICKNAMEINUSE).param(bad),
            Self::NoRecipient(cmd) => reply(Numeric::ERR_NORECIPIENT)
                .text(format!("No recipient given ({cmd})")),
            Self::NoTextToSend => reply(Numeric::ERR_NOTEXTTOSEND),
            Self::NoSuchNick(name) => reply(Numeric::ERR_NOSUCHNICK).param(name),
            Self::NoSuchServer(name) => reply(Numeric::ERR_NOSUCHSERVER).param(name),
            Self::NoSuchChannel(name) => reply(Numeric::ERR_NOSUCHCHANNEL).param(name),
            Self::CannotSendToChan(name) => reply(Numeric::ERR_CANNOTSENDTOCHAN).param(name),
            Self::NotOnChannel(name) => reply(Numeric::ERR_NOTONCHANNEL).param(name),
            Self::UserNotInChannel { nick: target, channel } => {
                reply(Numeric::ERR_USERNOTINCHANNEL).param(target).param(channel)
            }
            Self::UserOnChannel { nick: target, channel } => {
                reply(Numeric::ERR_USERONCHANNEL).param(target).param(channel)
            }
            Self::ChanOpPrivsNeeded(name) => reply(Numeric::ERR_CHANOPRIVSNEEDED).param(name),
            Self::KeySet(name) => reply(Numeric::ERR_KEYSET).param(name),
            Self::UnknownMode { mode, channel } => reply(Numeric::ERR_UNKNOWNMODE)
                .param(mode.to_string())
                .text(format!("is unknown mode char to me for {channel}")),
            Self::Channel { channel, reason } => reason.to_reply(nick, channel),
            Self::NoPrivileges => reply(Numeric::ERR_NOPRIVILEGES),
            Self::PasswdMismatch => reply(Numeric::ERR_PASSWDMISMATCH),
            Self::CantKillServer => reply(Numeric::ERR_CANTKILLSERVER),
            Self::UmodeUnknownFlag => reply(Numeric::ERR_UMODEUNKNOWNFLAG),
            Self::UsersDontMatch => reply(Numeric::ERR_USERSDONTMATCH),

            // These errors don't get client-visible replies
            Self::SessionGone => return None,
            Self::Internal(_) => return None,
        };
        Some(reply)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors (JOIN admission)
// ============================================================================

/// Reasons a JOIN is refused, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("cannot join channel (+b)")]
    BannedFromChan,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,
}

impl ChannelError {
    /// Convert to the numeric reply for `channel`.
    pub fn to_reply(self, nick: &str, channel: &str) -> NumericReply {
        let numeric = match self {
            Self::BannedFromChan => Numeric::ERR_BANNEDFROMCHAN,
            Self::InviteOnlyChan => Numeric::ERR_INVITEONLYCHAN,
            Self::ChannelIsFull => Numeric::ERR_CHANNELISFULL,
            Self::BadChannelKey => Numeric::ERR_BADCHANNELKEY,
        };
        NumericReply::new(numeric, nick).param(channel)
    }
}

// ============================================================================
// Transport Errors (connection I/O)
// ============================================================================

/// Errors raised by a connection's reader or writer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
