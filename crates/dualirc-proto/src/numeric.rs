//! Numeric reply catalog.
//!
//! Every reply the server can send as a three-digit numeric is listed here
//! once, with its RFC 2812 code and the default human-readable text. The
//! reply name doubles as the event name on the structured transport, so
//! `ERR_NICKNAMEINUSE` is both `433` on the wire and the `event` field of the
//! JSON envelope.

#![allow(non_camel_case_types)]

use std::fmt;

macro_rules! numerics {
    ($( $(#[$meta:meta])* $name:ident = $code:literal => $text:literal, )*) => {
        /// A numeric reply known to the server.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum Numeric {
            $( $(#[$meta])* $name = $code, )*
        }

        impl Numeric {
            /// All catalog entries in declaration order.
            pub const ALL: &'static [Numeric] = &[ $( Numeric::$name, )* ];

            /// The three-digit code.
            #[inline]
            pub const fn code(self) -> u16 {
                self as u16
            }

            /// The symbolic name, used as the structured event name.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Numeric::$name => stringify!($name), )*
                }
            }

            /// Default trailing text for this reply.
            pub const fn default_text(self) -> &'static str {
                match self {
                    $( Numeric::$name => $text, )*
                }
            }

            /// Look up a catalog entry by its numeric code.
            pub fn from_code(code: u16) -> Option<Numeric> {
                match code {
                    $( $code => Some(Numeric::$name), )*
                    _ => None,
                }
            }

            /// Look up a catalog entry by its symbolic name.
            pub fn from_name(name: &str) -> Option<Numeric> {
                Self::ALL.iter().copied().find(|n| n.name() == name)
            }
        }
    };
}

numerics! {
    // Registration
    RPL_WELCOME = 1 => "Welcome to the Internet Relay Network",
    RPL_YOURHOST = 2 => "Your host is running",
    RPL_CREATED = 3 => "This server was created",
    RPL_MYINFO = 4 => "",

    // Command replies
    RPL_UMODEIS = 221 => "",
    RPL_LUSERCLIENT = 251 => "There are users on the server",
    RPL_LUSEROP = 252 => "operator(s) online",
    RPL_LUSERUNKNOWN = 253 => "unknown connection(s)",
    RPL_LUSERCHANNELS = 254 => "channels formed",
    RPL_LUSERME = 255 => "I have clients and 1 servers",
    RPL_ADMINME = 256 => "Administrative info",
    RPL_ADMINLOC1 = 257 => "",
    RPL_ADMINLOC2 = 258 => "",
    RPL_ADMINEMAIL = 259 => "",
    RPL_AWAY = 301 => "",
    RPL_USERHOST = 302 => "",
    RPL_ISON = 303 => "",
    RPL_UNAWAY = 305 => "You are no longer marked as being away",
    RPL_NOWAWAY = 306 => "You have been marked as being away",
    RPL_WHOISUSER = 311 => "",
    RPL_WHOISSERVER = 312 => "",
    RPL_WHOISOPERATOR = 313 => "is an IRC operator",
    RPL_ENDOFWHO = 315 => "End of WHO list",
    RPL_WHOISIDLE = 317 => "seconds idle, signon time",
    RPL_ENDOFWHOIS = 318 => "End of WHOIS list",
    RPL_WHOISCHANNELS = 319 => "",
    RPL_LIST = 322 => "",
    RPL_LISTEND = 323 => "End of LIST",
    RPL_CHANNELMODEIS = 324 => "",
    RPL_NOTOPIC = 331 => "No topic is set",
    RPL_TOPIC = 332 => "",
    RPL_INVITING = 341 => "",
    RPL_VERSION = 351 => "",
    RPL_WHOREPLY = 352 => "",
    RPL_NAMREPLY = 353 => "",
    RPL_ENDOFNAMES = 366 => "End of NAMES list",
    RPL_BANLIST = 367 => "",
    RPL_ENDOFBANLIST = 368 => "End of channel ban list",
    RPL_EXCEPTLIST = 348 => "",
    RPL_ENDOFEXCEPTLIST = 349 => "End of channel exception list",
    RPL_INFO = 371 => "",
    RPL_MOTD = 372 => "",
    RPL_ENDOFINFO = 374 => "End of INFO list",
    RPL_MOTDSTART = 375 => "Message of the day",
    RPL_ENDOFMOTD = 376 => "End of MOTD command",
    RPL_YOUREOPER = 381 => "You are now an IRC operator",
    RPL_TIME = 391 => "",

    // Errors
    ERR_NOSUCHNICK = 401 => "No such nick/channel",
    ERR_NOSUCHSERVER = 402 => "No such server",
    ERR_NOSUCHCHANNEL = 403 => "No such channel",
    ERR_CANNOTSENDTOCHAN = 404 => "Cannot send to channel",
    ERR_NORECIPIENT = 411 => "No recipient given",
    ERR_NOTEXTTOSEND = 412 => "No text to send",
    ERR_UNKNOWNCOMMAND = 421 => "Unknown command",
    ERR_NOMOTD = 422 => "MOTD File is missing",
    ERR_NONICKNAMEGIVEN = 431 => "No nickname given",
    ERR_ERRONEUSNICKNAME = 432 => "Erroneous nickname",
    ERR_NICKNAMEINUSE = 433 => "Nickname is already in use",
    ERR_USERNOTINCHANNEL = 441 => "They aren't on that channel",
    ERR_NOTONCHANNEL = 442 => "You're not on that channel",
    ERR_USERONCHANNEL = 443 => "is already on channel",
    ERR_NOTREGISTERED = 451 => "You have not registered",
    ERR_NEEDMOREPARAMS = 461 => "Not enough parameters",
    ERR_ALREADYREGISTRED = 462 => "Unauthorized command (already registered)",
    ERR_PASSWDMISMATCH = 464 => "Password incorrect",
    ERR_KEYSET = 467 => "Channel key already set",
    ERR_CHANNELISFULL = 471 => "Cannot join channel (+l)",
    ERR_UNKNOWNMODE = 472 => "is unknown mode char to me",
    ERR_INVITEONLYCHAN = 473 => "Cannot join channel (+i)",
    ERR_BANNEDFROMCHAN = 474 => "Cannot join channel (+b)",
    ERR_BADCHANNELKEY = 475 => "Cannot join channel (+k)",
    ERR_NOPRIVILEGES = 481 => "Permission Denied- You're not an IRC operator",
    ERR_CHANOPRIVSNEEDED = 482 => "You're not channel operator",
    ERR_CANTKILLSERVER = 483 => "You can't kill a server!",
    ERR_UMODEUNKNOWNFLAG = 501 => "Unknown MODE flag",
    ERR_USERSDONTMATCH = 502 => "Cannot change mode for other users",
}

impl Numeric {
    /// Whether this is an error reply (4xx/5xx).
    #[inline]
    pub const fn is_error(self) -> bool {
        self.code() >= 400
    }
}

impl fmt::Display for Numeric {
    /// Formats as the zero-padded wire code, e.g. `001`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
