//! Inbound line parsing.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::command::*;

/// RFC 2812 caps a message at 15 parameters.
const MAX_PARAMS: usize = 15;

/// A tokenized line: optional prefix, command word, parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: SmallVec<[&'a str; MAX_PARAMS]>,
}

fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric())(input)
}

fn parse_params(input: &str) -> SmallVec<[&str; MAX_PARAMS]> {
    let mut params = SmallVec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }
        if params.len() == MAX_PARAMS - 1 {
            // The last slot swallows the remainder, as a trailing would.
            params.push(rest);
            break;
        }
        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }
    params
}

/// Split a line into prefix, command and parameters.
///
/// Returns `None` for blank lines and lines without a command word.
pub fn tokenize(line: &str) -> Option<RawLine<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (input, _) = space0::<_, nom::error::Error<&str>>(line).ok()?;
    let (input, prefix) = opt(parse_prefix)(input).ok()?;
    let (input, _) = space0::<_, nom::error::Error<&str>>(input).ok()?;
    let (input, command) = parse_command(input).ok()?;
    if !(input.is_empty() || input.starts_with(' ')) {
        return None;
    }
    Some(RawLine {
        prefix,
        command,
        params: parse_params(input),
    })
}

fn arg(params: &[&str], i: usize) -> String {
    params.get(i).map(|s| (*s).to_owned()).unwrap_or_default()
}

fn opt_arg(params: &[&str], i: usize) -> Option<String> {
    params.get(i).map(|s| (*s).to_owned())
}

fn list_arg(params: &[&str], i: usize) -> Vec<String> {
    params
        .get(i)
        .map(|s| {
            s.split(',')
                .filter(|p| !p.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Every parameter, further split on spaces (ISON and USERHOST take both).
fn words(params: &[&str]) -> Vec<String> {
    params
        .iter()
        .flat_map(|p| p.split(' '))
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

fn target(params: &[&str]) -> TargetArgs {
    TargetArgs {
        target: opt_arg(params, 0),
    }
}

/// Parse one text line into a command.
///
/// Unknown commands and blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Command> {
    let raw = tokenize(line)?;
    let p = raw.params.as_slice();

    let cmd = match raw.command.to_ascii_uppercase().as_str() {
        "NICK" => Command::Nick(NickArgs {
            nickname: arg(p, 0),
        }),
        "USER" => Command::User(UserArgs {
            user: arg(p, 0),
            mode: arg(p, 1),
            // `USER user mode :realname` omits the unused field.
            realname: if p.len() >= 3 { arg(p, p.len() - 1) } else { String::new() },
        }),
        "JOIN" => Command::Join(JoinArgs {
            channels: list_arg(p, 0),
            keys: list_arg(p, 1),
        }),
        "PART" => Command::Part(PartArgs {
            channels: list_arg(p, 0),
            reason: opt_arg(p, 1),
        }),
        "PRIVMSG" => Command::Privmsg(MessageArgs {
            target: arg(p, 0),
            message: arg(p, 1),
        }),
        "NOTICE" => Command::Notice(MessageArgs {
            target: arg(p, 0),
            message: arg(p, 1),
        }),
        "MODE" => Command::Mode(ModeArgs {
            target: arg(p, 0),
            modes: opt_arg(p, 1),
            parameters: p.iter().skip(2).map(|s| (*s).to_owned()).collect(),
        }),
        "TOPIC" => Command::Topic(TopicArgs {
            channel: arg(p, 0),
            topic: opt_arg(p, 1),
        }),
        "WHOIS" => Command::Whois(WhoisArgs {
            target: arg(p, 0),
            mask: opt_arg(p, 1),
        }),
        "WHO" => Command::Who(WhoArgs {
            mask: opt_arg(p, 0),
            o: p.get(1).is_some_and(|f| f.eq_ignore_ascii_case("o")),
        }),
        "LIST" => Command::List(Empty {}),
        "KICK" => Command::Kick(KickArgs {
            channel: list_arg(p, 0),
            user: list_arg(p, 1),
            comment: opt_arg(p, 2),
        }),
        "INVITE" => Command::Invite(InviteArgs {
            nickname: arg(p, 0),
            channel: arg(p, 1),
        }),
        "AWAY" => Command::Away(AwayArgs {
            text: opt_arg(p, 0),
        }),
        "WALLOPS" => Command::Wallops(WallopsArgs { text: arg(p, 0) }),
        "KILL" => Command::Kill(KillArgs {
            nickname: arg(p, 0),
            comment: arg(p, 1),
        }),
        // OPER <name> <password>; a single parameter is taken as the password.
        "OPER" => Command::Oper(OperArgs {
            password: if p.len() >= 2 { arg(p, 1) } else { arg(p, 0) },
        }),
        "QUIT" => Command::Quit(QuitArgs {
            reason: opt_arg(p, 0),
        }),
        "PING" => Command::Ping(PingArgs { source: arg(p, 0) }),
        "PONG" => Command::Pong(Empty {}),
        "NAMES" => Command::Names(ChannelListArgs {
            channels: list_arg(p, 0),
        }),
        "ISON" => Command::Ison(NickListArgs {
            nicknames: words(p),
        }),
        "USERHOST" => Command::Userhost(NickListArgs {
            nicknames: words(p),
        }),
        "MOTD" => Command::Motd(target(p)),
        "LUSERS" => Command::Lusers(target(p)),
        "VERSION" => Command::Version(target(p)),
        "TIME" => Command::Time(target(p)),
        "ADMIN" => Command::Admin(target(p)),
        "INFO" => Command::Info(target(p)),
        _ => return None,
    };
    Some(cmd)
}
