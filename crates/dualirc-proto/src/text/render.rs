//! Outbound line rendering.

use crate::reply::*;

/// Append `text` as the trailing parameter.
fn trailing(line: &mut String, text: &str) {
    line.push_str(" :");
    line.push_str(text);
}

fn numeric_line(server: &str, n: &NumericReply) -> String {
    let mut line = format!(":{} {} {}", server, n.numeric, n.to);
    for p in &n.params {
        line.push(' ');
        line.push_str(p);
    }
    if !n.text.is_empty() {
        trailing(&mut line, &n.text);
    }
    line
}

fn relay(source: &Source, command: &str, args: &[&str], text: Option<&str>) -> String {
    let mut line = format!(":{} {}", source.mask(), command);
    for a in args {
        line.push(' ');
        line.push_str(a);
    }
    if let Some(text) = text {
        trailing(&mut line, text);
    }
    line
}

/// Render a reply as zero or more lines, without terminators.
///
/// `server` is the name numeric replies and PONG are prefixed with.
pub fn render(reply: &Reply, server: &str) -> Vec<String> {
    let line = match reply {
        Reply::Numeric(n) => numeric_line(server, n),
        Reply::Names(n) => {
            let names: Vec<String> = n.names.iter().map(NameEntry::prefixed).collect();
            format!(
                ":{} 353 {} {} {} :{}",
                server,
                n.to,
                n.kind.symbol(),
                n.channel,
                names.join(" ")
            )
        }
        Reply::ChannelModeIs(m) => {
            let mut line = format!(":{} 324 {} {} {}", server, m.to, m.channel, m.mode);
            for p in &m.params {
                line.push(' ');
                line.push_str(p);
            }
            line
        }
        Reply::List(batch) => {
            return batch
                .channels
                .iter()
                .zip(&batch.users)
                .zip(&batch.topics)
                .map(|((channel, users), topic)| {
                    format!(":{} 322 {} {} {} :{}", server, batch.to, channel, users, topic)
                })
                .collect();
        }
        Reply::Join(e) => relay(&e.source, "JOIN", &[&e.channel], None),
        Reply::Part(e) => relay(&e.source, "PART", &[&e.channel], e.reason.as_deref()),
        Reply::Privmsg(e) => relay(&e.source, "PRIVMSG", &[&e.target], Some(&e.message)),
        Reply::Notice(e) => relay(&e.source, "NOTICE", &[&e.target], Some(&e.message)),
        Reply::Nick(e) => relay(&e.source, "NICK", &[], Some(&e.nickname)),
        Reply::Mode(e) => {
            let mut args: Vec<&str> = vec![&e.target, &e.modes];
            args.extend(e.parameters.iter().map(String::as_str));
            relay(&e.source, "MODE", &args, None)
        }
        Reply::Kick(e) => relay(&e.source, "KICK", &[&e.channel, &e.user], Some(&e.comment)),
        Reply::Quit(e) => relay(&e.source, "QUIT", &[], Some(&e.reason)),
        Reply::Invite(e) => relay(&e.source, "INVITE", &[&e.nickname], Some(&e.channel)),
        Reply::Topic(e) => relay(&e.source, "TOPIC", &[&e.channel], Some(&e.topic)),
        Reply::Wallops(e) => relay(&e.source, "WALLOPS", &[], Some(&e.text)),
        Reply::Kill(e) => relay(&e.source, "KILL", &[&e.nickname], Some(&e.comment)),
        Reply::Ping(p) => format!("PING :{}", p.source),
        Reply::Pong(p) => format!(":{} PONG {} :{}", server, p.server, p.source),
        Reply::Error(e) => format!("ERROR :{}", e.message),
    };
    vec![line]
}
