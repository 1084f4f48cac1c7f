//! WHO command handler.

use dualirc_proto::command::WhoArgs;
use dualirc_proto::names::matches_channel_pattern;
use dualirc_proto::{Numeric, glob_match};

use crate::handlers::helpers::channel_visible;
use crate::handlers::{Context, Handler, HandlerResult};
use crate::state::{MemberModes, Session};

/// Handler for WHO command.
///
/// `WHO [mask [o]]`
///
/// A channel mask lists that channel's members. Any other mask is matched
/// against nickname, username, host and realname. Absent, `0` and `*` match
/// everyone the requester can see.
pub struct WhoHandler;

/// `H`/`G`, `*` for operators, then the channel prefix.
fn who_flags(session: &Session, member: Option<MemberModes>) -> String {
    let mut flags = String::from(if session.away.is_some() { "G" } else { "H" });
    if session.modes.is_operator() {
        flags.push('*');
    }
    if let Some(p) = member.and_then(|m| m.prefix_char()) {
        flags.push(p);
    }
    flags
}

impl Handler for WhoHandler {
    type Args = WhoArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: WhoArgs) -> HandlerResult {
        let mask = args
            .mask
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != "0" && *m != "*");
        let uid = ctx.uid;
        let mut rows: Vec<(String, &Session, Option<MemberModes>)> = Vec::new();

        match mask {
            Some(mask) if matches_channel_pattern(mask) => {
                if let Some(channel) = ctx.matrix.channel(mask)
                    && channel_visible(channel, uid)
                {
                    let member_view = channel.is_member(uid);
                    for member in &channel.members {
                        let Some(session) = ctx.matrix.sessions.get(&member.uid) else {
                            continue;
                        };
                        if !member_view && session.modes.invisible {
                            continue;
                        }
                        rows.push((channel.name.clone(), session, Some(member.modes)));
                    }
                }
            }
            _ => {
                let mut sessions: Vec<&Session> = ctx
                    .matrix
                    .sessions
                    .values()
                    .filter(|s| s.welcomed)
                    .filter(|s| {
                        s.uid == uid || !s.modes.invisible || ctx.matrix.share_channel(uid, s.uid)
                    })
                    .filter(|s| {
                        mask.is_none_or(|m| {
                            glob_match(m, s.display_nick())
                                || glob_match(m, s.username())
                                || glob_match(m, &s.host)
                                || glob_match(m, &s.realname)
                        })
                    })
                    .collect();
                sessions.sort_by(|a, b| a.display_nick().cmp(b.display_nick()));
                rows.extend(sessions.into_iter().map(|s| ("*".to_owned(), s, None)));
            }
        }

        for (channel, session, member) in rows {
            if args.o && !session.modes.is_operator() {
                continue;
            }
            ctx.reply(
                ctx.numeric(Numeric::RPL_WHOREPLY)
                    .params([
                        channel,
                        session.username().to_owned(),
                        session.host.clone(),
                        ctx.server_name().to_owned(),
                        session.display_nick().to_owned(),
                        who_flags(session, member),
                    ])
                    .text(format!("0 {}", session.realname)),
            );
        }
        ctx.reply(
            ctx.numeric(Numeric::RPL_ENDOFWHO)
                .param(mask.unwrap_or("*")),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dualirc_proto::{Numeric, Reply};

    use crate::handlers::test_support::Harness;

    fn who_rows(replies: Vec<Reply>) -> Vec<Vec<String>> {
        replies
            .into_iter()
            .filter_map(|r| match r {
                Reply::Numeric(n) if n.numeric == Numeric::RPL_WHOREPLY => Some(n.params),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn channel_who_lists_members_with_flags() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(alice, "JOIN #a");
        h.line(bob, "JOIN #a");
        h.line(bob, "AWAY :out");
        h.drain(alice);

        h.line(alice, "WHO #a");
        let rows = who_rows(h.drain(alice));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "#a");
        assert_eq!(rows[0][4], "alice");
        assert_eq!(rows[0][5], "H@");
        assert_eq!(rows[1][5], "G");
    }

    #[tokio::test]
    async fn invisible_users_hidden_unless_sharing_a_channel() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        let carol = h.register("carol");
        h.line(bob, "MODE bob +i");

        h.line(carol, "WHO");
        let nicks: Vec<_> = who_rows(h.drain(carol)).into_iter().map(|r| r[4].clone()).collect();
        assert_eq!(nicks, vec!["alice", "carol"]);

        h.line(alice, "JOIN #a");
        h.line(bob, "JOIN #a");
        h.drain(alice);
        h.line(alice, "WHO *");
        assert_eq!(who_rows(h.drain(alice)).len(), 3);
    }

    #[tokio::test]
    async fn mask_and_operator_filter() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let _albert = h.register("albert");
        let _bob = h.register("bob");
        h.line(alice, "WHO al*");
        assert_eq!(who_rows(h.drain(alice)).len(), 2);

        h.line(alice, "OPER letmein");
        h.drain(alice);
        h.line(alice, "WHO 0 o");
        let rows = who_rows(h.drain(alice));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][5], "H*");
    }

    #[tokio::test]
    async fn end_of_who_echoes_mask() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        h.line(alice, "WHO nobody*");
        let replies = h.drain(alice);
        let Some(Reply::Numeric(end)) = replies.last() else {
            panic!("expected RPL_ENDOFWHO");
        };
        assert_eq!(end.numeric, Numeric::RPL_ENDOFWHO);
        assert_eq!(end.params, vec!["nobody*"]);
    }
}
