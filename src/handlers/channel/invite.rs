//! INVITE command handler.

use dualirc_proto::command::InviteArgs;
use dualirc_proto::reply::InviteEvent;
use dualirc_proto::{Numeric, Reply, fold};
use tracing::debug;

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for INVITE command.
///
/// `INVITE nickname channel`
///
/// The channel need not exist. The invite is recorded both on the channel
/// and on the target session, and lets the target past every JOIN check.
pub struct InviteHandler;

impl Handler for InviteHandler {
    type Args = InviteArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: InviteArgs) -> HandlerResult {
        let nickname = args.nickname.trim();
        let channel_name = args.channel.trim();
        if nickname.is_empty() || channel_name.is_empty() {
            return Err(HandlerError::NeedMoreParams("INVITE"));
        }
        let target = ctx
            .matrix
            .uid_by_nick(nickname)
            .ok_or_else(|| HandlerError::NoSuchNick(nickname.to_owned()))?;
        let key = fold(channel_name);

        let mut channel_display = channel_name.to_owned();
        if let Some(channel) = ctx.matrix.channels.get(&key) {
            channel_display = channel.name.clone();
            if !channel.is_member(ctx.uid) {
                return Err(HandlerError::NotOnChannel(channel_display));
            }
            if channel.is_member(target) {
                return Err(HandlerError::UserOnChannel {
                    nick: nickname.to_owned(),
                    channel: channel_display,
                });
            }
            if channel.flags.invite_only && !channel.is_op(ctx.uid) {
                return Err(HandlerError::ChanOpPrivsNeeded(channel_display));
            }
        }

        let source = ctx.session()?.source();
        let target_session = ctx
            .matrix
            .sessions
            .get_mut(&target)
            .ok_or_else(|| HandlerError::NoSuchNick(nickname.to_owned()))?;
        let target_nick = target_session.display_nick().to_owned();
        let away = target_session.away.clone();
        if !target_session.has_invite(&key) {
            target_session.invites.push(key.clone());
        }
        target_session.send(Reply::Invite(InviteEvent {
            source,
            nickname: target_nick.clone(),
            channel: channel_display.clone(),
        }));
        if let Some(channel) = ctx.matrix.channels.get_mut(&key) {
            channel.add_invite(fold(&target_nick));
        }

        if let Some(away) = away {
            ctx.reply(
                ctx.numeric(Numeric::RPL_AWAY)
                    .param(&target_nick)
                    .text(away),
            );
        }
        ctx.reply(
            ctx.numeric(Numeric::RPL_INVITING)
                .params([target_nick.as_str(), channel_display.as_str()])
                .text(""),
        );
        debug!(channel = %channel_display, target = %target_nick, "invite sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dualirc_proto::{Numeric, Reply};

    use crate::handlers::test_support::Harness;

    #[tokio::test]
    async fn invite_notifies_target_and_confirms() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(alice, "JOIN #a");
        h.drain(alice);
        h.line(bob, "AWAY :lunch");
        h.drain(bob);

        assert_eq!(
            h.numerics_for(alice, "INVITE bob #a"),
            vec![Numeric::RPL_AWAY, Numeric::RPL_INVITING]
        );
        assert!(matches!(h.drain(bob).as_slice(), [Reply::Invite(i)] if i.channel == "#a"));
        assert!(h.matrix.channel("#a").expect("channel").is_invited("bob"));
        assert_eq!(h.matrix.sessions[&bob].invites, vec!["#a".to_string()]);
    }

    #[tokio::test]
    async fn invite_to_missing_channel_is_recorded_on_session() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        assert_eq!(h.numerics_for(alice, "INVITE bob #later"), vec![Numeric::RPL_INVITING]);
        assert_eq!(h.matrix.sessions[&bob].invites, vec!["#later".to_string()]);
    }

    #[tokio::test]
    async fn invite_refusals() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        let carol = h.register("carol");
        h.line(alice, "JOIN #a");
        h.line(bob, "JOIN #a");
        h.line(alice, "MODE #a +i");
        h.drain(alice);
        h.drain(bob);

        assert_eq!(h.numerics_for(alice, "INVITE nobody #a"), vec![Numeric::ERR_NOSUCHNICK]);
        assert_eq!(h.numerics_for(carol, "INVITE bob #a"), vec![Numeric::ERR_NOTONCHANNEL]);
        assert_eq!(h.numerics_for(alice, "INVITE bob #a"), vec![Numeric::ERR_USERONCHANNEL]);
        assert_eq!(h.numerics_for(bob, "INVITE carol #a"), vec![Numeric::ERR_CHANOPRIVSNEEDED]);
        assert_eq!(h.numerics_for(alice, "INVITE bob"), vec![Numeric::ERR_NEEDMOREPARAMS]);
    }
}
