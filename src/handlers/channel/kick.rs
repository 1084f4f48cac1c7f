//! KICK command handler.

use dualirc_proto::command::KickArgs;
use dualirc_proto::reply::KickEvent;
use dualirc_proto::{Reply, fold};

use crate::handlers::helpers::non_empty;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for KICK command.
///
/// `KICK channel{,channel} user{,user} [comment]`
///
/// A single channel pairs with every user; otherwise the lists pair up
/// index by index.
pub struct KickHandler;

impl Handler for KickHandler {
    type Args = KickArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: KickArgs) -> HandlerResult {
        if args.channel.is_empty() || args.user.is_empty() {
            return Err(HandlerError::NeedMoreParams("KICK"));
        }
        let comment = non_empty(args.comment);

        let pairs: Vec<(&str, Vec<&str>)> = if let [channel] = args.channel.as_slice() {
            vec![(channel.as_str(), args.user.iter().map(String::as_str).collect())]
        } else {
            args.channel
                .iter()
                .zip(&args.user)
                .map(|(c, u)| (c.as_str(), vec![u.as_str()]))
                .collect()
        };

        for (channel, users) in pairs {
            if let Err(e) = kick_from(ctx, channel, &users, comment.as_deref()) {
                ctx.send_error(&e);
            }
        }
        Ok(())
    }
}

fn kick_from(
    ctx: &mut Context<'_>,
    name: &str,
    users: &[&str],
    comment: Option<&str>,
) -> HandlerResult {
    let key = fold(name);
    let channel = ctx
        .matrix
        .channels
        .get(&key)
        .ok_or_else(|| HandlerError::NoSuchChannel(name.to_owned()))?;
    if !channel.is_member(ctx.uid) {
        return Err(HandlerError::NotOnChannel(channel.name.clone()));
    }
    if !channel.is_op(ctx.uid) {
        return Err(HandlerError::ChanOpPrivsNeeded(channel.name.clone()));
    }
    let source = ctx.session()?.source();

    for user in users {
        let target = ctx
            .matrix
            .uid_by_nick(user)
            .filter(|uid| ctx.matrix.channels.get(&key).is_some_and(|c| c.is_member(*uid)));
        let Some(target) = target else {
            let channel = ctx.matrix.channels.get(&key).map(|c| c.name.clone());
            ctx.send_error(&HandlerError::UserNotInChannel {
                nick: (*user).to_owned(),
                channel: channel.unwrap_or_else(|| name.to_owned()),
            });
            continue;
        };
        let target_nick = ctx
            .matrix
            .sessions
            .get(&target)
            .map(|s| s.display_nick().to_owned())
            .unwrap_or_else(|| (*user).to_owned());

        if let Some(channel) = ctx.matrix.channels.get(&key) {
            let kick = Reply::Kick(KickEvent {
                source: source.clone(),
                channel: channel.name.clone(),
                user: target_nick.clone(),
                comment: comment.map_or_else(|| target_nick.clone(), str::to_owned),
            });
            channel.broadcast(&ctx.matrix.sessions, &kick, None);
        }
        ctx.matrix.leave_channel(target, &key);
    }
    Ok(())
}
