//! JOIN command handler.

use chrono::Utc;
use dualirc_proto::command::JoinArgs;
use dualirc_proto::reply::JoinEvent;
use dualirc_proto::{Reply, fold, is_valid_channel};
use tracing::{debug, info};

use super::part::part_one;
use crate::error::ChannelError;
use crate::handlers::helpers::{end_of_names, names_reply, topic_reply};
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::state::{Channel, Matrix, MemberModes};

/// Handler for JOIN command.
///
/// `JOIN channel{,channel} [key{,key}]` or `JOIN 0`
pub struct JoinHandler;

impl Handler for JoinHandler {
    type Args = JoinArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: JoinArgs) -> HandlerResult {
        if args.channels.is_empty() {
            return Err(HandlerError::NeedMoreParams("JOIN"));
        }

        if let [only] = args.channels.as_slice()
            && only == "0"
        {
            return part_all(ctx);
        }

        for (i, name) in args.channels.iter().enumerate() {
            let key = args.keys.get(i).map(String::as_str);
            if let Err(e) = join_one(ctx, name, key) {
                debug!(channel = %name, error = %e, "join refused");
                ctx.send_error(&e);
            }
        }
        Ok(())
    }
}

/// `JOIN 0`: leave every channel as if by PART.
fn part_all(ctx: &mut Context<'_>) -> HandlerResult {
    let joined = ctx.session()?.channels.clone();
    for key in joined {
        if let Some(name) = ctx.matrix.channels.get(&key).map(|c| c.name.clone()) {
            part_one(ctx, &name, None)?;
        }
    }
    Ok(())
}

/// Admission checks for an existing channel, in refusal order.
fn admit(channel: &Channel, ctx: &Context<'_>, key: Option<&str>) -> Result<(), ChannelError> {
    let session = match ctx.session() {
        Ok(session) => session,
        Err(_) => return Ok(()),
    };
    let folded = fold(&channel.name);
    let invited = session.has_invite(&folded) || channel.is_invited(&fold(session.display_nick()));
    if invited {
        return Ok(());
    }
    if channel.denies(session) {
        return Err(ChannelError::BannedFromChan);
    }
    if channel.flags.invite_only {
        return Err(ChannelError::InviteOnlyChan);
    }
    if channel.is_full() {
        return Err(ChannelError::ChannelIsFull);
    }
    if let Some(expected) = &channel.key
        && key != Some(expected.as_str())
    {
        return Err(ChannelError::BadChannelKey);
    }
    Ok(())
}

fn join_one(ctx: &mut Context<'_>, name: &str, key: Option<&str>) -> HandlerResult {
    if !is_valid_channel(name, ctx.config().limits.channel_length) {
        return Err(HandlerError::NoSuchChannel(name.to_owned()));
    }
    let folded = fold(name);
    if ctx.session()?.is_on(&folded) {
        return Ok(());
    }

    let created = match ctx.matrix.channels.get(&folded) {
        Some(channel) => {
            admit(channel, ctx, key).map_err(|reason| HandlerError::Channel {
                channel: channel.name.clone(),
                reason,
            })?;
            false
        }
        None => true,
    };

    let uid = ctx.uid;
    let nick = ctx.nick();
    let folded_nick = fold(&nick);
    let Matrix {
        channels, sessions, ..
    } = &mut *ctx.matrix;

    let session = sessions.get_mut(&uid).ok_or(HandlerError::SessionGone)?;
    session.channels.push(folded.clone());
    session.invites.retain(|c| c != &folded);
    let source = session.source();

    let channel = channels
        .entry(folded.clone())
        .or_insert_with(|| Channel::new(name, Utc::now().timestamp()));
    channel.add_member(
        uid,
        MemberModes {
            op: created,
            voice: false,
        },
    );
    channel.drop_invite(&folded_nick);

    let join = Reply::Join(JoinEvent {
        source,
        channel: channel.name.clone(),
    });
    channel.broadcast(sessions, &join, None);

    if created {
        info!(channel = %name, %nick, "channel created");
    }

    let Some(channel) = ctx.matrix.channels.get(&folded) else {
        return Ok(());
    };
    if let Some(topic) = topic_reply(&nick, channel) {
        ctx.reply(topic);
    }
    ctx.reply(Reply::Names(names_reply(ctx.matrix, channel, uid, &nick)));
    ctx.reply(end_of_names(&nick, &channel.name));
    Ok(())
}
