//! PART command handler.

use dualirc_proto::command::PartArgs;
use dualirc_proto::reply::PartEvent;
use dualirc_proto::{Reply, fold};

use crate::handlers::helpers::non_empty;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for PART command.
///
/// `PART channel{,channel} [reason]`
pub struct PartHandler;

impl Handler for PartHandler {
    type Args = PartArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: PartArgs) -> HandlerResult {
        if args.channels.is_empty() {
            return Err(HandlerError::NeedMoreParams("PART"));
        }
        let reason = non_empty(args.reason);
        for name in &args.channels {
            if let Err(e) = part_one(ctx, name, reason.as_deref()) {
                ctx.send_error(&e);
            }
        }
        Ok(())
    }
}

/// Leave one channel, telling every member (the parter included).
pub(super) fn part_one(ctx: &mut Context<'_>, name: &str, reason: Option<&str>) -> HandlerResult {
    let key = fold(name);
    let channel = ctx
        .matrix
        .channels
        .get(&key)
        .ok_or_else(|| HandlerError::NoSuchChannel(name.to_owned()))?;
    if !channel.is_member(ctx.uid) {
        return Err(HandlerError::NotOnChannel(channel.name.clone()));
    }

    let part = Reply::Part(PartEvent {
        source: ctx.session()?.source(),
        channel: channel.name.clone(),
        reason: reason.map(str::to_owned),
    });
    channel.broadcast(&ctx.matrix.sessions, &part, None);
    ctx.matrix.leave_channel(ctx.uid, &key);
    Ok(())
}
