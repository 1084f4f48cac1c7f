//! NAMES command handler.

use dualirc_proto::Reply;
use dualirc_proto::command::ChannelListArgs;

use crate::handlers::helpers::{channel_visible, end_of_names, names_reply};
use crate::handlers::{Context, Handler, HandlerResult};
use crate::state::Channel;

/// Handler for NAMES command.
///
/// `NAMES [channel{,channel}]`
pub struct NamesHandler;

impl Handler for NamesHandler {
    type Args = ChannelListArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: ChannelListArgs) -> HandlerResult {
        let nick = ctx.nick();

        if args.channels.is_empty() {
            let mut visible: Vec<&Channel> = ctx
                .matrix
                .channels
                .values()
                .filter(|c| channel_visible(c, ctx.uid))
                .collect();
            visible.sort_by(|a, b| a.name.cmp(&b.name));
            for channel in visible {
                ctx.reply(Reply::Names(names_reply(ctx.matrix, channel, ctx.uid, &nick)));
            }
            ctx.reply(end_of_names(&nick, "*"));
            return Ok(());
        }

        for name in &args.channels {
            match ctx.matrix.channel(name) {
                Some(channel) if channel_visible(channel, ctx.uid) => {
                    ctx.reply(Reply::Names(names_reply(ctx.matrix, channel, ctx.uid, &nick)));
                    ctx.reply(end_of_names(&nick, &channel.name));
                }
                _ => ctx.reply(end_of_names(&nick, name)),
            }
        }
        Ok(())
    }
}
