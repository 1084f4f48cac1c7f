//! LUSERS handler.

use dualirc_proto::Numeric;
use dualirc_proto::command::TargetArgs;

use super::check_target;
use crate::handlers::{Context, Handler, HandlerResult};

/// Handler for LUSERS command.
pub struct LusersHandler;

impl Handler for LusersHandler {
    type Args = TargetArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TargetArgs) -> HandlerResult {
        check_target(ctx, &args)?;
        send_lusers(ctx);
        Ok(())
    }
}

/// RPL_LUSERCLIENT through RPL_LUSERME.
pub(crate) fn send_lusers(ctx: &Context<'_>) {
    let counters = ctx.matrix.counters;
    let channels = ctx.matrix.channels.len();

    ctx.reply(ctx.numeric(Numeric::RPL_LUSERCLIENT).text(format!(
        "There are {} users and 0 services on 1 servers",
        counters.registered
    )));
    ctx.reply(
        ctx.numeric(Numeric::RPL_LUSEROP)
            .param(counters.operators.to_string()),
    );
    ctx.reply(
        ctx.numeric(Numeric::RPL_LUSERUNKNOWN)
            .param(counters.unknown.to_string()),
    );
    ctx.reply(
        ctx.numeric(Numeric::RPL_LUSERCHANNELS)
            .param(channels.to_string()),
    );
    ctx.reply(
        ctx.numeric(Numeric::RPL_LUSERME)
            .text(format!("I have {} clients and 1 servers", counters.registered)),
    );
}
