//! User status handler: AWAY

use dualirc_proto::Numeric;
use dualirc_proto::command::AwayArgs;

use super::helpers::non_empty;
use super::{Context, Handler, HandlerResult};

/// Handler for AWAY command.
///
/// `AWAY [message]`
///
/// Sets or clears away status.
pub struct AwayHandler;

impl Handler for AwayHandler {
    type Args = AwayArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: AwayArgs) -> HandlerResult {
        let session = ctx.session_mut()?;
        let reply = match non_empty(args.text) {
            Some(text) => {
                session.away = Some(text);
                session.modes.away = true;
                Numeric::RPL_NOWAWAY
            }
            None => {
                session.away = None;
                session.modes.away = false;
                Numeric::RPL_UNAWAY
            }
        };
        ctx.reply(ctx.numeric(reply));
        Ok(())
    }
}
