//! ISON and USERHOST handlers.

use dualirc_proto::Numeric;
use dualirc_proto::command::NickListArgs;

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for ISON command.
///
/// `ISON nickname{ nickname}`
pub struct IsonHandler;

impl Handler for IsonHandler {
    type Args = NickListArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: NickListArgs) -> HandlerResult {
        let present: Vec<&str> = args
            .nicknames
            .iter()
            .filter_map(|n| ctx.matrix.session_by_nick(n))
            .filter(|s| s.welcomed)
            .map(|s| s.display_nick())
            .collect();
        ctx.reply(ctx.numeric(Numeric::RPL_ISON).text(present.join(" ")));
        Ok(())
    }
}

/// Handler for USERHOST command.
///
/// `USERHOST nickname{ nickname}`
///
/// Answers at most `limits.userhost_max` names as `nick[*]=(+|-)user@host`.
pub struct UserhostHandler;

impl Handler for UserhostHandler {
    type Args = NickListArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: NickListArgs) -> HandlerResult {
        if args.nicknames.is_empty() {
            return Err(HandlerError::NeedMoreParams("USERHOST"));
        }
        let max = ctx.config().limits.userhost_max;
        let entries: Vec<String> = args
            .nicknames
            .iter()
            .take(max)
            .filter_map(|n| ctx.matrix.session_by_nick(n))
            .map(|s| {
                format!(
                    "{}{}={}{}@{}",
                    s.display_nick(),
                    if s.modes.is_operator() { "*" } else { "" },
                    if s.away.is_some() { '-' } else { '+' },
                    s.username(),
                    s.host
                )
            })
            .collect();
        ctx.reply(ctx.numeric(Numeric::RPL_USERHOST).text(entries.join(" ")));
        Ok(())
    }
}
