//! OPER command handler.

use dualirc_proto::command::OperArgs;
use dualirc_proto::reply::ModeEvent;
use dualirc_proto::{Numeric, Reply};
use tracing::{info, warn};

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for OPER command.
///
/// `OPER [name] password`
pub struct OperHandler;

impl Handler for OperHandler {
    type Args = OperArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: OperArgs) -> HandlerResult {
        if args.password.is_empty() {
            return Err(HandlerError::NeedMoreParams("OPER"));
        }
        if !ctx.config().oper.verify_password(&args.password) {
            warn!(uid = %ctx.uid, nick = %ctx.nick(), "failed OPER attempt");
            return Err(HandlerError::PasswdMismatch);
        }

        let session = ctx.session_mut()?;
        let already = session.modes.is_operator();
        session.modes.oper = true;
        let source = session.source();
        let nick = session.display_nick().to_owned();
        if !already {
            ctx.matrix.counters.operators += 1;
        }

        ctx.reply(ctx.numeric(Numeric::RPL_YOUREOPER));
        if !already {
            ctx.reply(Reply::Mode(ModeEvent {
                source,
                target: nick.clone(),
                modes: "+o".to_owned(),
                parameters: Vec::new(),
            }));
        }
        info!(uid = %ctx.uid, %nick, "operator authenticated");
        Ok(())
    }
}
