//! KILL command handler.

use dualirc_proto::command::KillArgs;
use dualirc_proto::reply::KillEvent;
use dualirc_proto::{Reply, folded_eq};
use tracing::info;

use super::require_oper;
use crate::handlers::connection::closing_link;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for KILL command.
///
/// `KILL nickname :comment`
pub struct KillHandler;

impl Handler for KillHandler {
    type Args = KillArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: KillArgs) -> HandlerResult {
        require_oper(ctx)?;
        let nickname = args.nickname.trim();
        if nickname.is_empty() || args.comment.trim().is_empty() {
            return Err(HandlerError::NeedMoreParams("KILL"));
        }
        if folded_eq(nickname, ctx.server_name()) {
            return Err(HandlerError::CantKillServer);
        }
        let target = ctx
            .matrix
            .session_by_nick(nickname)
            .ok_or_else(|| HandlerError::NoSuchNick(nickname.to_owned()))?;
        let target_uid = target.uid;
        let killer = ctx.session()?;

        target.send(Reply::Kill(KillEvent {
            source: killer.source(),
            nickname: target.display_nick().to_owned(),
            comment: args.comment.clone(),
        }));

        let reason = format!("Killed ({} ({}))", killer.display_nick(), args.comment);
        info!(killer = %killer.display_nick(), victim = %target.display_nick(), "kill");
        if let Some(session) = ctx.matrix.teardown(target_uid, &reason) {
            session.send(closing_link(&session.host, &reason));
        }
        Ok(())
    }
}
