//! Messaging handlers: PRIVMSG and NOTICE.
//!
//! Both share one routing path; NOTICE never produces error replies or
//! RPL_AWAY.

mod routing;

use dualirc_proto::command::MessageArgs;
use tracing::debug;

use crate::handlers::{Context, Handler, HandlerResult};
use routing::{Kind, route};

/// Handler for PRIVMSG command.
///
/// `PRIVMSG target :message`
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    type Args = MessageArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: MessageArgs) -> HandlerResult {
        route(ctx, args, Kind::Privmsg)
    }
}

/// Handler for NOTICE command.
///
/// `NOTICE target :message`
pub struct NoticeHandler;

impl Handler for NoticeHandler {
    type Args = MessageArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: MessageArgs) -> HandlerResult {
        if let Err(e) = route(ctx, args, Kind::Notice) {
            debug!(error = %e, "notice dropped");
        }
        Ok(())
    }
}
