//! MODE command handler.
//!
//! Routes to user modes or channel modes by the target's shape.

mod channel;
mod user;

use dualirc_proto::command::ModeArgs;
use dualirc_proto::names::matches_channel_pattern;

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for MODE command.
///
/// `MODE nickname [modes]` or `MODE channel [modes [params...]]`
pub struct ModeHandler;

impl Handler for ModeHandler {
    type Args = ModeArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: ModeArgs) -> HandlerResult {
        let target = args.target.trim();
        if target.is_empty() {
            return Err(HandlerError::NeedMoreParams("MODE"));
        }
        if matches_channel_pattern(target) {
            channel::handle(ctx, args)
        } else {
            user::handle(ctx, args)
        }
    }
}
