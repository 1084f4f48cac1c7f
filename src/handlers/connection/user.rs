//! USER command handler.

use dualirc_proto::command::UserArgs;

use super::complete_registration;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// RFC 2812 USER mode bit for +w.
const MODE_BIT_WALLOPS: u32 = 1 << 2;
/// RFC 2812 USER mode bit for +i.
const MODE_BIT_INVISIBLE: u32 = 1 << 3;

/// Handler for USER command.
///
/// `USER user mode unused :realname`
pub struct UserHandler;

impl Handler for UserHandler {
    type Args = UserArgs;
    const NEEDS_REGISTRATION: bool = false;

    fn handle(&self, ctx: &mut Context<'_>, args: UserArgs) -> HandlerResult {
        if args.user.trim().is_empty()
            || args.mode.trim().is_empty()
            || args.realname.trim().is_empty()
        {
            return Err(HandlerError::NeedMoreParams("USER"));
        }
        let bits = args.mode_bits();
        let session = ctx.session_mut()?;
        if session.welcomed {
            return Err(HandlerError::AlreadyRegistered);
        }

        session.user = Some(args.user.trim().to_owned());
        session.realname = args.realname;
        if bits & MODE_BIT_WALLOPS != 0 {
            session.modes.wallops = true;
        }
        if bits & MODE_BIT_INVISIBLE != 0 {
            session.modes.invisible = true;
        }

        complete_registration(ctx)
    }
}
