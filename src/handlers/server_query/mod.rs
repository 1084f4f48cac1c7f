//! Server query handlers: MOTD, LUSERS, VERSION, TIME, ADMIN, INFO
//!
//! RFC 2812 §3.4 - Server queries and commands

mod lusers;
mod motd;
mod server_info;

pub use lusers::LusersHandler;
pub use motd::MotdHandler;
pub use server_info::{AdminHandler, InfoHandler, TimeHandler, VersionHandler};

pub(crate) use lusers::send_lusers;
pub(crate) use motd::send_motd;

use dualirc_proto::command::TargetArgs;
use dualirc_proto::folded_eq;

use crate::handlers::{Context, HandlerError, HandlerResult};

/// Only this server answers queries; any other target is ERR_NOSUCHSERVER.
fn check_target(ctx: &Context<'_>, args: &TargetArgs) -> HandlerResult {
    match args.target.as_deref().map(str::trim) {
        Some(target) if !target.is_empty() && !folded_eq(target, ctx.server_name()) => {
            Err(HandlerError::NoSuchServer(target.to_owned()))
        }
        _ => Ok(()),
    }
}
