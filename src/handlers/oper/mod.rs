//! Operator commands: OPER, KILL, WALLOPS.

mod auth;
mod kill;
mod wallops;

pub use auth::OperHandler;
pub use kill::KillHandler;
pub use wallops::WallopsHandler;

use crate::handlers::{Context, HandlerError, HandlerResult};

/// ERR_NOPRIVILEGES unless the issuer is an operator.
fn require_oper(ctx: &Context<'_>) -> HandlerResult {
    if ctx.session()?.modes.is_operator() {
        Ok(())
    } else {
        Err(HandlerError::NoPrivileges)
    }
}
