//! WALLOPS command handler.

use dualirc_proto::Reply;
use dualirc_proto::command::WallopsArgs;
use dualirc_proto::reply::WallopsEvent;

use super::require_oper;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for WALLOPS command.
///
/// `WALLOPS :text`
///
/// Delivered to every session with `+w`, the sender included.
pub struct WallopsHandler;

impl Handler for WallopsHandler {
    type Args = WallopsArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: WallopsArgs) -> HandlerResult {
        require_oper(ctx)?;
        if args.text.trim().is_empty() {
            return Err(HandlerError::NeedMoreParams("WALLOPS"));
        }
        let event = Reply::Wallops(WallopsEvent {
            source: ctx.session()?.source(),
            text: args.text,
        });
        for session in ctx.matrix.sessions.values().filter(|s| s.modes.wallops) {
            session.send(event.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dualirc_proto::{Numeric, Reply};

    use crate::handlers::test_support::Harness;

    #[tokio::test]
    async fn reaches_wallops_users_only() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        let carol = h.register("carol");
        h.line(alice, "OPER letmein");
        h.line(alice, "MODE alice +w");
        h.line(bob, "MODE bob +w");
        h.drain(alice);
        h.drain(bob);

        h.line(alice, "WALLOPS :heads up");
        assert!(matches!(h.drain(alice).as_slice(), [Reply::Wallops(_)]));
        assert!(matches!(h.drain(bob).as_slice(), [Reply::Wallops(w)] if w.text == "heads up"));
        assert!(h.drain(carol).is_empty());
    }

    #[tokio::test]
    async fn needs_operator_then_text() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        assert_eq!(h.numerics_for(alice, "WALLOPS :x"), vec![Numeric::ERR_NOPRIVILEGES]);
        h.line(alice, "OPER letmein");
        h.drain(alice);
        assert_eq!(h.numerics_for(alice, "WALLOPS"), vec![Numeric::ERR_NEEDMOREPARAMS]);
    }
}
