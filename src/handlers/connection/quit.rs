//! QUIT command handler.

use dualirc_proto::Reply;
use dualirc_proto::command::QuitArgs;
use dualirc_proto::reply::ErrorEvent;

use crate::handlers::helpers::non_empty;
use crate::handlers::{Context, Handler, HandlerResult};

const DEFAULT_QUIT: &str = "Client Quit";

/// `ERROR :Closing Link: <host> (<reason>)`
pub(crate) fn closing_link(host: &str, reason: &str) -> Reply {
    Reply::Error(ErrorEvent {
        message: format!("Closing Link: {host} ({reason})"),
    })
}

/// Handler for QUIT command.
///
/// `QUIT [reason]`
pub struct QuitHandler;

impl Handler for QuitHandler {
    type Args = QuitArgs;
    const NEEDS_REGISTRATION: bool = false;

    fn handle(&self, ctx: &mut Context<'_>, args: QuitArgs) -> HandlerResult {
        let reason = non_empty(args.reason).unwrap_or_else(|| DEFAULT_QUIT.to_owned());
        if let Some(session) = ctx.matrix.teardown(ctx.uid, &reason) {
            session.send(closing_link(&session.host, &reason));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;

    #[tokio::test]
    async fn quit_notifies_peers_once_and_closes() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(alice, "JOIN #a,#b");
        h.line(bob, "JOIN #a,#b");
        h.drain(alice);
        h.drain(bob);

        h.line(alice, "QUIT :bye now");
        assert_eq!(
            h.drain(alice),
            vec![closing_link("127.0.0.1", "bye now")]
        );
        assert!(h.is_closed(alice));

        let quits = h
            .drain(bob)
            .into_iter()
            .filter(|r| matches!(r, Reply::Quit(q) if q.reason == "bye now"))
            .count();
        assert_eq!(quits, 1);
        assert_eq!(h.matrix.uid_by_nick("alice"), None);
        assert_eq!(h.matrix.channel("#a").map(|c| c.members.len()), Some(1));
        assert_eq!(h.matrix.counters.registered, 1);
    }

    #[tokio::test]
    async fn last_member_quitting_removes_channel() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        h.line(alice, "JOIN #solo");
        h.line(alice, "QUIT");
        assert!(h.matrix.channels.is_empty());
    }

    #[tokio::test]
    async fn unregistered_quit_adjusts_unknown_counter() {
        let mut h = Harness::new();
        let c = h.connect();
        assert_eq!(h.matrix.counters.unknown, 1);
        h.line(c, "QUIT");
        assert_eq!(h.matrix.counters.unknown, 0);
        assert_eq!(
            h.drain(c),
            vec![closing_link("127.0.0.1", "Client Quit")]
        );
    }
}
