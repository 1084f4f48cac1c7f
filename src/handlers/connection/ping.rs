//! PING, PONG and the per-second session tick.

use dualirc_proto::Reply;
use dualirc_proto::command::{Empty, PingArgs};
use dualirc_proto::reply::{PingEvent, PongEvent};
use tracing::debug;

use super::closing_link;
use crate::handlers::{Context, Handler, HandlerResult};
use crate::state::{Matrix, Uid};

/// Handler for PING command.
///
/// `PING source`
pub struct PingHandler;

impl Handler for PingHandler {
    type Args = PingArgs;
    const NEEDS_REGISTRATION: bool = false;

    fn handle(&self, ctx: &mut Context<'_>, args: PingArgs) -> HandlerResult {
        let server = ctx.server_name().to_owned();
        let source = if args.source.is_empty() {
            server.clone()
        } else {
            args.source
        };
        ctx.reply(Reply::Pong(PongEvent { server, source }));
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    type Args = Empty;
    const NEEDS_REGISTRATION: bool = false;

    fn handle(&self, ctx: &mut Context<'_>, _args: Empty) -> HandlerResult {
        ctx.session_mut()?.ping_idle_secs = 0;
        Ok(())
    }
}

/// Advance one session's idle clocks by a second.
///
/// Sends a PING when the ping-idle counter reaches the configured frequency
/// and tears the session down once it passes the deadline. A tick for a
/// session that no longer exists is ignored.
pub fn tick(matrix: &mut Matrix, uid: Uid) {
    let limits = matrix.config.limits.clone();
    let Some(session) = matrix.sessions.get_mut(&uid) else {
        return;
    };
    session.idle_secs += 1;
    session.ping_idle_secs += 1;
    let idle = session.ping_idle_secs;

    if idle == limits.ping_frequency {
        session.send(Reply::Ping(PingEvent {
            source: matrix.server.name.clone(),
        }));
        debug!(%uid, "ping sent");
    }

    if let Some(deadline) = limits.ping_deadline()
        && idle >= deadline
    {
        let reason = format!("Ping timeout: {idle} seconds");
        if let Some(session) = matrix.teardown(uid, &reason) {
            session.send(closing_link(&session.host, &reason));
        }
    }
}
