//! Registration completion and the welcome burst.

use dualirc_proto::Numeric;
use tracing::info;

use crate::handlers::server_query::{send_lusers, send_motd};
use crate::handlers::{Context, HandlerResult};

/// Channel modes advertised in RPL_MYINFO.
const CHANNEL_MODES: &str = "aimnqpsrtklbeov";

/// Send the welcome burst once both NICK and USER are in.
///
/// RPL_WELCOME through RPL_MYINFO, then the LUSERS and MOTD blocks. Moves
/// the session from the unknown to the registered counter and starts its
/// ticker. Does nothing until the session is ready.
pub(crate) fn complete_registration(ctx: &mut Context<'_>) -> HandlerResult {
    let session = ctx.session_mut()?;
    if !session.ready_to_register() {
        return Ok(());
    }
    session.welcomed = true;
    let mask = session.source().mask();
    let nick = session.display_nick().to_owned();

    ctx.matrix.counters.unknown = ctx.matrix.counters.unknown.saturating_sub(1);
    ctx.matrix.counters.registered += 1;

    let server = &ctx.matrix.server;
    let burst = [
        ctx.numeric(Numeric::RPL_WELCOME)
            .text(format!("Welcome to the Internet Relay Network {mask}")),
        ctx.numeric(Numeric::RPL_YOURHOST).text(format!(
            "Your host is {}, running version {}",
            server.name, server.version
        )),
        ctx.numeric(Numeric::RPL_CREATED)
            .text(format!("This server was created {}", server.created)),
        ctx.numeric(Numeric::RPL_MYINFO)
            .params([
                server.name.as_str(),
                server.version.as_str(),
                crate::state::UserModes::LETTERS,
                CHANNEL_MODES,
            ])
            .text(""),
    ];
    for reply in burst {
        ctx.reply(reply);
    }

    send_lusers(ctx);
    send_motd(ctx);
    ctx.matrix.start_ticker(ctx.uid);

    info!(uid = %ctx.uid, %nick, "client registered");
    Ok(())
}
