//! MOTD handler.
//!
//! The file is re-read on every request so edits show up without a restart.
//! Reading happens on a spawned task; the lines go straight to the
//! session's outbound queue.

use dualirc_proto::command::TargetArgs;
use dualirc_proto::{Numeric, NumericReply};
use tracing::warn;

use super::check_target;
use crate::handlers::{Context, Handler, HandlerResult};

/// Handler for MOTD command.
pub struct MotdHandler;

impl Handler for MotdHandler {
    type Args = TargetArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TargetArgs) -> HandlerResult {
        check_target(ctx, &args)?;
        send_motd(ctx);
        Ok(())
    }
}

/// RPL_MOTDSTART, one RPL_MOTD per line, RPL_ENDOFMOTD; or ERR_NOMOTD.
pub(crate) fn send_motd(ctx: &Context<'_>) {
    let Some(path) = ctx.config().motd.file.clone() else {
        ctx.reply(ctx.numeric(Numeric::ERR_NOMOTD));
        return;
    };
    let Ok(session) = ctx.session() else {
        return;
    };
    let tx = session.sender().clone();
    let nick = ctx.nick();
    let server = ctx.server_name().to_owned();

    tokio::spawn(async move {
        let replies = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let mut replies = vec![
                    NumericReply::new(Numeric::RPL_MOTDSTART, &nick)
                        .text(format!("- {server} Message of the day - ")),
                ];
                replies.extend(content.lines().map(|line| {
                    NumericReply::new(Numeric::RPL_MOTD, &nick).text(format!("- {line}"))
                }));
                replies.push(NumericReply::new(Numeric::RPL_ENDOFMOTD, &nick));
                replies
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read MOTD file");
                vec![NumericReply::new(Numeric::ERR_NOMOTD, &nick)]
            }
        };
        for reply in replies {
            if tx.send(reply.into()).is_err() {
                break;
            }
        }
    });
}
