//! NICK command handler.

use dualirc_proto::command::NickArgs;
use dualirc_proto::reply::NickEvent;
use dualirc_proto::{Reply, fold, is_valid_nick};
use tracing::info;

use super::complete_registration;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for NICK command.
///
/// `NICK nickname`
///
/// Sets the nickname before registration and renames afterwards.
pub struct NickHandler;

impl Handler for NickHandler {
    type Args = NickArgs;
    const NEEDS_REGISTRATION: bool = false;

    fn handle(&self, ctx: &mut Context<'_>, args: NickArgs) -> HandlerResult {
        let nick = args.nickname.trim();
        if nick.is_empty() {
            return Err(HandlerError::NoNicknameGiven);
        }
        if !is_valid_nick(nick, ctx.config().limits.nick_length) {
            return Err(HandlerError::ErroneousNickname(nick.to_owned()));
        }
        if let Some(owner) = ctx.matrix.uid_by_nick(nick)
            && owner != ctx.uid
        {
            return Err(HandlerError::NicknameInUse(nick.to_owned()));
        }

        let session = ctx.session()?;
        let old = session.nick.clone();
        if old.as_deref() == Some(nick) {
            return Ok(());
        }
        let welcomed = session.welcomed;
        let old_source = session.source();

        if let Some(old) = &old {
            let old_key = fold(old);
            let invites = std::mem::take(&mut ctx.session_mut()?.invites);
            for key in invites {
                if let Some(channel) = ctx.matrix.channels.get_mut(&key) {
                    channel.drop_invite(&old_key);
                }
            }
        }

        ctx.matrix.set_nick(ctx.uid, nick);

        if !welcomed {
            return complete_registration(ctx);
        }

        let event = Reply::Nick(NickEvent {
            source: old_source,
            nickname: nick.to_owned(),
        });
        for peer in ctx.matrix.peers(ctx.uid) {
            ctx.matrix.send(peer, event.clone());
        }
        ctx.reply(event);

        info!(uid = %ctx.uid, old = old.as_deref().unwrap_or("*"), new = %nick, "nick changed");
        Ok(())
    }
}
