//! Target resolution and delivery for PRIVMSG and NOTICE.

use dualirc_proto::command::MessageArgs;
use dualirc_proto::names::{matches_channel_pattern, matches_nick_pattern};
use dualirc_proto::reply::MessageEvent;
use dualirc_proto::{Numeric, Reply, Source};

use crate::handlers::{Context, HandlerError, HandlerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind {
    Privmsg,
    Notice,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Self::Privmsg => "PRIVMSG",
            Self::Notice => "NOTICE",
        }
    }

    fn wrap(self, event: MessageEvent) -> Reply {
        match self {
            Self::Privmsg => Reply::Privmsg(event),
            Self::Notice => Reply::Notice(event),
        }
    }
}

pub(super) fn route(ctx: &mut Context<'_>, args: MessageArgs, kind: Kind) -> HandlerResult {
    let target = args.target.trim();
    if target.is_empty() {
        return Err(HandlerError::NoRecipient(kind.name()));
    }
    if args.message.is_empty() {
        return Err(HandlerError::NoTextToSend);
    }

    if matches_channel_pattern(target) {
        to_channel(ctx, target, args.message, kind)?;
    } else if matches_nick_pattern(target) {
        to_user(ctx, target, args.message, kind)?;
    } else {
        return Err(HandlerError::NoSuchNick(target.to_owned()));
    }

    ctx.session_mut()?.idle_secs = 0;
    Ok(())
}

fn to_channel(ctx: &Context<'_>, target: &str, message: String, kind: Kind) -> HandlerResult {
    let channel = ctx
        .matrix
        .channel(target)
        .ok_or_else(|| HandlerError::NoSuchNick(target.to_owned()))?;
    let session = ctx.session()?;
    let modes = channel.modes_of(ctx.uid);
    let member = channel.is_member(ctx.uid);
    let speaks = modes.can_speak_moderated();

    if (channel.flags.no_external && !member)
        || (channel.flags.moderated && !speaks)
        || (channel.denies(session) && !speaks)
    {
        return Err(HandlerError::CannotSendToChan(channel.name.clone()));
    }

    let source = if channel.flags.anonymous {
        Source::anonymous()
    } else {
        session.source()
    };
    let event = kind.wrap(MessageEvent {
        source,
        target: channel.name.clone(),
        message,
    });
    channel.broadcast(&ctx.matrix.sessions, &event, Some(ctx.uid));
    Ok(())
}

fn to_user(ctx: &Context<'_>, target: &str, message: String, kind: Kind) -> HandlerResult {
    let recipient = ctx
        .matrix
        .session_by_nick(target)
        .ok_or_else(|| HandlerError::NoSuchNick(target.to_owned()))?;
    let source = ctx.session()?.source();

    if kind == Kind::Privmsg
        && let Some(away) = &recipient.away
    {
        ctx.reply(
            ctx.numeric(Numeric::RPL_AWAY)
                .param(recipient.display_nick())
                .text(away),
        );
    }

    recipient.send(kind.wrap(MessageEvent {
        source,
        target: recipient.display_nick().to_owned(),
        message,
    }));
    Ok(())
}
