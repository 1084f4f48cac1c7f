//! User mode changes.

use dualirc_proto::command::ModeArgs;
use dualirc_proto::folded_eq;
use dualirc_proto::reply::ModeEvent;
use dualirc_proto::{Numeric, Reply};

use crate::handlers::helpers::ModeChanges;
use crate::handlers::{Context, HandlerError, HandlerResult};
use crate::state::UserModes;

/// Whether a user may set (`on`) or clear this letter on themselves.
///
/// Operator status comes only from OPER and away status only from AWAY;
/// restriction cannot be lifted.
fn self_settable(letter: char, on: bool) -> bool {
    match (letter, on) {
        ('o' | 'O' | 'a', true) => false,
        ('a' | 'r', false) => false,
        _ => true,
    }
}

pub(super) fn handle(ctx: &mut Context<'_>, args: ModeArgs) -> HandlerResult {
    let target = args.target.trim();
    let session = ctx.session()?;
    if !folded_eq(target, session.display_nick()) {
        return Err(if ctx.matrix.uid_by_nick(target).is_some() {
            HandlerError::UsersDontMatch
        } else {
            HandlerError::NoSuchNick(target.to_owned())
        });
    }

    let Some(modes) = args.modes.filter(|m| !m.is_empty()) else {
        let current = session.modes.as_mode_string();
        ctx.reply(ctx.numeric(Numeric::RPL_UMODEIS).param(current).text(""));
        return Ok(());
    };

    let was_operator = session.modes.is_operator();
    let source = session.source();
    let nick = session.display_nick().to_owned();

    let session = ctx.session_mut()?;
    let mut changes = ModeChanges::default();
    let mut unknown = false;
    let mut on = true;
    for letter in modes.chars() {
        match letter {
            '+' => on = true,
            '-' => on = false,
            l if !UserModes::LETTERS.contains(l) => unknown = true,
            l if !self_settable(l, on) => {}
            l if session.modes.get(l) == Some(on) => {}
            l => {
                session.modes.set(l, on);
                changes.push(on, l, None);
            }
        }
    }
    let is_operator = session.modes.is_operator();

    if was_operator && !is_operator {
        ctx.matrix.counters.operators = ctx.matrix.counters.operators.saturating_sub(1);
    }
    if unknown {
        ctx.send_error(&HandlerError::UmodeUnknownFlag);
    }
    if !changes.is_empty() {
        let (modes, parameters) = changes.render();
        ctx.reply(Reply::Mode(ModeEvent {
            source,
            target: nick,
            modes,
            parameters,
        }));
    }
    Ok(())
}
