//! Channel mode queries and changes.

use chrono::Utc;
use dualirc_proto::command::ModeArgs;
use dualirc_proto::reply::{ChannelModeIs, ModeEvent};
use dualirc_proto::{Numeric, Reply, fold, folded_eq};

use crate::handlers::helpers::ModeChanges;
use crate::handlers::{Context, HandlerError, HandlerResult};
use crate::state::{Channel, ListEntry, Matrix};

/// Letters that consume one positional parameter, under either sign.
/// The `-l` parameter is consumed but its value is ignored.
fn takes_param(letter: char) -> bool {
    matches!(letter, 'k' | 'l' | 'o' | 'v' | 'b' | 'e')
}

/// Only `b`/`e` letters and no parameters: list the masks, no privileges needed.
fn is_list_request(modes: &str, params: &[String]) -> bool {
    let mut letters = modes.chars().filter(|c| !matches!(c, '+' | '-')).peekable();
    params.is_empty() && letters.peek().is_some() && letters.all(|c| matches!(c, 'b' | 'e'))
}

pub(super) fn handle(ctx: &mut Context<'_>, args: ModeArgs) -> HandlerResult {
    let target = args.target.trim();
    let key = fold(target);
    let nick = ctx.nick();
    let channel = ctx
        .matrix
        .channels
        .get(&key)
        .ok_or_else(|| HandlerError::NoSuchChannel(target.to_owned()))?;

    let modes = args.modes.as_deref().unwrap_or("");
    if modes.chars().all(|c| matches!(c, '+' | '-')) {
        let (mode, params) = channel.mode_string();
        ctx.reply(Reply::ChannelModeIs(ChannelModeIs {
            to: nick,
            mode,
            channel: channel.name.clone(),
            params,
        }));
        return Ok(());
    }

    if is_list_request(modes, &args.parameters) {
        send_lists(ctx, channel, modes);
        return Ok(());
    }

    if !channel.is_member(ctx.uid) {
        return Err(HandlerError::NotOnChannel(channel.name.clone()));
    }
    if !channel.is_op(ctx.uid) {
        return Err(HandlerError::ChanOpPrivsNeeded(channel.name.clone()));
    }

    let source = ctx.session()?.source();
    let (changes, errors) = apply(ctx.matrix, &key, &nick, modes, &args.parameters);
    for e in &errors {
        ctx.send_error(e);
    }

    if !changes.is_empty()
        && let Some(channel) = ctx.matrix.channels.get(&key)
    {
        let (modes, parameters) = changes.render();
        let event = Reply::Mode(ModeEvent {
            source,
            target: channel.name.clone(),
            modes,
            parameters,
        });
        channel.broadcast(&ctx.matrix.sessions, &event, None);
    }
    Ok(())
}

fn send_lists(ctx: &Context<'_>, channel: &Channel, modes: &str) {
    let mut sent = Vec::new();
    for letter in modes.chars().filter(|c| matches!(c, 'b' | 'e')) {
        if sent.contains(&letter) {
            continue;
        }
        sent.push(letter);
        let (entries, item, end) = match letter {
            'b' => (&channel.bans, Numeric::RPL_BANLIST, Numeric::RPL_ENDOFBANLIST),
            _ => (&channel.excepts, Numeric::RPL_EXCEPTLIST, Numeric::RPL_ENDOFEXCEPTLIST),
        };
        for entry in entries {
            ctx.reply(
                ctx.numeric(item)
                    .params([
                        channel.name.clone(),
                        entry.mask.clone(),
                        entry.set_by.clone(),
                        entry.set_at.to_string(),
                    ])
                    .text(""),
            );
        }
        ctx.reply(ctx.numeric(end).param(&channel.name));
    }
}

/// Apply a mode string to a channel the issuer operates.
///
/// Returns the accepted changes and the per-letter errors to report.
fn apply(
    matrix: &mut Matrix,
    key: &str,
    setter: &str,
    modes: &str,
    params: &[String],
) -> (ModeChanges, Vec<HandlerError>) {
    let mut changes = ModeChanges::default();
    let mut errors = Vec::new();
    let mut unknown = Vec::new();
    let mut params = params.iter();

    let Matrix {
        channels,
        sessions,
        nicks,
        ..
    } = matrix;
    let Some(channel) = channels.get_mut(key) else {
        return (changes, errors);
    };
    let name = channel.name.clone();

    let mut on = true;
    for letter in modes.chars() {
        match letter {
            '+' => {
                on = true;
                continue;
            }
            '-' => {
                on = false;
                continue;
            }
            _ => {}
        }

        let param = if takes_param(letter) {
            match params.next() {
                Some(p) => Some(p.clone()),
                None => continue,
            }
        } else {
            None
        };

        match letter {
            'k' => {
                let Some(value) = param else { continue };
                if on {
                    if channel.key.is_some() {
                        errors.push(HandlerError::KeySet(name.clone()));
                    } else {
                        channel.key = Some(value.clone());
                        changes.push(true, 'k', Some(value));
                    }
                } else if channel.key.take().is_some() {
                    changes.push(false, 'k', Some(value));
                }
            }
            'l' => {
                if on {
                    let limit = param.and_then(|p| p.parse::<usize>().ok()).filter(|n| *n > 0);
                    if let Some(limit) = limit
                        && channel.limit != Some(limit)
                    {
                        channel.limit = Some(limit);
                        changes.push(true, 'l', Some(limit.to_string()));
                    }
                } else if channel.limit.take().is_some() {
                    changes.push(false, 'l', None);
                }
            }
            'o' | 'v' => {
                let Some(target) = param else { continue };
                let Some(&uid) = nicks.get(&fold(&target)) else {
                    errors.push(HandlerError::NoSuchNick(target));
                    continue;
                };
                let display = sessions
                    .get(&uid)
                    .map(|s| s.display_nick().to_owned())
                    .unwrap_or_else(|| target.clone());
                let Some(member) = channel.member_mut(uid) else {
                    errors.push(HandlerError::UserNotInChannel {
                        nick: display,
                        channel: name.clone(),
                    });
                    continue;
                };
                let slot = if letter == 'o' {
                    &mut member.modes.op
                } else {
                    &mut member.modes.voice
                };
                if *slot != on {
                    *slot = on;
                    changes.push(on, letter, Some(display));
                }
            }
            'b' | 'e' => {
                let Some(mask) = param else { continue };
                let list = if letter == 'b' {
                    &mut channel.bans
                } else {
                    &mut channel.excepts
                };
                let existing = list.iter().position(|e| folded_eq(&e.mask, &mask));
                match (on, existing) {
                    (true, None) => {
                        list.push(ListEntry {
                            mask: mask.clone(),
                            set_by: setter.to_owned(),
                            set_at: Utc::now().timestamp(),
                        });
                        changes.push(true, letter, Some(mask));
                    }
                    (false, Some(i)) => {
                        list.remove(i);
                        changes.push(false, letter, Some(mask));
                    }
                    _ => {}
                }
            }
            other => match channel.flags.set(other, on) {
                Some(true) => changes.push(on, other, None),
                Some(false) => {}
                None => {
                    if !unknown.contains(&other) {
                        unknown.push(other);
                        errors.push(HandlerError::UnknownMode {
                            mode: other,
                            channel: name.clone(),
                        });
                    }
                }
            },
        }
    }

    (changes, errors)
}
