//! WHOIS command handler.

use dualirc_proto::Numeric;
use dualirc_proto::command::WhoisArgs;

use crate::handlers::helpers::channel_visible;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};

/// Handler for WHOIS command.
///
/// `WHOIS [server] nickname`
pub struct WhoisHandler;

impl Handler for WhoisHandler {
    type Args = WhoisArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: WhoisArgs) -> HandlerResult {
        let wanted = args.nickname().trim().to_owned();
        if wanted.is_empty() {
            return Err(HandlerError::NoNicknameGiven);
        }

        let Some(target) = ctx.matrix.session_by_nick(&wanted) else {
            ctx.send_error(&HandlerError::NoSuchNick(wanted.clone()));
            ctx.reply(ctx.numeric(Numeric::RPL_ENDOFWHOIS).param(wanted));
            return Ok(());
        };
        let nick = target.display_nick().to_owned();

        ctx.reply(
            ctx.numeric(Numeric::RPL_WHOISUSER)
                .params([nick.as_str(), target.username(), target.host.as_str(), "*"])
                .text(&target.realname),
        );

        let channels: Vec<String> = target
            .channels
            .iter()
            .filter_map(|key| ctx.matrix.channels.get(key))
            .filter(|c| channel_visible(c, ctx.uid))
            .map(|c| {
                let prefix = c.modes_of(target.uid).prefix_char();
                match prefix {
                    Some(p) => format!("{p}{}", c.name),
                    None => c.name.clone(),
                }
            })
            .collect();
        if !channels.is_empty() {
            ctx.reply(
                ctx.numeric(Numeric::RPL_WHOISCHANNELS)
                    .param(&nick)
                    .text(channels.join(" ")),
            );
        }

        let server_info = ctx
            .config()
            .server
            .info
            .first()
            .cloned()
            .unwrap_or_else(|| ctx.matrix.server.network.clone());
        ctx.reply(
            ctx.numeric(Numeric::RPL_WHOISSERVER)
                .params([nick.as_str(), ctx.server_name()])
                .text(server_info),
        );

        if let Some(away) = &target.away {
            ctx.reply(ctx.numeric(Numeric::RPL_AWAY).param(&nick).text(away));
        }
        if target.modes.is_operator() {
            ctx.reply(ctx.numeric(Numeric::RPL_WHOISOPERATOR).param(&nick));
        }
        ctx.reply(ctx.numeric(Numeric::RPL_WHOISIDLE).params([
            nick.clone(),
            target.idle_secs.to_string(),
            target.signon.to_string(),
        ]));
        ctx.reply(ctx.numeric(Numeric::RPL_ENDOFWHOIS).param(nick));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dualirc_proto::{Numeric, Reply};

    use crate::handlers::test_support::Harness;

    #[tokio::test]
    async fn full_whois_for_operator_away_user() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(bob, "JOIN #pub,#sec");
        h.line(bob, "MODE #sec +s");
        h.line(bob, "AWAY :busy");
        h.line(bob, "OPER letmein");

        h.line(alice, "WHOIS bob");
        let replies = h.drain(alice);
        let numerics: Vec<_> = replies.iter().filter_map(Reply::numeric).collect();
        assert_eq!(
            numerics,
            vec![
                Numeric::RPL_WHOISUSER,
                Numeric::RPL_WHOISCHANNELS,
                Numeric::RPL_WHOISSERVER,
                Numeric::RPL_AWAY,
                Numeric::RPL_WHOISOPERATOR,
                Numeric::RPL_WHOISIDLE,
                Numeric::RPL_ENDOFWHOIS,
            ]
        );
        let Reply::Numeric(channels) = &replies[1] else {
            panic!("expected RPL_WHOISCHANNELS");
        };
        assert_eq!(channels.text, "@#pub");
    }

    #[tokio::test]
    async fn unknown_nick_gets_error_and_end() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        assert_eq!(
            h.numerics_for(alice, "WHOIS ghost"),
            vec![Numeric::ERR_NOSUCHNICK, Numeric::RPL_ENDOFWHOIS]
        );
        assert_eq!(h.numerics_for(alice, "WHOIS"), vec![Numeric::ERR_NONICKNAMEGIVEN]);
    }

    #[tokio::test]
    async fn server_form_uses_second_argument() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let _bob = h.register("bob");
        let numerics = h.numerics_for(alice, "WHOIS irc.test bob");
        assert_eq!(numerics.first(), Some(&Numeric::RPL_WHOISUSER));
    }
}
