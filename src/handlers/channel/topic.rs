//! TOPIC command handler.

use chrono::Utc;
use dualirc_proto::command::TopicArgs;
use dualirc_proto::reply::TopicEvent;
use dualirc_proto::{Numeric, Reply, fold};

use crate::handlers::helpers::topic_reply;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::state::Topic;

/// Handler for TOPIC command.
///
/// `TOPIC channel [topic]`
///
/// Without a topic, queries it. An empty topic clears it.
pub struct TopicHandler;

impl Handler for TopicHandler {
    type Args = TopicArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TopicArgs) -> HandlerResult {
        let name = args.channel.trim();
        if name.is_empty() {
            return Err(HandlerError::NeedMoreParams("TOPIC"));
        }
        let key = fold(name);
        let nick = ctx.nick();
        let channel = ctx
            .matrix
            .channels
            .get(&key)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_owned()))?;
        if !channel.is_member(ctx.uid) {
            return Err(HandlerError::NotOnChannel(channel.name.clone()));
        }

        let Some(text) = args.topic else {
            let reply = topic_reply(&nick, channel).unwrap_or_else(|| {
                ctx.numeric(Numeric::RPL_NOTOPIC).param(&channel.name)
            });
            ctx.reply(reply);
            return Ok(());
        };

        if channel.flags.topic_lock && !channel.is_op(ctx.uid) {
            return Err(HandlerError::ChanOpPrivsNeeded(channel.name.clone()));
        }

        let source = ctx.session()?.source();
        let Some(channel) = ctx.matrix.channels.get_mut(&key) else {
            return Ok(());
        };
        channel.topic = (!text.is_empty()).then(|| Topic {
            text: text.clone(),
            set_by: nick,
            set_at: Utc::now().timestamp(),
        });
        let event = Reply::Topic(TopicEvent {
            source,
            channel: channel.name.clone(),
            topic: text,
        });
        channel.broadcast(&ctx.matrix.sessions, &event, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dualirc_proto::{Numeric, Reply};

    use crate::handlers::test_support::Harness;

    #[tokio::test]
    async fn set_query_and_clear() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(alice, "JOIN #a");
        h.line(bob, "JOIN #a");
        h.drain(alice);
        h.drain(bob);

        assert_eq!(h.numerics_for(bob, "TOPIC #a"), vec![Numeric::RPL_NOTOPIC]);
        h.line(bob, "TOPIC #a :new topic");
        assert!(matches!(h.drain(alice).as_slice(), [Reply::Topic(t)] if t.topic == "new topic"));
        h.drain(bob);

        h.line(bob, "TOPIC #a");
        let Some(Reply::Numeric(reply)) = h.drain(bob).into_iter().next() else {
            panic!("expected RPL_TOPIC");
        };
        assert_eq!(reply.numeric, Numeric::RPL_TOPIC);
        assert_eq!(reply.text, "new topic");

        h.line(bob, "TOPIC #a :");
        assert!(h.matrix.channel("#a").expect("channel").topic.is_none());
    }

    #[tokio::test]
    async fn topic_lock_needs_operator() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(alice, "JOIN #a");
        h.line(alice, "MODE #a +t");
        h.line(bob, "JOIN #a");
        h.drain(bob);
        assert_eq!(h.numerics_for(bob, "TOPIC #a :mine"), vec![Numeric::ERR_CHANOPRIVSNEEDED]);
        assert!(h.matrix.channel("#a").expect("channel").topic.is_none());
    }

    #[tokio::test]
    async fn topic_errors() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        let bob = h.register("bob");
        h.line(bob, "JOIN #b");
        assert_eq!(h.numerics_for(alice, "TOPIC"), vec![Numeric::ERR_NEEDMOREPARAMS]);
        assert_eq!(h.numerics_for(alice, "TOPIC #none"), vec![Numeric::ERR_NOSUCHCHANNEL]);
        assert_eq!(h.numerics_for(alice, "TOPIC #b"), vec![Numeric::ERR_NOTONCHANNEL]);
    }
}
