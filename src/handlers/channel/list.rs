//! LIST command handler.

use dualirc_proto::command::Empty;
use dualirc_proto::reply::ListBatch;
use dualirc_proto::{Numeric, Reply};

use crate::handlers::{Context, Handler, HandlerResult};
use crate::state::Channel;

/// Handler for LIST command.
///
/// Secret and private channels are never listed. Entries go out in
/// batches of `limits.list_batch_size`.
pub struct ListHandler;

impl Handler for ListHandler {
    type Args = Empty;

    fn handle(&self, ctx: &mut Context<'_>, _args: Empty) -> HandlerResult {
        let nick = ctx.nick();
        let batch = ctx.config().limits.list_batch_size.max(1);

        let mut listed: Vec<&Channel> = ctx
            .matrix
            .channels
            .values()
            .filter(|c| !c.is_hidden())
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));

        for chunk in listed.chunks(batch) {
            ctx.reply(Reply::List(ListBatch {
                to: nick.clone(),
                channels: chunk.iter().map(|c| c.name.clone()).collect(),
                users: chunk.iter().map(|c| c.members.len()).collect(),
                topics: chunk
                    .iter()
                    .map(|c| c.topic.as_ref().map(|t| t.text.clone()).unwrap_or_default())
                    .collect(),
            }));
        }
        ctx.reply(ctx.numeric(Numeric::RPL_LISTEND));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dualirc_proto::Reply;

    use crate::handlers::test_support::Harness;

    #[tokio::test]
    async fn batches_skip_hidden_channels() {
        let mut h = Harness::with_extra("[limits]\nlist_batch_size = 2");
        let alice = h.register("alice");
        h.line(alice, "JOIN #a,#b,#c,#d");
        h.line(alice, "MODE #d +s");
        h.line(alice, "TOPIC #a :first");
        h.drain(alice);

        h.line(alice, "LIST");
        let batches: Vec<_> = h
            .drain(alice)
            .into_iter()
            .filter_map(|r| match r {
                Reply::List(b) => Some(b),
                _ => None,
            })
            .collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].channels, vec!["#a", "#b"]);
        assert_eq!(batches[0].users, vec![1, 1]);
        assert_eq!(batches[0].topics, vec!["first", ""]);
        assert_eq!(batches[1].channels, vec!["#c"]);
    }
}
