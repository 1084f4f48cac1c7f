//! Structured event envelope: `{"event": "<NAME>", "data": {...}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::Command;
use crate::error::Result;
use crate::reply::Reply;

#[derive(Debug, Deserialize)]
struct Inbound {
    event: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Serialize)]
struct Outbound<'a> {
    event: &'a str,
    data: Value,
}

/// Decode one inbound frame.
pub fn decode(frame: &str) -> Result<Command> {
    let env: Inbound = serde_json::from_str(frame)?;
    Command::from_event(&env.event, env.data)
}

/// The `data` object for a reply.
pub fn data(reply: &Reply) -> Result<Value> {
    let value = match reply {
        Reply::Numeric(n) => serde_json::to_value(n)?,
        Reply::Names(n) => serde_json::to_value(n)?,
        Reply::ChannelModeIs(m) => serde_json::to_value(m)?,
        Reply::List(l) => serde_json::to_value(l)?,
        Reply::Join(e) => serde_json::to_value(e)?,
        Reply::Part(e) => serde_json::to_value(e)?,
        Reply::Privmsg(e) | Reply::Notice(e) => serde_json::to_value(e)?,
        Reply::Nick(e) => serde_json::to_value(e)?,
        Reply::Mode(e) => serde_json::to_value(e)?,
        Reply::Kick(e) => serde_json::to_value(e)?,
        Reply::Quit(e) => serde_json::to_value(e)?,
        Reply::Invite(e) => serde_json::to_value(e)?,
        Reply::Topic(e) => serde_json::to_value(e)?,
        Reply::Wallops(e) => serde_json::to_value(e)?,
        Reply::Kill(e) => serde_json::to_value(e)?,
        Reply::Ping(e) => serde_json::to_value(e)?,
        Reply::Pong(e) => serde_json::to_value(e)?,
        Reply::Error(e) => serde_json::to_value(e)?,
    };
    Ok(value)
}

/// Encode a reply as one text frame.
pub fn encode(reply: &Reply) -> Result<String> {
    let env = Outbound {
        event: reply.event(),
        data: data(reply)?,
    };
    Ok(serde_json::to_string(&env)?)
}
