//! User query handlers: WHOIS, WHO, ISON, USERHOST.

mod ison;
mod who;
mod whois;

pub use ison::{IsonHandler, UserhostHandler};
pub use who::WhoHandler;
pub use whois::WhoisHandler;
