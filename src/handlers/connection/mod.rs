//! Connection and registration handlers.
//!
//! Handles NICK, USER, PING, PONG, QUIT and the per-second session tick.

mod nick;
mod ping;
mod quit;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use ping::{PingHandler, PongHandler, tick};
pub use quit::QuitHandler;
pub use user::UserHandler;

pub(crate) use quit::closing_link;
pub(crate) use welcome::complete_registration;
