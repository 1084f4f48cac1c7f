//! RFC-style text lines.
//!
//! [`parse_line`] turns one inbound line into the same
//! [`Command`](crate::command::Command) the structured transport produces;
//! [`render`] turns a [`Reply`](crate::reply::Reply) into zero or more
//! outbound lines (without the CRLF terminator).

mod parse;
mod render;

pub use parse::{parse_line, tokenize, RawLine};
pub use render::render;
