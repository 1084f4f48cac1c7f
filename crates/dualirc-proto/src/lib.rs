//! Protocol library for dualircd.
//!
//! One command model, two wire formats:
//!
//! - [`text`]: RFC 2812 style lines, framed by [`codec::LineCodec`].
//! - [`json`]: `{"event", "data"}` envelopes, one per WebSocket frame.
//!
//! Inbound traffic becomes a [`Command`]; outbound traffic is a [`Reply`].
//! Numeric replies are catalogued in [`numeric`]. Names are compared with
//! the RFC 1459 mapping in [`casemap`].

#![deny(clippy::all)]
#![warn(missing_debug_implementations)]

pub mod casemap;
pub mod codec;
pub mod command;
pub mod error;
pub mod json;
pub mod mask;
pub mod names;
pub mod numeric;
pub mod reply;
pub mod text;

pub use casemap::{fold, folded_eq};
pub use codec::LineCodec;
pub use command::Command;
pub use error::{ProtocolError, Result};
pub use mask::{glob_match, mask_matches, Mask};
pub use names::{is_valid_channel, is_valid_nick};
pub use numeric::Numeric;
pub use reply::{NumericReply, Reply, Source};
