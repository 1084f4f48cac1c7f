//! IRC command handlers.
//!
//! Every decoded [`Command`](dualirc_proto::Command) is routed by the
//! [`Registry`] to one handler implementing [`Handler`]. Handlers run inside
//! the state actor with exclusive access to the [`Matrix`](crate::state::Matrix)
//! through a [`Context`].

mod channel;
pub mod connection;
mod core;
mod helpers;
mod messaging;
mod mode;
mod oper;
mod server_query;
mod user_query;
mod user_status;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::core::{Context, Handler, Registry};
pub use crate::error::{HandlerError, HandlerResult};
