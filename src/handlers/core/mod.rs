//! Core handler infrastructure.
//!
//! The [`Handler`] trait, the per-command [`Context`], and the [`Registry`]
//! that routes each decoded [`Command`](dualirc_proto::Command) to its
//! handler.

pub mod context;
pub mod registry;
pub mod traits;

pub use context::Context;
pub use registry::Registry;
pub use traits::Handler;
