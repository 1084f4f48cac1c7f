//! State management module.
//!
//! Contains the Matrix (all server state), the session and channel records
//! it holds, and the actor task that owns it.

mod actor;
mod channel;
mod matrix;
mod session;
mod uid;

pub use actor::{Actor, ServerEvent};
pub use channel::{Channel, ChannelFlags, ListEntry, Member, MemberModes, Topic};
pub use matrix::{Counters, Matrix, ServerInfo};
pub use session::{Session, TransportKind, UserModes};
pub use uid::{Uid, UidGenerator};
