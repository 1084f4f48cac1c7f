//! The handler trait.

use super::context::Context;
use crate::error::HandlerResult;

/// One protocol verb.
///
/// `Args` is the typed payload the transports decode for this command.
/// Handlers validate first and only then mutate, so an `Err` leaves state
/// untouched; the registry turns the error into the single numeric reply
/// owed to the initiator.
pub trait Handler {
    type Args;

    /// Commands that need registration get ERR_NOTREGISTERED before it.
    const NEEDS_REGISTRATION: bool = true;

    fn handle(&self, ctx: &mut Context<'_>, args: Self::Args) -> HandlerResult;
}
