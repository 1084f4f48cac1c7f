//! Command handler context.

use dualirc_proto::{Numeric, NumericReply, Reply};

use crate::config::Config;
use crate::error::HandlerError;
use crate::state::{Matrix, Session, Uid};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that issued the command.
    pub uid: Uid,
    /// All server state, exclusively borrowed for the command's duration.
    pub matrix: &'a mut Matrix,
}

impl<'a> Context<'a> {
    pub fn new(uid: Uid, matrix: &'a mut Matrix) -> Self {
        Self { uid, matrix }
    }

    pub fn session(&self) -> Result<&Session, HandlerError> {
        self.matrix
            .sessions
            .get(&self.uid)
            .ok_or(HandlerError::SessionGone)
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, HandlerError> {
        self.matrix
            .sessions
            .get_mut(&self.uid)
            .ok_or(HandlerError::SessionGone)
    }

    pub fn is_registered(&self) -> bool {
        self.session().is_ok_and(|s| s.welcomed)
    }

    /// Issuer's nickname for reply addressing, `*` if unset.
    pub fn nick(&self) -> String {
        self.session()
            .map(|s| s.display_nick().to_owned())
            .unwrap_or_else(|_| "*".to_owned())
    }

    pub fn server_name(&self) -> &str {
        &self.matrix.server.name
    }

    pub fn config(&self) -> &Config {
        &self.matrix.config
    }

    /// Start a numeric reply addressed to the issuer.
    pub fn numeric(&self, numeric: Numeric) -> NumericReply {
        NumericReply::new(numeric, self.nick())
    }

    /// Queue a reply for the issuer.
    pub fn reply(&self, reply: impl Into<Reply>) {
        self.matrix.send(self.uid, reply);
    }

    /// Send the numeric an error maps to, if any.
    pub fn send_error(&self, err: &HandlerError) {
        if let Some(reply) = err.to_reply(&self.nick()) {
            self.reply(reply);
        }
    }
}
