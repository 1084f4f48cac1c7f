//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    ServerNameHasSpace(String),
    #[error("limits.list_batch_size must be at least 1")]
    ZeroListBatch,
    #[error("limits.nick_length must be at least 1")]
    ZeroNickLength,
    #[error("limits.max_line_length must be at least 3, got {0}")]
    LineTooShort(usize),
    #[error("listen.address and websocket.address are the same: {0}")]
    DuplicateAddress(std::net::SocketAddr),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.contains(' ') {
        errors.push(ValidationError::ServerNameHasSpace(config.server.name.clone()));
    }

    let limits = &config.limits;
    if limits.list_batch_size == 0 {
        errors.push(ValidationError::ZeroListBatch);
    }
    if limits.nick_length == 0 {
        errors.push(ValidationError::ZeroNickLength);
    }
    if limits.max_line_length < 3 {
        errors.push(ValidationError::LineTooShort(limits.max_line_length));
    }

    if let Some(ws) = &config.websocket
        && ws.address == config.listen.address
        && ws.address.port() != 0
    {
        errors.push(ValidationError::DuplicateAddress(ws.address));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
