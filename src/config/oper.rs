//! Operator credentials.

use serde::Deserialize;

/// The single shared operator password.
///
/// An empty password disables OPER entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperConfig {
    /// Password (plaintext or bcrypt hash).
    #[serde(default)]
    pub password: String,
}

impl OperConfig {
    /// Verify the provided password against the stored password (plaintext or bcrypt).
    pub fn verify_password(&self, password: &str) -> bool {
        if self.password.is_empty() {
            return false;
        }
        if self.password.starts_with("$2") {
            bcrypt::verify(password, &self.password).unwrap_or(false)
        } else {
            self.password == password
        }
    }
}
