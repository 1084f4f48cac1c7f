//! Network listener configuration.

use serde::Deserialize;
use std::net::SocketAddr;

/// Plain TCP listener for the text protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:6667").
    pub address: SocketAddr,
}

/// WebSocket listener for the JSON event protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Address to bind to (e.g., "0.0.0.0:8080").
    pub address: SocketAddr,
    /// Allowed origins for CORS (e.g., `["https://example.com"]`).
    /// Empty list allows all origins.
    #[serde(default)]
    pub allow_origins: Vec<String>,
}

impl WebSocketConfig {
    /// Whether a handshake with this `Origin` header may proceed.
    pub fn origin_allowed(&self, origin: Option<&str>) -> bool {
        if self.allow_origins.is_empty() {
            return true;
        }
        origin.is_some_and(|o| self.allow_origins.iter().any(|allowed| allowed == o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(origins: &[&str]) -> WebSocketConfig {
        WebSocketConfig {
            address: "127.0.0.1:0".parse().expect("addr"),
            allow_origins: origins.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_allow_list_accepts_everything() {
        let config = ws(&[]);
        assert!(config.origin_allowed(None));
        assert!(config.origin_allowed(Some("https://anywhere")));
    }

    #[test]
    fn allow_list_is_exact() {
        let config = ws(&["https://chat.example.org"]);
        assert!(config.origin_allowed(Some("https://chat.example.org")));
        assert!(!config.origin_allowed(Some("https://evil.example.org")));
        assert!(!config.origin_allowed(None));
    }
}
