//! Protocol limits and keepalive timing.

use serde::Deserialize;

/// Protocol limits configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Seconds of silence before the server sends PING (default: 90).
    #[serde(default = "default_ping_frequency")]
    pub ping_frequency: u64,
    /// Further seconds without PONG before disconnect (default: 120).
    /// Zero disables the timeout.
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
    /// Channels per RPL_LIST batch (default: 10).
    #[serde(default = "default_list_batch_size")]
    pub list_batch_size: usize,
    /// Longest accepted nickname (default: 9).
    #[serde(default = "default_nick_length")]
    pub nick_length: usize,
    /// Longest accepted channel name (default: 50).
    #[serde(default = "default_channel_length")]
    pub channel_length: usize,
    /// USERHOST answers at most this many nicknames (default: 5).
    #[serde(default = "default_userhost_max")]
    pub userhost_max: usize,
    /// Longest inbound text line in bytes, CRLF included (default: 512).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            ping_frequency: default_ping_frequency(),
            ping_timeout: default_ping_timeout(),
            list_batch_size: default_list_batch_size(),
            nick_length: default_nick_length(),
            channel_length: default_channel_length(),
            userhost_max: default_userhost_max(),
            max_line_length: default_max_line_length(),
        }
    }
}

impl LimitsConfig {
    /// Ping-idle seconds at which a session is dropped, if the timeout is enabled.
    pub fn ping_deadline(&self) -> Option<u64> {
        (self.ping_timeout > 0).then(|| self.ping_frequency + self.ping_timeout)
    }
}

fn default_ping_frequency() -> u64 {
    90
}

fn default_ping_timeout() -> u64 {
    120
}

fn default_list_batch_size() -> usize {
    10
}

fn default_nick_length() -> usize {
    dualirc_proto::names::DEFAULT_NICK_LEN
}

fn default_channel_length() -> usize {
    dualirc_proto::names::DEFAULT_CHANNEL_LEN
}

fn default_userhost_max() -> usize {
    5
}

fn default_max_line_length() -> usize {
    dualirc_proto::codec::DEFAULT_MAX_LINE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let config = LimitsConfig::default();
        assert_eq!(config.ping_frequency, 90);
        assert_eq!(config.ping_timeout, 120);
        assert_eq!(config.list_batch_size, 10);
        assert_eq!(config.nick_length, 9);
        assert_eq!(config.channel_length, 50);
        assert_eq!(config.userhost_max, 5);
        assert_eq!(config.max_line_length, 512);
    }

    #[test]
    fn ping_deadline_adds_timeout() {
        let config = LimitsConfig::default();
        assert_eq!(config.ping_deadline(), Some(210));
        let disabled = LimitsConfig {
            ping_timeout: 0,
            ..LimitsConfig::default()
        };
        assert_eq!(disabled.ping_deadline(), None);
    }
}
